//! Guess the statement layout from marker phrases.

use crate::types::StatementKind;

const CREDIT_CARD_MARKERS: &[&str] = &[
    "Card No",
    "Domestic Transactions",
    "International Transactions",
    "Credit Limit",
    "Minimum Amount Due",
    "Payment Due Date",
];

const SAVINGS_MARKERS: &[&str] = &[
    "Withdrawal Amt",
    "Deposit Amt",
    "Closing Balance",
    "Statement From",
    "IFSC",
    "Account No",
];

/// Returns the kind whose markers appear most often, or `None` when the text
/// carries no marker (or both kinds score the same).
pub fn detect_kind(text: &str) -> Option<StatementKind> {
    let card = score(text, CREDIT_CARD_MARKERS);
    let savings = score(text, SAVINGS_MARKERS);
    log::debug!("detect: credit-card={card} savings={savings}");

    match card.cmp(&savings) {
        std::cmp::Ordering::Greater => Some(StatementKind::CreditCard),
        std::cmp::Ordering::Less => Some(StatementKind::Savings),
        std::cmp::Ordering::Equal => None,
    }
}

fn score(text: &str, markers: &[&str]) -> usize {
    markers.iter().filter(|m| text.contains(*m)).count()
}
