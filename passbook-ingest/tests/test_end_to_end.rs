use chrono::NaiveDate;
use passbook_core::{ParseResult, StatementDocument, TransactionType};
use passbook_ingest::{
    HdfcCreditCardParser, HdfcSavingsParser, ParseSettings, StatementKind, StatementParser,
    ValidationPolicy, detect_kind, parse_auto, parse_text,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use std::str::FromStr;

const CARD_TEXT: &str = "Statement Date:15/08/2023\n\
    Card No: 1234 56XX XXXX 7890\n\
    Payment Due Date 20/08/2023\n\
    Domestic Transactions\n\
    15/08/2023 AMAZONIN GURGAON 1,299.00\n\
    16/08/2023 COFFEE SHOP 150.50\n\
    Important Information\n";

const SAVINGS_TEXT: &str = "HDFC BANK\n\
    Account No : 50100234567890\n\
    Customer Name\n\
    Customer ID : 12345678\n\
    Statement From : 01/01/2023 To : 31/01/2023\n\
    IFSC Code : HDFC0001234\n\
    Branch : OMR BRANCH\n\
    \n\
    Date Narration Chq./Ref.No. Value Dt Withdrawal Amt. Deposit Amt. Closing Balance\n\
    01/01/23 OPENING BALANCE 01/01/23 0.00 0.00 10,000.00\n\
    02/01/23 UPI-WALMART-PAY 123456 02/01/23 500.00 0.00 9,500.00\n\
    05/01/23 SALARY CREDIT REF-999 05/01/23 0.00 50,000.00 59,500.00\n";

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Card statement with metadata and a bounded table parses into two debits.
#[test]
fn test_credit_card_end_to_end() {
    let outcome = parse_text(StatementKind::CreditCard, CARD_TEXT, &ParseSettings::default());
    let Some(StatementDocument::CreditCard(stmt)) = outcome.document() else {
        panic!("expected success, got {:?}", outcome.result);
    };

    assert_eq!(stmt.transactions.len(), 2);
    assert!(stmt.transactions.iter().all(|t| t.kind == TransactionType::Debit));
    assert_eq!(
        stmt.transactions[0].date,
        NaiveDate::from_ymd_opt(2023, 8, 15).unwrap()
    );
    assert_eq!(stmt.transactions[0].amount, dec("1299.00"));
    assert_eq!(stmt.total_debits(), Some(dec("1449.50")));
    assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);
}

/// Savings statement without table markers: every line is offered to the row pattern.
#[test]
fn test_savings_end_to_end() {
    let outcome = parse_text(StatementKind::Savings, SAVINGS_TEXT, &ParseSettings::default());
    let Some(StatementDocument::Savings(stmt)) = outcome.document() else {
        panic!("expected success, got {:?}", outcome.result);
    };

    assert_eq!(stmt.account_number.as_deref(), Some("50100234567890"));
    assert_eq!(stmt.ifsc_code.as_deref(), Some("HDFC0001234"));
    assert_eq!(stmt.transactions.len(), 3);

    let first = &stmt.transactions[0];
    assert_eq!(
        stmt.opening_balance,
        Some(first.closing_balance + first.withdrawal_amount - first.deposit_amount)
    );
    assert_eq!(stmt.closing_balance, Some(dec("59500.00")));
    assert_eq!(stmt.transactions[1].description, "UPI-WALMART-PAY");
    assert_eq!(stmt.transactions[1].withdrawal_amount, dec("500.00"));
    assert_eq!(stmt.transactions[2].deposit_amount, dec("50000.00"));
}

#[test]
fn test_detect_and_parse_auto() {
    assert_eq!(detect_kind(CARD_TEXT), Some(StatementKind::CreditCard));
    assert_eq!(detect_kind(SAVINGS_TEXT), Some(StatementKind::Savings));

    let settings = ParseSettings::default();
    assert!(matches!(
        parse_auto(CARD_TEXT, &settings).document(),
        Some(StatementDocument::CreditCard(_))
    ));
    assert!(matches!(
        parse_auto(SAVINGS_TEXT, &settings).document(),
        Some(StatementDocument::Savings(_))
    ));
}

#[test]
fn test_parsing_is_idempotent() {
    let parser = HdfcCreditCardParser::default();
    assert_eq!(parser.parse(CARD_TEXT), parser.parse(CARD_TEXT));

    let parser = HdfcSavingsParser::default();
    assert_eq!(parser.parse(SAVINGS_TEXT), parser.parse(SAVINGS_TEXT));
}

#[test]
fn test_parallel_parsing_matches_sequential() {
    let settings = ParseSettings::default();
    let expected_card = parse_text(StatementKind::CreditCard, CARD_TEXT, &settings);
    let expected_savings = parse_text(StatementKind::Savings, SAVINGS_TEXT, &settings);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                scope.spawn(move || {
                    if i % 2 == 0 {
                        parse_text(StatementKind::CreditCard, CARD_TEXT, &settings)
                    } else {
                        parse_text(StatementKind::Savings, SAVINGS_TEXT, &settings)
                    }
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let got = handle.join().unwrap();
            let expected = if i % 2 == 0 { &expected_card } else { &expected_savings };
            assert_eq!(&got, expected);
        }
    });
}

#[test]
fn test_corrupted_input_never_panics() {
    let settings = ParseSettings::default();
    let inputs = [
        "",
        "   \n\n\t",
        "\u{0}\u{1}garbage\u{fffd}",
        "Domestic Transactions\n99/99/9999 ??? ,,,\n",
        "Domestic Transactions\n1/1 X 1.2.3\n",
        "01/01/23 X 01/01/23 1.00 2.00",
    ];
    for kind in [StatementKind::CreditCard, StatementKind::Savings] {
        for input in inputs {
            let outcome = parse_text(kind, input, &settings);
            assert!(
                matches!(outcome.result, ParseResult::Failure(_)),
                "{kind} accepted {input:?}"
            );
        }
    }
}

#[test]
fn test_strict_policy_is_configurable_per_kind() {
    let settings = ParseSettings {
        credit_card: ValidationPolicy::RequireMetadata,
        ..Default::default()
    };

    // All required card metadata is present, so the strict policy still passes.
    assert!(parse_text(StatementKind::CreditCard, CARD_TEXT, &settings).is_success());

    let stripped = CARD_TEXT.replace("Card No: 1234 56XX XXXX 7890\n", "");
    let outcome = parse_text(StatementKind::CreditCard, &stripped, &settings);
    assert_eq!(
        outcome.result,
        ParseResult::failure("Statement validation failed: missing card number")
    );
}

#[test]
fn test_outcome_serializes_to_json() {
    let outcome = parse_text(StatementKind::CreditCard, CARD_TEXT, &ParseSettings::default());
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["result"]["status"], "success");
    assert_eq!(json["result"]["value"]["kind"], "credit-card");
    assert_eq!(json["result"]["value"]["transactions"][0]["type"], "DEBIT");
    assert_eq!(json["result"]["value"]["transactions"][0]["date"], "2023-08-15");
}
