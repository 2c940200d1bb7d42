//! HDFC credit card statement parser (text)
//!
//! Expected extracted-text layout:
//!   Statement Date:15/08/2023
//!   Card No: 1234 56XX XXXX 7890
//!   Payment Due Date 05/09/2023
//!   Domestic Transactions
//!   Date        Transaction Description                 Amount (in Rs.)
//!   15/08/2023  AMAZONIN GURGAON                        1,299.00
//!   18/08       REFUND AMAZONIN                         250.00 Cr
//!   Important Information
//!
//! Rows may carry `dd/mm` or `m/yyyy` dates; those are completed from the
//! statement date.

use once_cell::sync::Lazy;
use passbook_core::{
    CardTransaction, CreditCardStatement, DateResolver, Diagnostics, Result, StatementDocument,
    TransactionType, parse_money, split_credit_marker,
};
use regex::{Captures, Regex};

use super::{ParserOptions, StatementParser, note_fallback_year};
use crate::metadata::{
    capture, parse_date_value, probe_compact, probe_date, probe_money, probe_text,
};
use crate::reference::{explicit_reference, split_reference};
use crate::section::section_text;
use crate::types::StatementKind;
use crate::validate::{RequiredField, validate_statement};

// DATE DESCRIPTION AMOUNT [Cr]
static TRANSACTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*(?P<date>\d{1,2}/\d{1,2}(?:/\d{2,4})?|\d{1,2}/\d{4})[ \t]+",
        r"(?P<desc>[^\n]+?)[ \t]+",
        r"(?P<amount>\d[\d,]*(?:\.\d*)?(?:[ \t]*(?:[Cc][Rr]|[Cc]))?)[ \t]*$"
    ))
    .expect("transaction line pattern")
});

static STATEMENT_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Statement[ \t]+Date[ \t]*:?[ \t]*(\d{1,2}/\d{1,2}/\d{2,4})")
        .expect("statement date pattern")
});

static CARD_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Card[ \t]+No\.?[ \t]*:?[ \t]*(\d{4}[ \t]*[\dXx*]{4}[ \t]*[\dXx*]{4}[ \t]*\d{4})")
        .expect("card number pattern")
});

static PAYMENT_DUE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Payment[ \t]+Due[ \t]+Date[^\n\d]*(\d{2}/\d{2}/\d{4})")
        .expect("payment due date pattern")
});

// Summary row printed under the "Payment Due Date  Total Dues  Minimum Amount Due" header
static DUE_DATE_SUMMARY_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2}/\d{2}/\d{4})[ \t]+[\d,]+\.\d{2}[ \t]+[\d,]+\.\d{2}")
        .expect("due date summary row pattern")
});

static CREDIT_LIMIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*Credit[ \t]+Limit[ \t]*:?[ \t]*(?:Rs\.?|INR)?[ \t]*(\d[\d,]*(?:\.\d+)?)")
        .expect("credit limit pattern")
});

static AVAILABLE_CREDIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Available[ \t]+Credit(?:[ \t]+Limit)?[ \t]*:?[ \t]*(?:Rs\.?|INR)?[ \t]*(\d[\d,]*(?:\.\d+)?)",
    )
    .expect("available credit pattern")
});

static CARD_HOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)Name[ \t]*:[ \t]*([^\n]+?)[ \t]*$").expect("card holder pattern"));

static TOTAL_DUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"Total(?:[ \t]+Dues|[ \t]+Amount[ \t]+Due)?[ \t]*:?[ \t]*(?:Rs\.?|INR)?[ \t]*(\d[\d,]*(?:\.\d+)?)",
    )
    .expect("total dues pattern")
});

static MINIMUM_DUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:Min|Minimum)[ \t]*(?:Amount[ \t]*)?Due[ \t]*:?[ \t]*(?:Rs\.?|INR)?[ \t]*(\d[\d,]*(?:\.\d+)?)",
    )
    .expect("minimum due pattern")
});

static SECTION_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:Domestic|International)[ \t]+Transactions?.*$")
        .expect("section start pattern")
});

static SECTION_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)important[ \t]+information|cash[ \t]+points|reward[ \t]+points|due[ \t]+date")
        .expect("section end pattern")
});

#[derive(Debug, Clone, Default)]
pub struct HdfcCreditCardParser {
    options: ParserOptions,
}

impl HdfcCreditCardParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    fn extract_due_date(&self, text: &str, diagnostics: &mut Diagnostics) -> Option<chrono::NaiveDate> {
        if let Some(raw) = capture(&PAYMENT_DUE_DATE, text) {
            log::debug!("found payment due date: {raw}");
            return parse_date_value(raw, "payment due date", diagnostics);
        }

        // Only consulted when the labelled probe finds nothing
        let raw = capture(&DUE_DATE_SUMMARY_ROW, text)?;
        log::debug!("found payment due date in summary row: {raw}");
        parse_date_value(raw, "payment due date", diagnostics)
    }
}

impl StatementParser for HdfcCreditCardParser {
    type Statement = CreditCardStatement;
    type Transaction = CardTransaction;

    fn kind(&self) -> StatementKind {
        StatementKind::CreditCard
    }

    fn extract_metadata(&self, text: &str, statement: &mut CreditCardStatement, diagnostics: &mut Diagnostics) {
        statement.statement_date = probe_date(&STATEMENT_DATE, text, "statement date", diagnostics);
        statement.card_number = probe_compact(&CARD_NUMBER, text, "card number");
        statement.due_date = self.extract_due_date(text, diagnostics);
        statement.credit_limit = probe_money(&CREDIT_LIMIT, text, "credit limit", diagnostics);
        statement.available_credit = probe_money(&AVAILABLE_CREDIT, text, "available credit", diagnostics);
        statement.card_holder_name = probe_text(&CARD_HOLDER, text, "card holder name");
        statement.total_dues = probe_money(&TOTAL_DUES, text, "total dues", diagnostics);
        statement.minimum_amount_due = probe_money(&MINIMUM_DUE, text, "minimum amount due", diagnostics);
    }

    fn locate_section<'t>(&self, text: &'t str, diagnostics: &mut Diagnostics) -> &'t str {
        section_text(text, &SECTION_START, &SECTION_END, diagnostics)
    }

    fn line_pattern(&self) -> &Regex {
        &TRANSACTION_LINE
    }

    fn parse_transaction_line(
        &self,
        caps: &Captures<'_>,
        statement: &CreditCardStatement,
        diagnostics: &mut Diagnostics,
    ) -> Result<CardTransaction> {
        let date_token = &caps["date"];
        let resolved = DateResolver::new(statement.statement_date, self.options.fallback_year)
            .resolve(date_token)?;

        let (amount_text, is_credit) = split_credit_marker(&caps["amount"]);
        let amount = parse_money(amount_text)?;

        let raw_desc = caps["desc"].trim();
        let (description, reference_number) = match explicit_reference(raw_desc) {
            Some(reference) => (raw_desc.to_string(), Some(reference)),
            None => split_reference(raw_desc),
        };

        note_fallback_year(date_token, &resolved, diagnostics);

        Ok(CardTransaction {
            date: resolved.date,
            description,
            amount,
            kind: if is_credit {
                TransactionType::Credit
            } else {
                TransactionType::Debit
            },
            reference_number,
        })
    }

    fn push_transaction(&self, statement: &mut CreditCardStatement, transaction: CardTransaction) {
        log::debug!(
            "transaction: {} | {} | {} | {:?}",
            transaction.date,
            transaction.description,
            transaction.amount,
            transaction.kind
        );
        statement.transactions.push(transaction);
    }

    fn validate(&self, statement: &CreditCardStatement, diagnostics: &mut Diagnostics) -> Result<()> {
        validate_statement(
            self.options.policy,
            &[
                RequiredField::new("statement date", &statement.statement_date),
                RequiredField::new("payment due date", &statement.due_date),
                RequiredField::new("card number", &statement.card_number),
            ],
            statement.transactions.len(),
            diagnostics,
        )
    }

    fn into_document(&self, statement: CreditCardStatement) -> StatementDocument {
        StatementDocument::CreditCard(statement)
    }
}
