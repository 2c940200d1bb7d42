//! HDFC savings account statement parser (text)
//!
//! Expected extracted-text layout (fixed columns, no section markers):
//!   Account No : 50100234567890
//!   Statement From : 01/01/2023 To : 31/01/2023
//!   Date      Narration              Chq./Ref.No.  Value Dt  Withdrawal Amt.  Deposit Amt.  Closing Balance
//!   02/01/23  UPI-WALMART-PAY        123456        02/01/23  500.00           0.00          9,500.00
//!
//! Every line of the text is offered to the row pattern; header and footer
//! lines simply fail to match.

use once_cell::sync::Lazy;
use passbook_core::{
    DateResolver, DiagnosticKind, Diagnostics, Result, SavingsStatement, SavingsTransaction,
    StatementDocument, parse_money,
};
use regex::{Captures, Regex};
use rust_decimal::Decimal;

use super::{ParserOptions, StatementParser, note_fallback_year};
use crate::metadata::{parse_date_value, probe_compact, probe_text};
use crate::reference::split_reference;
use crate::types::StatementKind;
use crate::validate::{RequiredField, validate_statement};

// DATE NARRATION [REF] VALUE-DATE WITHDRAWAL DEPOSIT BALANCE
static TRANSACTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)^[ \t]*(?P<date>\d{2}/\d{2}/\d{2,4})[ \t]+",
        r"(?P<desc>[^\n]+?)[ \t]+",
        r"(?P<value_date>\d{2}/\d{2}/\d{2,4})[ \t]+",
        r"(?P<withdrawal>\d[\d,]*\.\d{2})[ \t]+",
        r"(?P<deposit>\d[\d,]*\.\d{2})[ \t]+",
        r"(?P<balance>\d[\d,]*\.\d{2})"
    ))
    .expect("transaction line pattern")
});

static ACCOUNT_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Account[ \t]+(?:No|Number)\.?[ \t]*:?[ \t]*(\d(?:[ \t]?\d){8,17})")
        .expect("account number pattern")
});

static STATEMENT_PERIOD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"Statement[ \t]+From[ \t]*:?[ \t]*(\d{2}/\d{2}/\d{4})",
        r"[ \t]*To[ \t]*:?[ \t]*(\d{2}/\d{2}/\d{4})"
    ))
    .expect("statement period pattern")
});

static IFSC_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"IFSC(?:[ \t]+Code)?[ \t]*:?[ \t]*([A-Z]{4}0[A-Z0-9]{6})").expect("IFSC pattern")
});

static BRANCH_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)Branch[ \t]*:[ \t]*([^\n]+?)[ \t]*$").expect("branch pattern"));

// The holder's name has no label; it sits on the line above "Customer ID".
static ACCOUNT_HOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*([^\n]*\S)[ \t]*\n[ \t]*Customer[ \t]+ID").expect("account holder pattern")
});

#[derive(Debug, Clone, Default)]
pub struct HdfcSavingsParser {
    options: ParserOptions,
}

impl HdfcSavingsParser {
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }
}

impl StatementParser for HdfcSavingsParser {
    type Statement = SavingsStatement;
    type Transaction = SavingsTransaction;

    fn kind(&self) -> StatementKind {
        StatementKind::Savings
    }

    fn extract_metadata(&self, text: &str, statement: &mut SavingsStatement, diagnostics: &mut Diagnostics) {
        statement.account_number = probe_compact(&ACCOUNT_NUMBER, text, "account number");

        match STATEMENT_PERIOD.captures(text) {
            Some(caps) => {
                log::debug!("found statement period: {} - {}", &caps[1], &caps[2]);
                statement.from_date = parse_date_value(&caps[1], "statement period start", diagnostics);
                statement.to_date = parse_date_value(&caps[2], "statement period end", diagnostics);
            }
            None => log::debug!("statement period not found"),
        }

        statement.ifsc_code = probe_text(&IFSC_CODE, text, "IFSC code");
        statement.branch_name = probe_text(&BRANCH_NAME, text, "branch name");
        statement.account_holder_name = probe_text(&ACCOUNT_HOLDER, text, "account holder name");
    }

    fn line_pattern(&self) -> &Regex {
        &TRANSACTION_LINE
    }

    fn parse_transaction_line(
        &self,
        caps: &Captures<'_>,
        statement: &SavingsStatement,
        diagnostics: &mut Diagnostics,
    ) -> Result<SavingsTransaction> {
        let date_token = &caps["date"];
        let resolved =
            DateResolver::new(statement.to_date, self.options.fallback_year).resolve(date_token)?;

        let withdrawal_amount = parse_money(&caps["withdrawal"])?;
        let deposit_amount = parse_money(&caps["deposit"])?;
        let closing_balance = parse_money(&caps["balance"])?;

        let (description, reference_number) = split_reference(&caps["desc"]);

        note_fallback_year(date_token, &resolved, diagnostics);
        if withdrawal_amount > Decimal::ZERO && deposit_amount > Decimal::ZERO {
            let line = caps[0].trim();
            diagnostics.warn(
                DiagnosticKind::AmountColumns {
                    line: line.to_string(),
                },
                format!("both withdrawal and deposit set on {line:?}"),
            );
        }

        Ok(SavingsTransaction {
            date: resolved.date,
            description,
            reference_number,
            withdrawal_amount,
            deposit_amount,
            closing_balance,
        })
    }

    fn push_transaction(&self, statement: &mut SavingsStatement, transaction: SavingsTransaction) {
        log::debug!(
            "transaction: {} | {} | -{} +{} = {}",
            transaction.date,
            transaction.description,
            transaction.withdrawal_amount,
            transaction.deposit_amount,
            transaction.closing_balance
        );
        statement.transactions.push(transaction);
    }

    fn finish(&self, statement: &mut SavingsStatement, diagnostics: &mut Diagnostics) {
        statement.opening_balance = statement.derived_opening_balance();
        statement.closing_balance = statement.transactions.last().map(|t| t.closing_balance);

        if let (None, Some(first)) = (statement.opening_balance, statement.transactions.first()) {
            diagnostics.unparseable_field(
                "opening balance",
                &first.closing_balance.to_string(),
                "derived value exceeds the decimal range",
            );
        }
    }

    fn validate(&self, statement: &SavingsStatement, diagnostics: &mut Diagnostics) -> Result<()> {
        validate_statement(
            self.options.policy,
            &[
                RequiredField::new("account number", &statement.account_number),
                RequiredField::new("statement period start", &statement.from_date),
                RequiredField::new("statement period end", &statement.to_date),
            ],
            statement.transactions.len(),
            diagnostics,
        )
    }

    fn into_document(&self, statement: SavingsStatement) -> StatementDocument {
        StatementDocument::Savings(statement)
    }
}
