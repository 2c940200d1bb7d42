use anyhow::{Context, Result};
use chrono::NaiveDate;
use passbook_core::{Diagnostic, Severity, StatementDocument, TransactionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// Flat transaction row shared by both statement kinds. Columns that do not
/// apply to a kind stay empty.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    date: NaiveDate,
    description: &'a str,
    reference_number: Option<&'a str>,
    #[serde(rename = "type")]
    kind: TransactionType,
    amount: Option<Decimal>,
    withdrawal_amount: Option<Decimal>,
    deposit_amount: Option<Decimal>,
    closing_balance: Option<Decimal>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    document: &'a StatementDocument,
    diagnostics: &'a [Diagnostic],
}

pub fn write_json<W: Write>(
    out: W,
    doc: &StatementDocument,
    diagnostics: Option<&[Diagnostic]>,
) -> Result<()> {
    let written = match diagnostics {
        Some(diagnostics) => serde_json::to_writer_pretty(out, &JsonReport { document: doc, diagnostics }),
        None => serde_json::to_writer_pretty(out, doc),
    };
    written.context("serialize statement as JSON")
}

pub fn write_csv<W: Write>(out: W, doc: &StatementDocument) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    match doc {
        StatementDocument::CreditCard(stmt) => {
            for t in &stmt.transactions {
                wtr.serialize(CsvRow {
                    date: t.date,
                    description: &t.description,
                    reference_number: t.reference_number.as_deref(),
                    kind: t.kind,
                    amount: Some(t.amount),
                    withdrawal_amount: None,
                    deposit_amount: None,
                    closing_balance: None,
                })?;
            }
        }
        StatementDocument::Savings(stmt) => {
            for t in &stmt.transactions {
                wtr.serialize(CsvRow {
                    date: t.date,
                    description: &t.description,
                    reference_number: t.reference_number.as_deref(),
                    kind: t.kind(),
                    amount: None,
                    withdrawal_amount: Some(t.withdrawal_amount),
                    deposit_amount: Some(t.deposit_amount),
                    closing_balance: Some(t.closing_balance),
                })?;
            }
        }
    }

    wtr.flush().context("flush CSV output")?;
    Ok(())
}

/// One line per diagnostic, for stderr.
pub fn format_diagnostic(d: &Diagnostic) -> String {
    let level = match d.severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
    };
    format!("{level}: {}", d.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use passbook_core::{CardTransaction, CreditCardStatement, SavingsStatement, SavingsTransaction};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn card_doc() -> StatementDocument {
        StatementDocument::CreditCard(CreditCardStatement {
            transactions: vec![CardTransaction {
                date: NaiveDate::from_ymd_opt(2023, 8, 15).unwrap(),
                description: "AMAZONIN GURGAON".to_string(),
                amount: dec("1299.00"),
                kind: TransactionType::Debit,
                reference_number: None,
            }],
            ..Default::default()
        })
    }

    #[test]
    fn test_card_csv() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &card_doc()).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "date,description,reference_number,type,amount,withdrawal_amount,deposit_amount,closing_balance\n\
             2023-08-15,AMAZONIN GURGAON,,DEBIT,1299.00,,,\n"
        );
    }

    #[test]
    fn test_savings_csv() {
        let doc = StatementDocument::Savings(SavingsStatement {
            transactions: vec![SavingsTransaction {
                date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
                description: "UPI-WALMART-PAY".to_string(),
                reference_number: Some("123456".to_string()),
                withdrawal_amount: dec("500.00"),
                deposit_amount: dec("0.00"),
                closing_balance: dec("9500.00"),
            }],
            ..Default::default()
        });
        let mut buf = Vec::new();
        write_csv(&mut buf, &doc).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out.lines().nth(1),
            Some("2023-01-02,UPI-WALMART-PAY,123456,DEBIT,,500.00,0.00,9500.00")
        );
    }

    #[test]
    fn test_json_with_and_without_diagnostics() {
        let doc = card_doc();

        let mut buf = Vec::new();
        write_json(&mut buf, &doc, None).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["kind"], "credit-card");

        let diagnostics: Vec<Diagnostic> = Vec::new();
        let mut buf = Vec::new();
        write_json(&mut buf, &doc, Some(diagnostics.as_slice())).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["document"]["transactions"][0]["amount"], "1299.00");
        assert_eq!(v["diagnostics"], serde_json::json!([]));
    }
}
