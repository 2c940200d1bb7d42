//! Statement parsers, one per statement layout.
//!
//! Every parser runs the same pipeline: normalize text, probe header fields,
//! cut out the transaction table, parse each table row, validate. Layouts
//! differ only in the steps they override.

pub mod hdfc_credit_card;
pub mod hdfc_savings;

use passbook_core::{
    DEFAULT_FALLBACK_YEAR, DiagnosticKind, Diagnostics, ParseError, ParseOutcome, ParseResult,
    ResolvedDate, Result, StatementDocument, YearSource,
};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::detect::detect_kind;
use crate::normalize::normalize_text;
use crate::types::StatementKind;
use crate::validate::ValidationPolicy;

/// Per-parser knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Year for `dd/mm` rows when the statement date is unknown.
    pub fallback_year: i32,
    pub policy: ValidationPolicy,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            fallback_year: DEFAULT_FALLBACK_YEAR,
            policy: ValidationPolicy::TransactionsOnly,
        }
    }
}

/// Options for every parser, keyed by statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSettings {
    pub fallback_year: i32,
    pub credit_card: ValidationPolicy,
    pub savings: ValidationPolicy,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            fallback_year: DEFAULT_FALLBACK_YEAR,
            credit_card: ValidationPolicy::TransactionsOnly,
            savings: ValidationPolicy::TransactionsOnly,
        }
    }
}

impl ParseSettings {
    pub fn options_for(&self, kind: StatementKind) -> ParserOptions {
        let policy = match kind {
            StatementKind::CreditCard => self.credit_card,
            StatementKind::Savings => self.savings,
        };
        ParserOptions {
            fallback_year: self.fallback_year,
            policy,
        }
    }
}

/// Capability set of a statement layout.
///
/// Implementors provide the layout-specific steps; [`StatementParser::parse`]
/// drives them and never fails past its return value.
pub trait StatementParser: Send + Sync {
    type Statement: Default;
    type Transaction;

    fn kind(&self) -> StatementKind;

    /// Fill header fields from the full text.
    fn extract_metadata(&self, text: &str, statement: &mut Self::Statement, diagnostics: &mut Diagnostics);

    /// Region of `text` holding the transaction table. Layouts without
    /// reliable markers offer the whole text.
    fn locate_section<'t>(&self, text: &'t str, _diagnostics: &mut Diagnostics) -> &'t str {
        text
    }

    /// Pattern matching one transaction row.
    fn line_pattern(&self) -> &Regex;

    /// Turn one matched row into a transaction. `statement` carries the
    /// header fields already extracted (date context).
    fn parse_transaction_line(
        &self,
        caps: &Captures<'_>,
        statement: &Self::Statement,
        diagnostics: &mut Diagnostics,
    ) -> Result<Self::Transaction>;

    fn push_transaction(&self, statement: &mut Self::Statement, transaction: Self::Transaction);

    /// Derive statement-level values once all rows are in.
    fn finish(&self, _statement: &mut Self::Statement, _diagnostics: &mut Diagnostics) {}

    fn validate(&self, statement: &Self::Statement, diagnostics: &mut Diagnostics) -> Result<()>;

    fn into_document(&self, statement: Self::Statement) -> StatementDocument;

    fn parse(&self, raw: &str) -> ParseOutcome {
        let mut diagnostics = Diagnostics::new();

        if raw.trim().is_empty() {
            log::warn!("received empty text");
            return ParseOutcome {
                result: ParseResult::failure(ParseError::EmptyText.to_string()),
                diagnostics: diagnostics.into_vec(),
            };
        }

        let text = normalize_text(raw);
        log::debug!("parsing {} statement ({} chars)", self.kind(), text.len());

        let mut statement: Self::Statement = Default::default();
        self.extract_metadata(&text, &mut statement, &mut diagnostics);

        let section = self.locate_section(&text, &mut diagnostics);
        for caps in self.line_pattern().captures_iter(section) {
            let line = caps.get(0).map_or("", |m| m.as_str().trim());
            match self.parse_transaction_line(&caps, &statement, &mut diagnostics) {
                Ok(txn) => self.push_transaction(&mut statement, txn),
                Err(e) => diagnostics.line_skipped(line, e),
            }
        }

        self.finish(&mut statement, &mut diagnostics);

        let result = match self.validate(&statement, &mut diagnostics) {
            Ok(()) => ParseResult::Success(self.into_document(statement)),
            Err(e) => {
                log::warn!("{} statement rejected: {e}", self.kind());
                ParseResult::Failure(e.to_string())
            }
        };

        ParseOutcome {
            result,
            diagnostics: diagnostics.into_vec(),
        }
    }
}

/// Record that a row date was completed with the fallback year.
pub(crate) fn note_fallback_year(token: &str, resolved: &ResolvedDate, diagnostics: &mut Diagnostics) {
    use chrono::Datelike;

    if resolved.year_source == YearSource::Fallback {
        let year = resolved.date.year();
        diagnostics.warn(
            DiagnosticKind::FallbackYear {
                token: token.to_string(),
                year,
            },
            format!("statement date unknown; {token:?} completed with fallback year {year}"),
        );
    }
}

/// Parse `text` as a statement of the given kind.
pub fn parse_text(kind: StatementKind, text: &str, settings: &ParseSettings) -> ParseOutcome {
    let options = settings.options_for(kind);
    match kind {
        StatementKind::CreditCard => hdfc_credit_card::HdfcCreditCardParser::new(options).parse(text),
        StatementKind::Savings => hdfc_savings::HdfcSavingsParser::new(options).parse(text),
    }
}

/// Detect the statement kind from its text, then parse it.
pub fn parse_auto(text: &str, settings: &ParseSettings) -> ParseOutcome {
    match detect_kind(text) {
        Some(kind) => parse_text(kind, text, settings),
        None if text.trim().is_empty() => ParseOutcome {
            result: ParseResult::failure(ParseError::EmptyText.to_string()),
            diagnostics: Vec::new(),
        },
        None => ParseOutcome {
            result: ParseResult::failure("Could not detect statement kind"),
            diagnostics: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_route_policy_by_kind() {
        let settings = ParseSettings {
            fallback_year: 2020,
            credit_card: ValidationPolicy::RequireMetadata,
            savings: ValidationPolicy::TransactionsOnly,
        };
        let cc = settings.options_for(StatementKind::CreditCard);
        assert_eq!(cc.policy, ValidationPolicy::RequireMetadata);
        assert_eq!(cc.fallback_year, 2020);
        assert_eq!(
            settings.options_for(StatementKind::Savings).policy,
            ValidationPolicy::TransactionsOnly
        );
    }

    #[test]
    fn test_parse_auto_rejects_unknown_text() {
        let outcome = parse_auto("hello world", &ParseSettings::default());
        assert_eq!(
            outcome.result,
            ParseResult::failure("Could not detect statement kind")
        );
        let outcome = parse_auto("  \n ", &ParseSettings::default());
        assert_eq!(outcome.result, ParseResult::failure("Empty text"));
    }
}
