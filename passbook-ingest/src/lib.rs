//! passbook-ingest: statement text heuristics and bank-specific parsers.

pub mod detect;
pub mod metadata;
pub mod normalize;
pub mod parsers;
pub mod reference;
pub mod section;
pub mod types;
pub mod validate;

pub use detect::detect_kind;
pub use parsers::{
    ParseSettings, ParserOptions, StatementParser, hdfc_credit_card::HdfcCreditCardParser,
    hdfc_savings::HdfcSavingsParser, parse_auto, parse_text,
};
pub use types::StatementKind;
pub use validate::ValidationPolicy;
