//! passbook-core: statement model types, money and date normalization.

pub mod dates;
pub mod diagnostics;
pub mod error;
pub mod money;
pub mod result;
pub mod statement;

pub use dates::{DEFAULT_FALLBACK_YEAR, DateResolver, ResolvedDate, YearSource, parse_full_date};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{ParseError, Result};
pub use money::{parse_money, split_credit_marker};
pub use result::{ParseOutcome, ParseResult};
pub use statement::{
    CardTransaction, CreditCardStatement, SavingsStatement, SavingsTransaction, StatementDocument,
    TransactionType,
};
