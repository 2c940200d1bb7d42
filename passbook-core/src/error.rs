//! Error types for statement parsing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Amount token is not a (grouped) decimal number.
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    /// Date token has an unknown shape or names an impossible calendar date.
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    /// Input text was empty or whitespace-only.
    #[error("Empty text")]
    EmptyText,

    /// Assembled statement was rejected by the validation policy.
    #[error("Statement validation failed: {0}")]
    Validation(String),
}
