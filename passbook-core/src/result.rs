//! Parse results handed back to callers.

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;
use crate::statement::StatementDocument;

/// Either a validated document or a single human-readable failure message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum ParseResult {
    Success(StatementDocument),
    Failure(String),
}

impl ParseResult {
    pub fn failure(message: impl Into<String>) -> Self {
        ParseResult::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success(_))
    }

    pub fn document(&self) -> Option<&StatementDocument> {
        match self {
            ParseResult::Success(doc) => Some(doc),
            ParseResult::Failure(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ParseResult::Success(_) => None,
            ParseResult::Failure(msg) => Some(msg),
        }
    }
}

/// Result of one `parse` call together with the diagnostics it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseOutcome {
    pub result: ParseResult,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }

    pub fn document(&self) -> Option<&StatementDocument> {
        self.result.document()
    }

    pub fn into_document(self) -> Option<StatementDocument> {
        match self.result {
            ParseResult::Success(doc) => Some(doc),
            ParseResult::Failure(_) => None,
        }
    }
}
