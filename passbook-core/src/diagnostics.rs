//! Structured, non-fatal observations collected during one parse call.
//!
//! Every diagnostic is also mirrored to the `log` facade so operators can
//! follow a parse with `RUST_LOG=debug` without inspecting the outcome.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// A required metadata field is absent.
    MissingField { field: String },
    /// A metadata probe matched but the value would not parse.
    UnparseableField { field: String, value: String },
    /// No transaction-table start marker; the table region is empty.
    SectionStartMissing,
    /// Start marker found without an end marker; region runs to end of text.
    SectionEndMissing,
    /// A candidate transaction line was dropped.
    LineSkipped { line: String, reason: String },
    /// A `dd/mm` date was completed with the fallback year.
    FallbackYear { token: String, year: i32 },
    /// Both withdrawal and deposit columns carry a value.
    AmountColumns { line: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// Per-call diagnostics sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Info,
            kind,
            message,
        });
    }

    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            kind,
            message,
        });
    }

    pub fn missing_field(&mut self, field: &str) {
        self.warn(
            DiagnosticKind::MissingField {
                field: field.to_string(),
            },
            format!("{field} not found"),
        );
    }

    pub fn unparseable_field(&mut self, field: &str, value: &str, reason: impl std::fmt::Display) {
        self.warn(
            DiagnosticKind::UnparseableField {
                field: field.to_string(),
                value: value.to_string(),
            },
            format!("{field} {value:?} could not be parsed: {reason}"),
        );
    }

    pub fn line_skipped(&mut self, line: &str, reason: impl std::fmt::Display) {
        let reason = reason.to_string();
        self.warn(
            DiagnosticKind::LineSkipped {
                line: line.to_string(),
                reason: reason.clone(),
            },
            format!("skipping malformed line {line:?}: {reason}"),
        );
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
