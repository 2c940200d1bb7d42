//! Acceptance policy for assembled statements.

use passbook_core::{Diagnostics, ParseError, Result};
use serde::{Deserialize, Serialize};

/// How strict a parser is about header metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPolicy {
    /// At least one transaction; missing header fields are warnings.
    #[default]
    TransactionsOnly,
    /// At least one transaction and every required header field.
    RequireMetadata,
}

/// A header field the policy cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField {
    pub name: &'static str,
    pub present: bool,
}

impl RequiredField {
    pub fn new<T>(name: &'static str, value: &Option<T>) -> Self {
        Self {
            name,
            present: value.is_some(),
        }
    }
}

/// Apply `policy` to a statement summarized by its required fields and
/// transaction count.
pub fn validate_statement(
    policy: ValidationPolicy,
    required: &[RequiredField],
    transaction_count: usize,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|f| !f.present)
        .map(|f| f.name)
        .collect();

    let mut failures = Vec::new();
    if transaction_count == 0 {
        failures.push("no transactions found".to_string());
    }

    match policy {
        ValidationPolicy::RequireMetadata => {
            failures.extend(missing.iter().map(|name| format!("missing {name}")));
        }
        ValidationPolicy::TransactionsOnly => {
            for name in &missing {
                diagnostics.missing_field(name);
            }
        }
    }

    log::debug!(
        "validation ({policy:?}): {transaction_count} transactions, missing fields: {missing:?}"
    );

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ParseError::Validation(failures.join(", ")))
    }
}
