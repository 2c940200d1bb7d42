//! Money normalization for statement amounts.
//!
//! Statement PDFs print amounts with grouping commas (`1,299.00`, lakh-style
//! `1,00,000.00`) and card statements append a credit marker (`500.00 Cr`).
//! Everything here returns a non-negative magnitude; deciding debit/credit is
//! left to the caller.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{ParseError, Result};

/// Split a trailing credit marker (`Cr` or `C`, any case) off an amount token.
///
/// Returns the remaining amount text and whether a marker was present.
pub fn split_credit_marker(token: &str) -> (&str, bool) {
    let t = token.trim();
    let lower = t.to_ascii_lowercase();
    if lower.ends_with("cr") {
        (t[..t.len() - 2].trim_end(), true)
    } else if lower.ends_with('c') {
        (t[..t.len() - 1].trim_end(), true)
    } else {
        (t, false)
    }
}

/// Parse a locale-formatted amount into an exact decimal magnitude.
///
/// Blank input is zero. Grouping commas, embedded whitespace and a trailing
/// credit marker are dropped before parsing.
pub fn parse_money(token: &str) -> Result<Decimal> {
    if token.trim().is_empty() {
        return Ok(Decimal::ZERO);
    }

    let (amount, _) = split_credit_marker(token);
    let cleaned: String = amount
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    // "150." is how some extractors render a dropped fraction
    let digits = cleaned.strip_suffix('.').unwrap_or(&cleaned);

    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
        && digits.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(ParseError::InvalidAmount(token.to_string()));
    }

    let digits = if digits.starts_with('.') {
        format!("0{digits}")
    } else {
        digits.to_string()
    };

    Decimal::from_str(&digits).map_err(|_| ParseError::InvalidAmount(token.to_string()))
}
