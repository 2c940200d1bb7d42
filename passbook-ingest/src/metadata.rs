//! Single-pattern header field probes.
//!
//! Each probe runs one pattern over the full statement text and yields the
//! first capture group, or nothing. Probes are independent: a miss or a bad
//! value never stops the probes after it.

use chrono::NaiveDate;
use passbook_core::{Diagnostics, parse_full_date, parse_money};
use regex::Regex;
use rust_decimal::Decimal;

/// First capture group of `pattern` in `text`, trimmed.
pub fn capture<'t>(pattern: &Regex, text: &'t str) -> Option<&'t str> {
    let value = pattern.captures(text)?.get(1)?.as_str().trim();
    (!value.is_empty()).then_some(value)
}

pub fn probe_text(pattern: &Regex, text: &str, field: &str) -> Option<String> {
    let found = capture(pattern, text).map(str::to_string);
    trace_probe(field, found.as_deref());
    found
}

/// Like [`probe_text`] with all whitespace removed (card and account numbers).
pub fn probe_compact(pattern: &Regex, text: &str, field: &str) -> Option<String> {
    let found = capture(pattern, text).map(|v| v.split_whitespace().collect::<String>());
    trace_probe(field, found.as_deref());
    found
}

pub fn probe_date(
    pattern: &Regex,
    text: &str,
    field: &str,
    diagnostics: &mut Diagnostics,
) -> Option<NaiveDate> {
    let raw = capture(pattern, text);
    trace_probe(field, raw);
    parse_date_value(raw?, field, diagnostics)
}

pub fn probe_money(
    pattern: &Regex,
    text: &str,
    field: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Decimal> {
    let raw = capture(pattern, text);
    trace_probe(field, raw);
    let raw = raw?;
    match parse_money(raw) {
        Ok(v) => Some(v),
        Err(e) => {
            diagnostics.unparseable_field(field, raw, e);
            None
        }
    }
}

/// Parse an already-captured `dd/mm/yyyy` header value.
pub fn parse_date_value(raw: &str, field: &str, diagnostics: &mut Diagnostics) -> Option<NaiveDate> {
    match parse_full_date(raw) {
        Ok(d) => Some(d),
        Err(e) => {
            diagnostics.unparseable_field(field, raw, e);
            None
        }
    }
}

fn trace_probe(field: &str, value: Option<&str>) {
    match value {
        Some(v) => log::debug!("found {field}: {v}"),
        None => log::debug!("{field} not found"),
    }
}
