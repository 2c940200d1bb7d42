//! Locating the transaction table inside free-form statement text.

use std::ops::Range;

use passbook_core::{DiagnosticKind, Diagnostics};
use regex::Regex;

/// Byte range of the table region and whether an end marker closed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionBounds {
    pub range: Range<usize>,
    pub end_found: bool,
}

/// Find the region starting at the first `start` match and ending at the
/// first `end` match after it (or at end of text).
///
/// Returns `None` when no start marker is present.
pub fn locate_section(text: &str, start: &Regex, end: &Regex) -> Option<SectionBounds> {
    let start_match = start.find(text)?;
    let begin = start_match.start();

    match end.find_at(text, start_match.end()) {
        Some(m) => Some(SectionBounds {
            range: begin..m.start(),
            end_found: true,
        }),
        None => Some(SectionBounds {
            range: begin..text.len(),
            end_found: false,
        }),
    }
}

/// Slice out the table region, recording diagnostics for missing markers.
///
/// A missing start marker yields an empty region; the validator turns the
/// resulting zero transactions into a failure.
pub fn section_text<'t>(
    text: &'t str,
    start: &Regex,
    end: &Regex,
    diagnostics: &mut Diagnostics,
) -> &'t str {
    match locate_section(text, start, end) {
        None => {
            diagnostics.warn(
                DiagnosticKind::SectionStartMissing,
                "transaction section start marker not found",
            );
            ""
        }
        Some(bounds) => {
            if !bounds.end_found {
                diagnostics.info(
                    DiagnosticKind::SectionEndMissing,
                    "transaction section end marker not found; reading to end of text",
                );
            }
            log::debug!(
                "transaction section at {}..{} ({} chars)",
                bounds.range.start,
                bounds.range.end,
                bounds.range.len()
            );
            &text[bounds.range]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> (Regex, Regex) {
        (
            Regex::new(r"(?m)^[ \t]*Domestic[ \t]+Transactions").unwrap(),
            Regex::new(r"(?i)important[ \t]+information").unwrap(),
        )
    }

    #[test]
    fn test_bounded_region() {
        let (start, end) = markers();
        let text = "header\nDomestic Transactions\nrow 1\nImportant Information\nfooter";
        let bounds = locate_section(text, &start, &end).unwrap();
        assert_eq!(&text[bounds.range.clone()], "Domestic Transactions\nrow 1\n");
        assert!(bounds.end_found);
    }

    #[test]
    fn test_missing_end_runs_to_end_of_text() {
        let (start, end) = markers();
        let text = "header\nDomestic Transactions\nrow 1\nrow 2";
        let s = text.find("Domestic").unwrap();

        let mut diags = Diagnostics::new();
        assert_eq!(section_text(text, &start, &end, &mut diags), &text[s..]);
        let kinds: Vec<_> = diags.iter().map(|d| d.kind.clone()).collect();
        assert_eq!(kinds, vec![DiagnosticKind::SectionEndMissing]);
    }

    #[test]
    fn test_missing_start_is_empty() {
        let (start, end) = markers();
        let mut diags = Diagnostics::new();
        assert!(locate_section("no table here", &start, &end).is_none());
        assert_eq!(section_text("no table here", &start, &end, &mut diags), "");
        assert_eq!(diags.warnings().count(), 1);
    }

    #[test]
    fn test_end_marker_before_start_is_ignored() {
        let (start, end) = markers();
        let text = "Important Information\nDomestic Transactions\nrow";
        let bounds = locate_section(text, &start, &end).unwrap();
        assert_eq!(&text[bounds.range], "Domestic Transactions\nrow");
    }
}
