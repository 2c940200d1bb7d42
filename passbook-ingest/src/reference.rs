//! Reference-number recovery from free-text descriptions.
//!
//! Narrations usually end with the cheque / UPI / reference code:
//!   UPI-WALMART-PAY 123456
//!   SALARY CREDIT REF-999
//! The last token is taken as the reference when it carries a digit and is
//! not one of the bank's operational keywords.

use once_cell::sync::Lazy;
use regex::Regex;

const KEYWORD_STOPLIST: &[&str] = &["BLOCK", "REV", "CWDR"];

static EXPLICIT_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Ref#[ \t]*([^)\n]+)\)").expect("explicit reference pattern"));

/// Split a trailing reference token off `description`.
///
/// Returns the (possibly shortened) description and the reference, if any.
/// Single-token descriptions are never split.
pub fn split_reference(description: &str) -> (String, Option<String>) {
    let description = description.trim();
    let Some((head, last)) = description.rsplit_once(char::is_whitespace) else {
        return (description.to_string(), None);
    };

    let has_digit = last.chars().any(|c| c.is_ascii_digit());
    let is_keyword = KEYWORD_STOPLIST
        .iter()
        .any(|k| k.eq_ignore_ascii_case(last));

    if has_digit && !is_keyword {
        (head.trim_end().to_string(), Some(last.to_string()))
    } else {
        (description.to_string(), None)
    }
}

/// Reference printed explicitly as `(Ref# 12345)` on card statements.
pub fn explicit_reference(description: &str) -> Option<String> {
    EXPLICIT_REF
        .captures(description)
        .map(|caps| caps[1].trim().to_string())
        .filter(|r| !r.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_trailing_token() {
        assert_eq!(
            split_reference("UPI-WALMART-PAY 123456"),
            ("UPI-WALMART-PAY".to_string(), Some("123456".to_string()))
        );
    }

    #[test]
    fn test_alphanumeric_trailing_token() {
        assert_eq!(
            split_reference("SALARY CREDIT REF-999"),
            ("SALARY CREDIT".to_string(), Some("REF-999".to_string()))
        );
    }

    #[test]
    fn test_no_digit_bearing_token() {
        assert_eq!(
            split_reference("SALARY CREDIT"),
            ("SALARY CREDIT".to_string(), None)
        );
    }

    #[test]
    fn test_single_token_is_kept() {
        assert_eq!(split_reference("NEFT12345"), ("NEFT12345".to_string(), None));
    }

    #[test]
    fn test_stoplisted_keywords_stay_in_description() {
        assert_eq!(split_reference("ATM CWDR"), ("ATM CWDR".to_string(), None));
        assert_eq!(split_reference("CARD rev"), ("CARD rev".to_string(), None));
    }

    #[test]
    fn test_explicit_reference() {
        assert_eq!(
            explicit_reference("EMI CONVERSION (Ref# ST231234567)"),
            Some("ST231234567".to_string())
        );
        assert_eq!(explicit_reference("COFFEE SHOP"), None);
        assert_eq!(explicit_reference("BROKEN (Ref# )"), None);
    }
}
