//! Transaction date disambiguation.
//!
//! Statement rows print dates in several shapes:
//!   15/08/2023   complete
//!   01/01/23     complete, two-digit year (savings layout)
//!   18/06        day + month, year taken from the statement
//!   6/2025       month + year, trailing-period notation
//!
//! Partial dates are completed from a context date (usually the statement
//! date). Without context the resolver falls back to a fixed year.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};

/// Year used for `dd/mm` tokens when the statement carries no usable date.
///
/// Parsing never reads the wall clock, so the same text always resolves to
/// the same dates. Callers that know better should set
/// [`DateResolver::fallback_year`]; each use is reported as a diagnostic.
pub const DEFAULT_FALLBACK_YEAR: i32 = 2023;

/// Where the year of a resolved date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearSource {
    /// The token carried its own year.
    Explicit,
    /// Borrowed from the context date.
    Context,
    /// No context; the fallback year was used.
    Fallback,
    /// `m/yyyy` token expanded to the first of the month.
    MonthStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub year_source: YearSource,
}

/// Resolves date tokens against an optional context date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateResolver {
    pub context: Option<NaiveDate>,
    pub fallback_year: i32,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self {
            context: None,
            fallback_year: DEFAULT_FALLBACK_YEAR,
        }
    }
}

impl DateResolver {
    pub fn new(context: Option<NaiveDate>, fallback_year: i32) -> Self {
        Self {
            context,
            fallback_year,
        }
    }

    /// Resolve `token` into a calendar date.
    pub fn resolve(&self, token: &str) -> Result<ResolvedDate> {
        use chrono::Datelike;

        let token = token.trim();
        let invalid = || ParseError::InvalidDate(token.to_string());

        let parts: Vec<&str> = token.split('/').collect();
        if parts.iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit())) {
            return Err(invalid());
        }

        match parts.as_slice() {
            [day, month, year] => {
                let year = match year.len() {
                    4 => year.parse::<i32>().map_err(|_| invalid())?,
                    2 => 2000 + year.parse::<i32>().map_err(|_| invalid())?,
                    _ => return Err(invalid()),
                };
                let date = ymd(year, month, day).ok_or_else(invalid)?;
                Ok(ResolvedDate {
                    date,
                    year_source: YearSource::Explicit,
                })
            }
            [month, year] if year.len() == 4 => {
                let year = year.parse::<i32>().map_err(|_| invalid())?;
                let date = ymd(year, month, "1").ok_or_else(invalid)?;
                Ok(ResolvedDate {
                    date,
                    year_source: YearSource::MonthStart,
                })
            }
            [day, month] => {
                let (year, year_source) = match self.context {
                    Some(ctx) => (ctx.year(), YearSource::Context),
                    None => (self.fallback_year, YearSource::Fallback),
                };
                let date = ymd(year, month, day).ok_or_else(invalid)?;
                Ok(ResolvedDate { date, year_source })
            }
            _ => Err(invalid()),
        }
    }
}

fn ymd(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    let m: u32 = month.parse().ok()?;
    let d: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, m, d)
}

/// Parse a complete `dd/mm/yyyy` (or `dd/mm/yy`) header date.
pub fn parse_full_date(token: &str) -> Result<NaiveDate> {
    let resolved = DateResolver::default().resolve(token)?;
    match resolved.year_source {
        YearSource::Explicit => Ok(resolved.date),
        _ => Err(ParseError::InvalidDate(token.trim().to_string())),
    }
}
