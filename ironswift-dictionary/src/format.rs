/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Semantic value formats.
//!
//! A character-class rule says `6!n`; a value format additionally says the six
//! digits are a `YYMMDD` date. Formats are attached to component descriptors
//! and checked after the class rule.

use chrono::{NaiveDate, NaiveTime};
use ironswift_core::error::Violation;
use ironswift_core::types::DecimalMark;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Semantic format of a component value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueFormat {
    /// `YYMMDD` date.
    Date6,
    /// `YYYYMMDD` date.
    Date8,
    /// `HHMM` time.
    Time4,
    /// `HHMMSS` time.
    Time6,
    /// ISO 4217 style currency code, three upper-case letters.
    Currency,
    /// Amount with a decimal mark.
    Amount,
    /// Business identifier code, 8 or 11 characters.
    Bic,
    /// Debit/credit mark, `D` or `C`.
    DebitCredit,
}

impl ValueFormat {
    /// Checks a value against the format.
    ///
    /// # Errors
    /// Returns `Violation::Format` describing the mismatch.
    pub fn check(self, value: &str, mark: DecimalMark) -> Result<(), Violation> {
        let ok = match self {
            Self::Date6 | Self::Date8 => parse_date(self, value).is_some(),
            Self::Time4 | Self::Time6 => parse_time(self, value).is_some(),
            Self::Currency => value.len() == 3 && value.bytes().all(|b| b.is_ascii_uppercase()),
            Self::Amount => parse_amount(value, mark).is_some(),
            Self::Bic => is_bic(value),
            Self::DebitCredit => matches!(value, "D" | "C"),
        };
        if ok {
            Ok(())
        } else {
            Err(Violation::Format {
                reason: format!("{value:?} is not a valid {}", self.name()),
            })
        }
    }

    /// Returns a human readable format name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Date6 => "YYMMDD date",
            Self::Date8 => "YYYYMMDD date",
            Self::Time4 => "HHMM time",
            Self::Time6 => "HHMMSS time",
            Self::Currency => "currency code",
            Self::Amount => "amount",
            Self::Bic => "BIC",
            Self::DebitCredit => "debit/credit mark",
        }
    }
}

/// Parses a date in the given format.
///
/// Returns `None` for formats that are not dates or for invalid dates.
#[must_use]
pub fn parse_date(format: ValueFormat, value: &str) -> Option<NaiveDate> {
    let pattern = match format {
        ValueFormat::Date6 => "%y%m%d",
        ValueFormat::Date8 => "%Y%m%d",
        _ => return None,
    };
    if !all_digits(value, if format == ValueFormat::Date6 { 6 } else { 8 }) {
        return None;
    }
    NaiveDate::parse_from_str(value, pattern).ok()
}

/// Parses a time in the given format.
///
/// Returns `None` for formats that are not times or for invalid times.
#[must_use]
pub fn parse_time(format: ValueFormat, value: &str) -> Option<NaiveTime> {
    let (pattern, width) = match format {
        ValueFormat::Time4 => ("%H%M", 4),
        ValueFormat::Time6 => ("%H%M%S", 6),
        _ => return None,
    };
    if !all_digits(value, width) {
        return None;
    }
    NaiveTime::parse_from_str(value, pattern).ok()
}

/// Parses an amount written with the given decimal mark.
///
/// A trailing mark with no fraction (`"100,"`) is accepted.
#[must_use]
pub fn parse_amount(value: &str, mark: DecimalMark) -> Option<Decimal> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || mark.accepts(c)) {
        return None;
    }
    let normalized = mark.normalize(value);
    let trimmed = normalized.strip_suffix('.').unwrap_or(&normalized);
    if trimmed.is_empty() || trimmed.starts_with('.') {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

fn all_digits(value: &str, width: usize) -> bool {
    value.len() == width && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_bic(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 8 && bytes.len() != 11 {
        return false;
    }
    let upper_alnum = |b: &u8| b.is_ascii_uppercase() || b.is_ascii_digit();
    bytes[..6].iter().all(u8::is_ascii_uppercase) && bytes[6..].iter().all(upper_alnum)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMA: DecimalMark = DecimalMark::Comma;

    #[test]
    fn test_dates() {
        assert_eq!(
            parse_date(ValueFormat::Date6, "090115"),
            NaiveDate::from_ymd_opt(2009, 1, 15)
        );
        assert_eq!(
            parse_date(ValueFormat::Date8, "20240229"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(parse_date(ValueFormat::Date8, "20230229").is_none());
        assert!(parse_date(ValueFormat::Date6, "9115").is_none());
        assert!(ValueFormat::Date6.check("091315", COMMA).is_err());
    }

    #[test]
    fn test_times() {
        assert_eq!(
            parse_time(ValueFormat::Time4, "0915"),
            NaiveTime::from_hms_opt(9, 15, 0)
        );
        assert!(parse_time(ValueFormat::Time6, "246000").is_none());
        assert!(ValueFormat::Time6.check("123000", COMMA).is_ok());
    }

    #[test]
    fn test_amounts() {
        assert_eq!(
            parse_amount("1234,56", COMMA),
            Some(Decimal::from_str("1234.56").unwrap())
        );
        assert_eq!(parse_amount("100,", COMMA), Some(Decimal::from(100)));
        assert!(parse_amount(",5", COMMA).is_none());
        assert!(parse_amount("12.5", COMMA).is_none());
        assert!(parse_amount("12.5", DecimalMark::Point).is_some());
        assert!(parse_amount("", COMMA).is_none());
    }

    #[test]
    fn test_bic() {
        assert!(ValueFormat::Bic.check("DEUTDEFF", COMMA).is_ok());
        assert!(ValueFormat::Bic.check("DEUTDEFF500", COMMA).is_ok());
        assert!(ValueFormat::Bic.check("DEUTDEF", COMMA).is_err());
        assert!(ValueFormat::Bic.check("DEU1DEFF", COMMA).is_err());
    }

    #[test]
    fn test_currency_and_mark() {
        assert!(ValueFormat::Currency.check("EUR", COMMA).is_ok());
        assert!(ValueFormat::Currency.check("eur", COMMA).is_err());
        assert!(ValueFormat::DebitCredit.check("D", COMMA).is_ok());
        assert!(ValueFormat::DebitCredit.check("X", COMMA).is_err());
    }
}
