//! Date grammar and age arithmetic

use chrono::NaiveDate;

use crate::error::{GedcomError, Result};

/// `D MON YYYY`, e.g. `6 MAY 1952`
pub const DATE_FORMAT: &str = "%d %b %Y";

/// Mean Gregorian year length used for ages
pub const DAYS_IN_YEAR: f64 = 365.2425;

/// Parse a `DATE` argument
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| GedcomError::DateFormat {
        value: value.to_string(),
        source,
    })
}

/// Whole years elapsed from `from` to `to`, truncated toward zero
pub fn age_in_years(from: NaiveDate, to: NaiveDate) -> i64 {
    let days = (to - from).num_days() as f64;
    (days / DAYS_IN_YEAR).trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_gedcom_dates() {
        assert_eq!(parse_date("6 MAY 1952").unwrap(), ymd(1952, 5, 6));
        assert_eq!(parse_date("26 APR 1992").unwrap(), ymd(1992, 4, 26));
        assert_eq!(parse_date("15 Jun 1970").unwrap(), ymd(1970, 6, 15));
    }

    #[test]
    fn test_reject_non_conforming_dates() {
        for bad in ["1952-05-06", "ABT 1900", "MAY 1952", "31 FEB 1952", ""] {
            assert!(
                matches!(parse_date(bad), Err(GedcomError::DateFormat { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_age_truncates() {
        assert_eq!(age_in_years(ymd(1987, 8, 17), ymd(2017, 8, 16)), 29);
        assert_eq!(age_in_years(ymd(1987, 8, 17), ymd(2017, 8, 18)), 30);
    }

    #[test]
    fn test_age_truncates_toward_zero_when_negative() {
        assert_eq!(age_in_years(ymd(2000, 1, 1), ymd(1999, 6, 1)), 0);
        assert_eq!(age_in_years(ymd(2000, 1, 1), ymd(1998, 6, 1)), -1);
    }
}
