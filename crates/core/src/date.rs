//! Due date parsing.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::{InvalidDateReason, ValidationError};

/// Calendar format used for due dates, both on input and in stored records.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})$").expect("date pattern is valid")
    })
}

/// Parse a `YYYY-MM-DD` due date.
///
/// The failure carries which component was wrong so callers can produce a
/// specific message.
pub fn parse_due_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    let fail = |reason| ValidationError::InvalidDate {
        value: input.to_string(),
        reason,
    };

    let caps = date_pattern()
        .captures(trimmed)
        .ok_or_else(|| fail(InvalidDateReason::BadFormat))?;

    // The pattern guarantees at most four ASCII digits per field.
    let year: i32 = caps[1].parse().map_err(|_| fail(InvalidDateReason::BadYear))?;
    let month: u32 = caps[2].parse().map_err(|_| fail(InvalidDateReason::BadMonth))?;
    let day: u32 = caps[3].parse().map_err(|_| fail(InvalidDateReason::BadDay))?;

    if year < 1 {
        return Err(fail(InvalidDateReason::BadYear));
    }
    if !(1..=12).contains(&month) {
        return Err(fail(InvalidDateReason::BadMonth));
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| fail(InvalidDateReason::BadDay))
}

/// Render a due date in [`DATE_FORMAT`].
pub fn format_due_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(input: &str) -> InvalidDateReason {
        parse_due_date(input)
            .unwrap_err()
            .date_reason()
            .unwrap()
    }

    #[test]
    fn test_parse_valid_dates() {
        assert_eq!(
            parse_due_date("2024-01-10").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
        );
        assert_eq!(
            parse_due_date(" 2024-2-29 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_bad_day() {
        assert_eq!(reason("2024-02-30"), InvalidDateReason::BadDay);
        assert_eq!(reason("2023-02-29"), InvalidDateReason::BadDay);
        assert_eq!(reason("2024-04-31"), InvalidDateReason::BadDay);
        assert_eq!(reason("2024-01-00"), InvalidDateReason::BadDay);
    }

    #[test]
    fn test_bad_month() {
        assert_eq!(reason("2024-13-01"), InvalidDateReason::BadMonth);
        assert_eq!(reason("2024-00-10"), InvalidDateReason::BadMonth);
    }

    #[test]
    fn test_bad_year() {
        assert_eq!(reason("0000-05-01"), InvalidDateReason::BadYear);
    }

    #[test]
    fn test_bad_format() {
        for input in ["", "tomorrow", "2024/01/10", "24-01-10", "2024-01", "2024-001-10", "10-01-2024"] {
            assert_eq!(reason(input), InvalidDateReason::BadFormat, "input {input:?}");
        }
    }

    #[test]
    fn test_format_pads_fields() {
        let date = parse_due_date("2024-3-7").unwrap();
        assert_eq!(format_due_date(date), "2024-03-07");
    }
}
