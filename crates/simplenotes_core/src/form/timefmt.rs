//! Fixed date/time patterns and parsing helpers for note forms.
//!
//! # Responsibility
//! - Parse the date-only and time-only form fields.
//! - Combine both halves into one UTC instant.
//!
//! # Invariants
//! - All functions are side-effect free.
//! - An empty time string parses as the literal default `12:00 AM`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, ParseError, Utc};

/// Date-only pattern: month name, space-padded day, year ("January  2, 2006").
///
/// Parsing accepts abbreviated month names ("Jan 2, 2006") as well.
pub const NOTE_DATE_FORMAT: &str = "%B %e, %Y";

/// Time-only pattern: 12-hour clock with AM/PM ("3:04 PM").
pub const NOTE_TIME_FORMAT: &str = "%-I:%M %p";

/// Literal substituted for an empty time field before parsing.
const DEFAULT_TIME: &str = "12:00 AM";

/// Parses a calendar date written in `NOTE_DATE_FORMAT`.
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(text, NOTE_DATE_FORMAT)
}

/// Parses a time of day written in `NOTE_TIME_FORMAT`.
///
/// The empty string is treated as `12:00 AM` (midnight) before parsing.
pub fn parse_time(text: &str) -> Result<NaiveTime, ParseError> {
    let text = if text.is_empty() { DEFAULT_TIME } else { text };
    NaiveTime::parse_from_str(text, NOTE_TIME_FORMAT)
}

/// Combines a parsed date and time of day into one UTC instant.
///
/// The combination is interpreted directly in UTC; any time zone carried by
/// the original input is dropped.
pub fn combine(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    NaiveDateTime::new(date, time).and_utc()
}

#[cfg(test)]
mod tests {
    use super::{combine, parse_date, parse_time};
    use chrono::{Datelike, Timelike};

    #[test]
    fn parse_date_accepts_full_and_abbreviated_month_names() {
        let full = parse_date("January 2, 2006").unwrap();
        let short = parse_date("Jan 2, 2006").unwrap();
        assert_eq!(full, short);
        assert_eq!((full.year(), full.month(), full.day()), (2006, 1, 2));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn parse_time_defaults_empty_input_to_midnight() {
        let midnight = parse_time("").unwrap();
        assert_eq!((midnight.hour(), midnight.minute()), (0, 0));
    }

    #[test]
    fn parse_time_reads_twelve_hour_clock() {
        let afternoon = parse_time("3:04 PM").unwrap();
        assert_eq!((afternoon.hour(), afternoon.minute()), (15, 4));
        assert!(parse_time("not-a-time").is_err());
    }

    #[test]
    fn combine_produces_utc_instant() {
        let instant = combine(parse_date("Jan 1, 2024").unwrap(), parse_time("3:00 PM").unwrap());
        assert_eq!(instant.to_rfc3339(), "2024-01-01T15:00:00+00:00");
    }
}
