//! Timezone-naive parsing of the date strings carried by stored records.

use crate::error::CoreError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a record date into its wall-clock time.
///
/// Offsets are not applied: `2024-01-31T23:00:00+05:30` stays at 23:00 on the 31st.
/// Returns `None` for anything unparsable; callers decide whether that excludes
/// the record or lets it through.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0);
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(at);
        }
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.naive_local())
        .ok()
}

/// Parses a `YYYY-MM-DD` range boundary supplied by a caller.
pub fn parse_day(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CoreError::InvalidDate(raw.to_string()))
}

/// The `YYYY-MM` bucket a timestamp falls into.
pub fn month_key(at: &NaiveDateTime) -> String {
    at.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_plain_day_is_midnight() {
        let at = parse_timestamp("2024-03-05").unwrap();
        assert_eq!(at.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(at.hour(), 0);
    }

    #[test]
    fn test_parse_keeps_wall_clock_of_offsets() {
        let at = parse_timestamp("2024-01-31T23:00:00+05:30").unwrap();
        assert_eq!(at.hour(), 23);
        assert_eq!(at.date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());

        let at = parse_timestamp("2024-01-31T23:00:00.250Z").unwrap();
        assert_eq!(at.hour(), 23);
    }

    #[test]
    fn test_parse_local_date_times() {
        assert!(parse_timestamp("2024-01-31T23:00:00").is_some());
        assert!(parse_timestamp("2024-01-31 08:15").is_some());
        assert!(parse_timestamp("2024-01-31T08:15:30.123").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }

    #[test]
    fn test_parse_day_reports_bad_boundary() {
        assert!(parse_day("2024-01-01").is_ok());
        assert_eq!(
            parse_day("01/01/2024"),
            Err(CoreError::InvalidDate("01/01/2024".to_string()))
        );
    }

    #[test]
    fn test_month_key() {
        let at = parse_timestamp("2024-02-29T10:00:00").unwrap();
        assert_eq!(month_key(&at), "2024-02");
    }
}
