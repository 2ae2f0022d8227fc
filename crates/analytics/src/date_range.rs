use crate::error::AnalyticsError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use core_types::dates::{parse_day, parse_timestamp};
use core_types::{ExpenseRecord, Order};

/// An inclusive window from the start of `start` to the last millisecond of `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end
                .and_hms_milli_opt(23, 59, 59, 999)
                .unwrap_or_else(|| end.and_time(NaiveTime::MIN)),
        }
    }

    /// Like `new`, but rejects a window that ends before it starts.
    pub fn checked(start: NaiveDate, end: NaiveDate) -> Result<Self, AnalyticsError> {
        if start > end {
            return Err(AnalyticsError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self::new(start, end))
    }

    /// Validates `YYYY-MM-DD` boundaries supplied by a caller.
    pub fn parse(start: &str, end: &str) -> Result<Self, AnalyticsError> {
        Self::checked(parse_day(start)?, parse_day(end)?)
    }

    /// Builds a range only when both boundaries are present.
    pub fn from_bounds(
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Option<Self>, AnalyticsError> {
        match (start, end) {
            (Some(start), Some(end)) => Self::parse(start, end).map(Some),
            _ => Ok(None),
        }
    }

    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        self.start <= *at && *at <= self.end
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Records that carry the date used for range filtering.
pub trait Dated {
    fn date_str(&self) -> Option<&str>;
}

impl Dated for Order {
    fn date_str(&self) -> Option<&str> {
        self.placed_on()
    }
}

impl Dated for ExpenseRecord {
    fn date_str(&self) -> Option<&str> {
        self.date.as_deref()
    }
}

/// Keeps the records whose date, read through `date_of`, falls inside
/// `[start 00:00:00.000, end 23:59:59.999]`.
///
/// Without both boundaries every record passes, dated or not. With them, records
/// whose date is missing or unparsable are dropped, and an unparsable boundary
/// matches nothing.
pub fn filter_by_date_range<T, F>(
    records: &[T],
    date_of: F,
    start: Option<&str>,
    end: Option<&str>,
) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<&str>,
{
    let (Some(start), Some(end)) = (start, end) else {
        return records.to_vec();
    };
    let (Ok(start), Ok(end)) = (parse_day(start), parse_day(end)) else {
        tracing::warn!("Unparsable date range boundary; no records match.");
        return Vec::new();
    };

    let range = DateRange::new(start, end);
    records
        .iter()
        .filter(|record| {
            date_of(*record)
                .and_then(parse_timestamp)
                .is_some_and(|at| range.contains(&at))
        })
        .cloned()
        .collect()
}

/// Range filtering for the record types that know their own date.
pub fn filter_dated<T>(records: &[T], range: Option<&DateRange>) -> Vec<T>
where
    T: Dated + Clone,
{
    let Some(range) = range else {
        return records.to_vec();
    };

    records
        .iter()
        .filter(|record| {
            record
                .date_str()
                .and_then(parse_timestamp)
                .is_some_and(|at| range.contains(&at))
        })
        .cloned()
        .collect()
}
