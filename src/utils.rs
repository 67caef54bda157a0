// Utility functions
use chrono::{DateTime, NaiveDate};

/// Truncates a millisecond epoch timestamp to its UTC calendar date.
pub fn ms_to_utc_date(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}
