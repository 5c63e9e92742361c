use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::summary::SummaryError;

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, SummaryError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| SummaryError::InvalidDate(format!("{:?}: {}", input, e)))
}

/// UTC bounds covering every hour of `start` through `end`:
/// `[start 00:00:00, end 23:59:59]`.
pub fn day_bounds(start: NaiveDate, end: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    (
        start.and_time(NaiveTime::MIN).and_utc(),
        end.and_time(last_second).and_utc(),
    )
}
