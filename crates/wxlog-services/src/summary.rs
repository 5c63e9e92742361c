//! Read-side summaries over stored readings, addressed by location name.

use thiserror::Error;
use wxlog_analytics::{daily_stats, weekly_high_low, DailyStat, HighLow};
use wxlog_store::{StoreError, WeatherStore};
use wxlog_weather::Reading;

use crate::dates::{day_bounds, parse_date};

/// Why a summary could not be produced.
///
/// Each variant has a stable machine-readable code, see [`SummaryError::reason_code`].
#[derive(Debug, Error)]
pub enum SummaryError {
    /// Carries the parse failure detail; `Display` stays generic.
    #[error("Invalid date format")]
    InvalidDate(String),

    #[error("Location '{0}' not found")]
    LocationNotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl SummaryError {
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::InvalidDate(_) => "invalid_date",
            Self::LocationNotFound(_) => "location_not_found",
            Self::Storage(_) => "storage",
        }
    }
}

fn readings_for(
    store: &WeatherStore,
    name: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<Reading>, SummaryError> {
    let start = parse_date(start_date)?;
    let end = parse_date(end_date)?;

    let location = store
        .get_location_by_name(name)?
        .ok_or_else(|| SummaryError::LocationNotFound(name.to_string()))?;

    let (from, to) = day_bounds(start, end);
    let readings = store.fetch_readings(location.id, from, to)?;
    tracing::debug!(
        "Loaded {} readings for {} between {} and {}",
        readings.len(),
        name,
        start,
        end
    );
    Ok(readings)
}

/// Per-day statistics for `name` over `[start_date, end_date]`.
pub fn daily_summary(
    store: &WeatherStore,
    name: &str,
    start_date: &str,
    end_date: &str,
) -> Result<Vec<DailyStat>, SummaryError> {
    let readings = readings_for(store, name, start_date, end_date)?;
    Ok(daily_stats(&readings))
}

pub fn weekly_high_low_summary(
    store: &WeatherStore,
    name: &str,
    start_date: &str,
    end_date: &str,
) -> Result<HighLow, SummaryError> {
    let readings = readings_for(store, name, start_date, end_date)?;
    Ok(weekly_high_low(&readings))
}

/// One-line rendering of [`weekly_high_low_summary`].
pub fn weekly_high_low_message(
    store: &WeatherStore,
    name: &str,
    start_date: &str,
    end_date: &str,
) -> String {
    match weekly_high_low_summary(store, name, start_date, end_date) {
        Ok(HighLow {
            high: Some(high),
            low: Some(low),
        }) => format!(
            "Weekly High: {}°C, Low: {}°C",
            format_celsius(high),
            format_celsius(low)
        ),
        Ok(_) => "No readings found".to_string(),
        Err(SummaryError::Storage(e)) => {
            tracing::error!("Weekly summary failed: {}", e);
            format!("Error: {}", e)
        }
        Err(e) => e.to_string(),
    }
}

/// Always shows at least one decimal place, so `30` prints as `30.0`.
fn format_celsius(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
