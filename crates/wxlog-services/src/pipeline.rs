//! Write-side pipeline: register a location, fetch its hourly history and
//! persist it.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use wxlog_store::{StoreError, WeatherStore};
use wxlog_weather::{FetchError, HourlyTransport, WeatherFetcher};

use crate::dates::parse_date;
use crate::summary::SummaryError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Weather API error: {}", .0.detail())]
    WeatherApi(#[source] FetchError),

    /// Rejected fetch arguments, such as a reversed date range.
    #[error("Error: {}", .0.detail())]
    InvalidRange(#[source] FetchError),

    #[error("Error: {0}")]
    Storage(#[from] StoreError),
}

impl From<FetchError> for PipelineError {
    fn from(e: FetchError) -> Self {
        if e.is_invalid_argument() {
            Self::InvalidRange(e)
        } else {
            Self::WeatherApi(e)
        }
    }
}

/// Outcome of one successful ingest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestReport {
    pub location_id: i64,
    pub location: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Readings returned by the fetcher.
    pub fetched: usize,
    /// Readings that were new to the store.
    pub inserted: usize,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Inserted {} readings for {} from {} to {}",
            self.inserted, self.location, self.start, self.end
        )
    }
}

fn parse_ingest_date(input: &str) -> Result<NaiveDate, PipelineError> {
    parse_date(input).map_err(|e| match e {
        SummaryError::InvalidDate(detail) => PipelineError::InvalidDate(detail),
        other => PipelineError::InvalidDate(other.to_string()),
    })
}

/// Register `name` at (`lat`, `lon`), fetch `[start_date, end_date]` and
/// store whatever is new.
///
/// The location row is written before the fetch, so it exists even when the
/// fetch fails.
pub async fn ingest<T: HourlyTransport>(
    store: &WeatherStore,
    fetcher: &WeatherFetcher<T>,
    name: &str,
    lat: f64,
    lon: f64,
    start_date: &str,
    end_date: &str,
) -> Result<IngestReport, PipelineError> {
    let start = parse_ingest_date(start_date)?;
    let end = parse_ingest_date(end_date)?;

    let location_id = store.insert_or_get_location(name, lat, lon)?;
    let readings = fetcher.fetch_hourly_weather(lat, lon, start, end).await?;
    let inserted = store.upsert_readings(location_id, &readings)?;

    Ok(IngestReport {
        location_id,
        location: name.to_string(),
        start,
        end,
        fetched: readings.len(),
        inserted,
    })
}

/// [`ingest`] flattened to the one-line status shown to users.
pub async fn add_location_and_fetch<T: HourlyTransport>(
    store: &WeatherStore,
    fetcher: &WeatherFetcher<T>,
    name: &str,
    lat: f64,
    lon: f64,
    start_date: &str,
    end_date: &str,
) -> String {
    match ingest(store, fetcher, name, lat, lon, start_date, end_date).await {
        Ok(report) => report.to_string(),
        Err(e) => {
            match &e {
                PipelineError::InvalidDate(_) => {}
                PipelineError::WeatherApi(_) => tracing::error!("Weather API failed: {}", e),
                _ => tracing::error!("Unexpected error: {}", e),
            }
            e.to_string()
        }
    }
}
