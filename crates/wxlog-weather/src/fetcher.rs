//! Hourly temperature fetcher.
//!
//! Validates the date range, asks the transport for the first location
//! block, and rebuilds absolute UTC timestamps from the base time and the
//! sampling interval.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{FetchError, TransportError};
use crate::transport::{HourlyRequest, HourlyResponse, HourlyTransport};
use crate::types::FetchedReading;

/// Provenance tag stamped on every reading from Open-Meteo.
pub const OPEN_METEO_SOURCE: &str = "open-meteo";

#[derive(Debug)]
pub struct WeatherFetcher<T> {
    transport: T,
    source: String,
}

impl<T: HourlyTransport> WeatherFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self::with_source(transport, OPEN_METEO_SOURCE)
    }

    pub fn with_source(transport: T, source: &str) -> Self {
        Self {
            transport,
            source: source.to_string(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fetch hourly readings for `[start_date, end_date]` (both inclusive).
    ///
    /// Every reading carries `lat`/`lon` exactly as passed in, not the grid
    /// point the API snapped to.
    pub async fn fetch_hourly_weather(
        &self,
        lat: f64,
        lon: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<FetchedReading>, FetchError> {
        if end_date < start_date {
            return Err(FetchError::InvalidArgument(format!(
                "end_date ({}) must be >= start_date ({})",
                end_date, start_date
            )));
        }

        let request = HourlyRequest::temperature(lat, lon, start_date, end_date);
        let responses = self.transport.fetch_hourly(&request).await.map_err(|e| {
            tracing::error!("API request failed: {}", e);
            FetchError::from(e)
        })?;

        let response = responses
            .into_iter()
            .next()
            .ok_or_else(|| TransportError::malformed("response contained no location block"))?;

        tracing::info!(
            "Coordinates: {}°N {}°E",
            response.latitude,
            response.longitude
        );
        tracing::info!("Elevation: {} m asl", response.elevation);
        tracing::info!(
            "Timezone difference to GMT+0: {}s",
            response.utc_offset_seconds
        );

        let readings = self.normalize(lat, lon, &response)?;
        tracing::info!("Fetched {} readings", readings.len());
        Ok(readings)
    }

    fn normalize(
        &self,
        lat: f64,
        lon: f64,
        response: &HourlyResponse,
    ) -> Result<Vec<FetchedReading>, FetchError> {
        let hourly = &response.hourly;
        let temperatures = hourly
            .variable(0)
            .ok_or_else(|| TransportError::malformed("temperature_2m column missing"))?;

        temperatures
            .iter()
            .enumerate()
            .map(|(i, temp)| -> Result<FetchedReading, FetchError> {
                let time = hourly
                    .timestamp(i)
                    .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
                    .ok_or_else(|| {
                        TransportError::malformed(format!("timestamp of sample {} out of range", i))
                    })?;
                Ok(FetchedReading {
                    time,
                    temp_c: temp.filter(|t| t.is_finite()),
                    latitude: lat,
                    longitude: lon,
                    source: self.source.clone(),
                })
            })
            .collect()
    }
}
