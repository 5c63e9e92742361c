//! The seam between the fetcher and the network.
//!
//! [`HourlyTransport`] is the only capability the fetcher needs: turn a
//! request into per-location hourly blocks. HTTP, retry and caching policy
//! all live behind it, so normalization can be tested with in-memory fakes.

use std::future::Future;

use chrono::NaiveDate;

use crate::error::TransportError;

/// Hourly variable holding air temperature at 2 m, in °C.
pub const TEMPERATURE_2M: &str = "temperature_2m";

/// Parameters for one hourly request.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Requested variables; response columns come back in this order.
    pub hourly: Vec<String>,
}

impl HourlyRequest {
    pub fn temperature(latitude: f64, longitude: f64, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            latitude,
            longitude,
            start_date: start,
            end_date: end,
            hourly: vec![TEMPERATURE_2M.to_string()],
        }
    }
}

/// Hourly samples for one location, stored column-wise.
///
/// Sample `i` was taken at `time + i * interval` (unix seconds, UTC).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    pub time: i64,
    pub interval: i64,
    pub variables: Vec<Vec<Option<f64>>>,
}

impl HourlySeries {
    /// Values of the `index`-th requested variable.
    pub fn variable(&self, index: usize) -> Option<&[Option<f64>]> {
        self.variables.get(index).map(Vec::as_slice)
    }

    /// Unix timestamp of sample `i`, or `None` if it does not fit in an `i64`.
    pub fn timestamp(&self, i: usize) -> Option<i64> {
        let offset = i64::try_from(i).ok()?.checked_mul(self.interval)?;
        self.time.checked_add(offset)
    }
}

/// One location block of a response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub utc_offset_seconds: i32,
    pub hourly: HourlySeries,
}

/// Something that can answer hourly requests.
pub trait HourlyTransport: Send + Sync {
    fn fetch_hourly(
        &self,
        request: &HourlyRequest,
    ) -> impl Future<Output = Result<Vec<HourlyResponse>, TransportError>> + Send;
}
