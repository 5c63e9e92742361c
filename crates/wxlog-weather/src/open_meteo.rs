//! Open-Meteo HTTP transport.
//!
//! Requests hourly variables with `timeformat=unixtime` and turns the JSON
//! body into column-wise [`HourlyResponse`] blocks.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::TransportError;
use crate::retry::{with_retry, RetryConfig};
use crate::transport::{HourlyRequest, HourlyResponse, HourlySeries, HourlyTransport};

pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const USER_AGENT: &str = concat!("wxlog/", env!("CARGO_PKG_VERSION"));
const DEFAULT_INTERVAL_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct ForecastBody {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation: f64,
    #[serde(default)]
    utc_offset_seconds: i32,
    hourly: Option<HourlyBody>,
}

#[derive(Debug, Deserialize)]
struct HourlyBody {
    time: Vec<i64>,
    #[serde(flatten)]
    columns: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenMeteoTransport {
    client: Client,
    base_url: String,
    retry: RetryConfig,
}

impl OpenMeteoTransport {
    pub fn new(base_url: &str, timeout: Duration, retry: RetryConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            retry,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(&self, request: &HourlyRequest) -> Result<Vec<HourlyResponse>, TransportError> {
        let params = [
            ("latitude", request.latitude.to_string()),
            ("longitude", request.longitude.to_string()),
            ("start_date", request.start_date.format("%Y-%m-%d").to_string()),
            ("end_date", request.end_date.format("%Y-%m-%d").to_string()),
            ("hourly", request.hourly.join(",")),
            ("timeformat", "unixtime".to_string()),
        ];

        tracing::info!("Fetching weather from {}", self.base_url);
        let response = with_retry(&self.retry, || {
            self.client.get(&self.base_url).query(&params).send()
        })
        .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.reason)
                .unwrap_or(text);
            return Err(TransportError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let body: serde_json::Value = response.json().await?;
        parse_forecast(body, &request.hourly)
    }
}

impl HourlyTransport for OpenMeteoTransport {
    async fn fetch_hourly(&self, request: &HourlyRequest) -> Result<Vec<HourlyResponse>, TransportError> {
        self.request(request).await
    }
}

/// Parse a forecast body. A single location comes back as an object,
/// several as an array of objects.
pub(crate) fn parse_forecast(
    body: serde_json::Value,
    variables: &[String],
) -> Result<Vec<HourlyResponse>, TransportError> {
    let blocks = match body {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    blocks
        .into_iter()
        .map(|block| {
            let parsed: ForecastBody = serde_json::from_value(block)
                .map_err(|e| TransportError::malformed(format!("forecast body: {}", e)))?;
            to_response(parsed, variables)
        })
        .collect()
}

fn to_response(body: ForecastBody, variables: &[String]) -> Result<HourlyResponse, TransportError> {
    let hourly = match body.hourly {
        Some(h) => h,
        None => return Err(TransportError::malformed("missing hourly block")),
    };

    let interval = uniform_interval(&hourly.time)?;
    let mut columns = Vec::with_capacity(variables.len());
    for name in variables {
        let column = hourly
            .columns
            .get(name)
            .ok_or_else(|| TransportError::malformed(format!("missing hourly variable {}", name)))?;
        let values = parse_column(name, column)?;
        if values.len() != hourly.time.len() {
            return Err(TransportError::malformed(format!(
                "{} has {} values for {} timestamps",
                name,
                values.len(),
                hourly.time.len()
            )));
        }
        columns.push(values);
    }

    Ok(HourlyResponse {
        latitude: body.latitude,
        longitude: body.longitude,
        elevation: body.elevation,
        utc_offset_seconds: body.utc_offset_seconds,
        hourly: HourlySeries {
            time: hourly.time.first().copied().unwrap_or(0),
            interval,
            variables: columns,
        },
    })
}

fn uniform_interval(times: &[i64]) -> Result<i64, TransportError> {
    let interval = match times {
        [first, second, ..] => second
            .checked_sub(*first)
            .ok_or_else(|| TransportError::malformed("time column step overflows"))?,
        _ => return Ok(DEFAULT_INTERVAL_SECS),
    };
    if interval <= 0 {
        return Err(TransportError::malformed("time column is not increasing"));
    }
    if times.windows(2).any(|w| w[1].checked_sub(w[0]) != Some(interval)) {
        return Err(TransportError::malformed("time column is not evenly spaced"));
    }
    Ok(interval)
}

fn parse_column(name: &str, column: &serde_json::Value) -> Result<Vec<Option<f64>>, TransportError> {
    let items = column
        .as_array()
        .ok_or_else(|| TransportError::malformed(format!("{} is not an array", name)))?;

    items
        .iter()
        .map(|v| match v {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Number(n) => Ok(n.as_f64()),
            other => Err(TransportError::malformed(format!(
                "{} contains non-numeric value {}",
                name, other
            ))),
        })
        .collect()
}
