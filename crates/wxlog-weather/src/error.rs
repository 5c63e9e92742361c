//! Fetch-side error types.

use thiserror::Error;

/// Failures raised by a fetch transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API returned {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl TransportError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Errors surfaced by [`crate::WeatherFetcher`].
///
/// Transport failures never leak directly; they arrive wrapped in
/// `WeatherApi` with the original error available through `source()`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Weather API request failed")]
    WeatherApi {
        #[source]
        source: TransportError,
    },
}

impl FetchError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Human-readable description including the underlying cause.
    pub fn detail(&self) -> String {
        match self {
            Self::InvalidArgument(msg) => msg.clone(),
            Self::WeatherApi { source } => format!("API request failed: {}", source),
        }
    }
}

impl From<TransportError> for FetchError {
    fn from(source: TransportError) -> Self {
        Self::WeatherApi { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_weather_api_keeps_cause() {
        let err = FetchError::from(TransportError::Status {
            status: 503,
            reason: "maintenance".into(),
        });

        let cause = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(cause.contains("503"));
        assert!(err.detail().contains("maintenance"));
        assert!(!err.is_invalid_argument());
    }
}
