use crate::pipeline::PipelineError;
use wxlog_core::{AppError, WeatherError};

use super::{fetch_error, store_error};

impl From<PipelineError> for AppError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::InvalidDate(s) => {
                AppError::Weather(WeatherError::InvalidArgument(format!("Invalid date format: {}", s)))
            }
            PipelineError::WeatherApi(e) | PipelineError::InvalidRange(e) => fetch_error(e),
            PipelineError::Storage(e) => store_error(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxlog_weather::{FetchError, TransportError};

    #[test]
    fn test_api_status_maps_to_weather_api_error() {
        let err = PipelineError::from(FetchError::from(TransportError::Status {
            status: 500,
            reason: "boom".into(),
        }));
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Weather(WeatherError::ApiError(_))));
    }

    #[test]
    fn test_reversed_range_maps_to_invalid_argument() {
        let err = PipelineError::from(FetchError::InvalidArgument("end before start".into()));
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Weather(WeatherError::InvalidArgument(_))));
    }
}
