use crate::summary::SummaryError;
use wxlog_core::{AppError, WeatherError};

use super::store_error;

impl From<SummaryError> for AppError {
    fn from(e: SummaryError) -> Self {
        match e {
            SummaryError::InvalidDate(s) => {
                AppError::Weather(WeatherError::InvalidArgument(format!("Invalid date format: {}", s)))
            }
            SummaryError::LocationNotFound(name) => {
                AppError::Weather(WeatherError::LocationNotFound(name))
            }
            SummaryError::Storage(e) => store_error(e),
        }
    }
}
