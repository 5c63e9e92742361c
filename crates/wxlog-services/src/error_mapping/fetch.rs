use wxlog_core::{AppError, NetworkError, ReqwestErrorExt, WeatherError};
use wxlog_weather::{FetchError, TransportError};

pub(crate) fn transport_error(e: TransportError) -> AppError {
    match e {
        TransportError::Network(e) => AppError::Network(e.into_network_error()),
        TransportError::Status { status, reason } => AppError::Network(NetworkError::HttpStatus {
            status,
            message: reason,
        }),
        TransportError::Malformed(s) => AppError::Network(NetworkError::UnexpectedPayload(s)),
    }
}

pub(crate) fn fetch_error(e: FetchError) -> AppError {
    match e {
        FetchError::InvalidArgument(s) => AppError::Weather(WeatherError::InvalidArgument(s)),
        FetchError::WeatherApi {
            source: TransportError::Network(e),
        } => AppError::Network(e.into_network_error()),
        FetchError::WeatherApi { source } => {
            AppError::Weather(WeatherError::ApiError(source.to_string()))
        }
    }
}
