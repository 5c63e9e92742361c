//! Weather fetching for wxlog
//!
//! Pulls hourly temperature series from Open-Meteo through an injectable
//! transport and normalizes them into timestamped readings.

pub mod cache;
pub mod error;
pub mod fetcher;
pub mod open_meteo;
pub mod retry;
pub mod transport;
pub mod types;

pub use cache::CachedTransport;
pub use error::{FetchError, TransportError};
pub use fetcher::{WeatherFetcher, OPEN_METEO_SOURCE};
pub use open_meteo::OpenMeteoTransport;
pub use retry::RetryConfig;
pub use transport::{HourlyRequest, HourlyResponse, HourlySeries, HourlyTransport};
pub use types::{FetchedReading, Reading};
