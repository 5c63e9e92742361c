//! SQLite persistence for locations and hourly readings.

pub mod error;
pub mod store;
pub mod types;

pub use error::StoreError;
pub use store::WeatherStore;
pub use types::Location;
