//! Orchestration for wxlog: ties fetching, storage and aggregation together
//! behind the operations the CLI exposes.

pub mod app;
pub mod dates;
mod error_mapping;
pub mod pipeline;
pub mod summary;

pub use app::{AppTransport, WeatherApp};
pub use dates::{day_bounds, parse_date};
pub use pipeline::{add_location_and_fetch, ingest, IngestReport, PipelineError};
pub use summary::{
    daily_summary, weekly_high_low_message, weekly_high_low_summary, SummaryError,
};
