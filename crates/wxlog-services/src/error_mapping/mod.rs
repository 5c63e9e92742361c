//! Maps service and library errors to wxlog_core::AppError for consistent user-facing messages.
//! Library error types live in other crates, so those go through helper functions
//! instead of `From` impls.

mod fetch;
mod pipeline;
mod store;
mod summary;

pub(crate) use fetch::{fetch_error, transport_error};
pub(crate) use store::store_error;
