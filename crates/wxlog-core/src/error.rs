//! Error vocabulary shared by every wxlog crate.
//!
//! Library crates keep their own typed errors; the service layer maps them
//! into [`AppError`] so the CLI can show a short, non-technical message
//! while the full error chain goes to the log.

use thiserror::Error;

/// Anything that can stop a wxlog command.
///
/// `user_message()` is what the terminal shows; `Display` is what gets logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("weather API unreachable or failing: {0}")]
    Network(#[from] NetworkError),

    #[error("weather database: {0}")]
    Database(#[from] DatabaseError),

    #[error("wxlog configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("weather pipeline: {0}")]
    Weather(#[from] WeatherError),

    #[error("filesystem: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Network(e) => e.user_message(),
            Self::Database(e) => e.user_message(),
            Self::Config(e) => e.user_message(),
            Self::Weather(e) => e.user_message(),
            Self::Io(_) => "Could not read or write a local file. Check permissions on the data directory.",
            Self::Other(_) => "Something unexpected went wrong. Run with --verbose for details.",
        }
    }
}

/// Talking to the forecast API.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("could not reach host: {0}")]
    Unreachable(String),

    #[error("timed out waiting for a response")]
    Timeout,

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unreachable(_) => "Could not reach the weather API. Are you online?",
            Self::Timeout => "The weather API did not answer in time. Try again or raise api.timeout_secs.",
            Self::HttpStatus { status, .. } if *status >= 500 => {
                "The weather API is having trouble right now. Try again later."
            }
            Self::HttpStatus { .. } => "The weather API rejected the request. Check the coordinates and dates.",
            Self::UnexpectedPayload(_) => "The weather API sent data wxlog could not understand.",
        }
    }
}

/// SQLite-backed storage.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("cannot open database: {0}")]
    CannotOpen(String),

    #[error("query failed: {0}")]
    QueryFailed(String),

    #[error("stored data is unreadable: {0}")]
    Corrupt(String),

    #[error("storage invariant violated: {0}")]
    Invariant(String),
}

impl DatabaseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CannotOpen(_) => "Unable to open the weather database. Check database.path or --db.",
            Self::QueryFailed(_) => "A database operation failed.",
            Self::Corrupt(_) => "Some stored readings could not be read. The database may be damaged.",
            Self::Invariant(_) => "Internal storage error. Please report this.",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no config directory available: {0}")]
    NoConfigDir(String),

    #[error("invalid settings: {0}")]
    Invalid(String),

    #[error("cannot parse config file: {0}")]
    Malformed(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NoConfigDir(_) => "Could not find a config directory. Pass --config explicitly.",
            Self::Invalid(_) => "The configuration has invalid settings. See the log for which ones.",
            Self::Malformed(_) => "The config file is not valid TOML.",
        }
    }
}

/// Failures in fetch/store/summarize that are about the request itself.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("unknown location {0:?}")]
    LocationNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("forecast API error: {0}")]
    ApiError(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::LocationNotFound(_) => "Location not found. Add it with `fetch` first.",
            Self::InvalidArgument(_) => "Invalid input. Dates are YYYY-MM-DD and the end may not precede the start.",
            Self::ApiError(_) => "The weather API returned an error. Try again later.",
        }
    }
}

/// Classify a `reqwest` failure.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        let detail = self.to_string();
        match self.status() {
            _ if self.is_timeout() => NetworkError::Timeout,
            _ if self.is_decode() => NetworkError::UnexpectedPayload(detail),
            Some(status) => NetworkError::HttpStatus {
                status: status.as_u16(),
                message: detail,
            },
            None => NetworkError::Unreachable(detail),
        }
    }
}

/// Classify a `rusqlite` failure.
pub trait RusqliteErrorExt {
    fn into_database_error(self) -> DatabaseError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_database_error(self) -> DatabaseError {
        use rusqlite::ErrorCode;

        let detail = self.to_string();
        match self.sqlite_error_code() {
            Some(ErrorCode::CannotOpen) | Some(ErrorCode::PermissionDenied) => {
                DatabaseError::CannotOpen(detail)
            }
            Some(ErrorCode::DatabaseCorrupt) | Some(ErrorCode::NotADatabase) => {
                DatabaseError::Corrupt(detail)
            }
            _ => DatabaseError::QueryFailed(detail),
        }
    }
}
