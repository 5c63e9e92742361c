use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Insert-or-get produced no row. Never retried.
    #[error("Location invariant violated: {0}")]
    LocationInvariant(String),

    #[error("Could not decode stored value: {0}")]
    Decode(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
