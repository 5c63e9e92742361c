use wxlog_core::{AppError, DatabaseError, RusqliteErrorExt};
use wxlog_store::StoreError;

pub(crate) fn store_error(e: StoreError) -> AppError {
    match e {
        StoreError::Sqlite(e) => AppError::Database(e.into_database_error()),
        StoreError::Io(e) => AppError::Io(e),
        StoreError::LocationInvariant(s) => AppError::Database(DatabaseError::Invariant(s)),
        StoreError::Decode(s) => AppError::Database(DatabaseError::Corrupt(s)),
    }
}
