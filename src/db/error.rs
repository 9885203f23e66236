use thiserror::Error;

/// Failure inside the record store.
///
/// Every variant means the store could not serve the operation. Absence of a
/// record is not an error and is reported through `Option`/`bool` returns.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
