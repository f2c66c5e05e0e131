use thiserror::Error;

/// Error type for repository operations
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Referenced row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored value could not be decoded
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}
