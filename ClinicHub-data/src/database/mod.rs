use thiserror::Error;

// Database modules
pub mod connection;
pub mod migrations;

// Re-export database connection functions
pub use connection::*;

/// Database error enum
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Connection pool could not be built or a connection could not be checked out
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// SQLite driver error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Filesystem error while preparing the database location
    #[error("Failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),

    /// Migration error
    #[error("Database migration error: {0}")]
    MigrationError(String),
}
