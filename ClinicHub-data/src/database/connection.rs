//! SQLite connection pool for the patient-data service and the exam document store.

use std::env;
use std::path::Path;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use tracing::{info, warn};

use super::{migrations, DatabaseError};

/// Pooled SQLite connections
pub type DbPool = r2d2::Pool<SqliteConnectionManager>;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub sqlite_path: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection checkout timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: "data/pacientes.db".to_string(),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Build the configuration from `DB_SQLITE_PATH`, `DB_MAX_CONNECTIONS` and `DB_TIMEOUT_SECONDS`
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let sqlite_path = env::var("DB_SQLITE_PATH").unwrap_or(defaults.sqlite_path);
        let max_connections = parse_env("DB_MAX_CONNECTIONS", defaults.max_connections);
        let timeout_seconds = parse_env("DB_TIMEOUT_SECONDS", defaults.timeout_seconds);

        info!(
            "Database configuration: path={}, max_connections={}, timeout={}s",
            sqlite_path, max_connections, timeout_seconds
        );

        Self {
            sqlite_path,
            max_connections,
            timeout_seconds,
        }
    }

    /// Configuration pointing at an explicit file, other settings defaulted
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            sqlite_path: path.into(),
            ..Self::default()
        }
    }
}

fn parse_env<T: std::str::FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid value {:?} for {}, using {}", raw, key, default);
            default
        }),
        Err(_) => default,
    }
}

/// Open a file-backed pool and run migrations
pub fn create_sqlite_pool(config: &DatabaseConfig) -> Result<DbPool, DatabaseError> {
    info!("Initializing SQLite database at: {}", config.sqlite_path);

    if let Some(parent) = Path::new(&config.sqlite_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            std::fs::create_dir_all(parent)?;
        }
    }

    let manager = SqliteConnectionManager::file(&config.sqlite_path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = r2d2::Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)?;

    {
        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
    }
    info!("SQLite connection pool created successfully");

    Ok(pool)
}

/// Single-connection in-memory pool, used by tests and throwaway runs
pub fn create_in_memory_pool() -> Result<DbPool, DatabaseError> {
    info!("Initializing in-memory SQLite database");

    // Every in-memory connection is its own database, so the pool holds exactly one.
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    let pool = r2d2::Pool::builder().max_size(1).build(manager)?;
    {
        let conn = pool.get()?;
        migrations::run_migrations(&conn)?;
    }

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_pool_has_schema() {
        let pool = create_in_memory_pool().unwrap();
        let conn = pool.get().unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert!(tables.contains(&"pacientes".to_string()));
        assert!(tables.contains(&"contactos_pacientes".to_string()));
        assert!(tables.contains(&"examenes".to_string()));
    }

    #[test]
    fn test_file_pool_creates_parent_dir_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pacientes.db");

        let pool = create_sqlite_pool(&DatabaseConfig::with_path(path.to_string_lossy())).unwrap();

        assert!(path.exists());
        let conn = pool.get().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'examenes'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_with_path_keeps_defaults() {
        let config = DatabaseConfig::with_path("/tmp/x.db");
        assert_eq!(config.sqlite_path, "/tmp/x.db");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.timeout_seconds, 30);
    }
}
