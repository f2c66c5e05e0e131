use async_trait::async_trait;
use chrono::Utc;
use rusqlite::params;

use super::{ExamSink, SinkError};
use crate::database::DbPool;
use crate::models::exam::ExamRecord;

/// Stores each record as a JSON document in the `examenes` collection
#[derive(Debug, Clone)]
pub struct DocumentStoreSink {
    pool: DbPool,
}

impl DocumentStoreSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Number of stored documents
    pub fn count(&self) -> Result<i64, SinkError> {
        let conn = self.pool.get().map_err(|e| SinkError::Transport(e.to_string()))?;
        conn.query_row("SELECT COUNT(*) FROM examenes", [], |row| row.get(0))
            .map_err(|e| SinkError::Transport(e.to_string()))
    }
}

#[async_trait]
impl ExamSink for DocumentStoreSink {
    async fn submit(&self, record: &ExamRecord) -> Result<(), SinkError> {
        let document = serde_json::to_string(record).map_err(|e| SinkError::Rejected(e.to_string()))?;

        let conn = self.pool.get().map_err(|e| SinkError::Transport(e.to_string()))?;
        let inserted = conn
            .execute(
                "INSERT INTO examenes (documento, creado_en) VALUES (?1, ?2)",
                params![document, Utc::now().to_rfc3339()],
            )
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        if inserted == 0 {
            return Err(SinkError::Rejected("insert not acknowledged".to_string()));
        }

        Ok(())
    }
}
