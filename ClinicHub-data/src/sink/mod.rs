//! Destinations for generated exam records.

mod document;
mod http;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::models::exam::ExamRecord;

pub use document::DocumentStoreSink;
pub use http::HttpExamSink;

/// Classification of a failed submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The sink could not be reached
    TransportError,
    /// The sink answered but refused or did not acknowledge the record
    RejectionError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::TransportError => f.write_str("TransportError"),
            FailureKind::RejectionError => f.write_str("RejectionError"),
        }
    }
}

/// Failure of a single submission
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SinkError {
    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Rejected(String),
}

impl SinkError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SinkError::Transport(_) => FailureKind::TransportError,
            SinkError::Rejected(_) => FailureKind::RejectionError,
        }
    }

    /// Human-readable detail without the kind prefix
    pub fn detail(&self) -> &str {
        match self {
            SinkError::Transport(detail) | SinkError::Rejected(detail) => detail,
        }
    }
}

/// Accepts one exam record at a time
#[async_trait]
pub trait ExamSink {
    async fn submit(&self, record: &ExamRecord) -> Result<(), SinkError>;
}
