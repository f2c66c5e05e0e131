use axum::{http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, instrument};

use crate::entities::common::MessageResponse;

/// Response of `GET /health`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Package version from the Cargo manifest
    pub version: String,
    /// Seconds since the server started
    pub uptime: u64,
}

static SERVER_START_TIME: OnceCell<Instant> = OnceCell::new();

/// Record the server start time; later calls are no-ops
pub fn initialize_server_start_time() {
    SERVER_START_TIME.get_or_init(Instant::now);
}

#[instrument]
pub async fn health_check() -> impl IntoResponse {
    let started = SERVER_START_TIME.get_or_init(Instant::now);

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime: started.elapsed().as_secs(),
        }),
    )
}

/// Liveness marker of the orchestrator
pub async fn orchestrator_root() -> Json<MessageResponse> {
    debug!("Liveness probe");
    Json(MessageResponse {
        message: "Microservicio Orquestador".to_string(),
    })
}

/// Liveness marker of the patient-data service
pub async fn patients_root() -> Json<MessageResponse> {
    debug!("Liveness probe");
    Json(MessageResponse {
        message: "API de Pacientes".to_string(),
    })
}
