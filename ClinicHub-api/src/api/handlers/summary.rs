use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument};

use clinic_hub_domain::services::{SummaryError, SummaryServiceTrait};

use crate::entities::common::ErrorResponse;

/// Service type for dependency injection
pub type SummaryService = Arc<dyn SummaryServiceTrait + Send + Sync>;

/// Composite view of one patient
#[instrument(skip(service))]
pub async fn get_patient_summary(
    State(service): State<SummaryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Response> {
    info!("Building summary for patient {}", id);

    match service.patient_summary(id).await {
        Ok(summary) => Ok((StatusCode::OK, Json(summary))),
        Err(e) => Err(error_response(e)),
    }
}

/// Composite view of one physician
#[instrument(skip(service))]
pub async fn get_physician_summary(
    State(service): State<SummaryService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Response> {
    info!("Building summary for physician {}", id);

    match service.physician_summary(id).await {
        Ok(summary) => Ok((StatusCode::OK, Json(summary))),
        Err(e) => Err(error_response(e)),
    }
}

fn error_response(err: SummaryError) -> Response {
    match err {
        SummaryError::PatientNotFound(id) | SummaryError::PhysicianNotFound(id) => {
            info!("Primary record {} not found", id);
            ErrorResponse::not_found(err.to_string()).into_response()
        }
        SummaryError::Upstream(e) => {
            error!("Summary failed: {}", e);
            ErrorResponse::internal_error().into_response()
        }
    }
}
