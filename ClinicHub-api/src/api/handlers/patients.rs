use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, instrument, warn};

use clinic_hub_domain::entities::patient::{CreateContactRequest, CreatePatientRequest};
use clinic_hub_domain::services::{PatientServiceError, PatientServiceTrait};

use crate::entities::common::ErrorResponse;

/// Service type for dependency injection
pub type PatientService = Arc<dyn PatientServiceTrait + Send + Sync>;

/// Register a patient
#[instrument(skip(service, payload))]
pub async fn create_patient(
    State(service): State<PatientService>,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Response> {
    let Json(request) = payload.map_err(body_rejected)?;

    match service.create_patient(request).await {
        Ok(created) => {
            info!("Created patient {}", created.id);
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(e) => Err(error_response(e)),
    }
}

#[instrument(skip(service))]
pub async fn get_patient(
    State(service): State<PatientService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Response> {
    match service.get_patient(id).await {
        Ok(patient) => Ok((StatusCode::OK, Json(patient))),
        Err(e) => Err(error_response(e)),
    }
}

#[instrument(skip(service))]
pub async fn list_patients(State(service): State<PatientService>) -> Result<impl IntoResponse, Response> {
    match service.list_patients().await {
        Ok(patients) => Ok((StatusCode::OK, Json(patients))),
        Err(e) => Err(error_response(e)),
    }
}

/// Add a contact entry to a patient
#[instrument(skip(service, payload))]
pub async fn add_contact(
    State(service): State<PatientService>,
    payload: Result<Json<CreateContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, Response> {
    let Json(request) = payload.map_err(body_rejected)?;

    match service.add_contact(request).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(created))),
        Err(e) => Err(error_response(e)),
    }
}

#[instrument(skip(service))]
pub async fn get_contacts(
    State(service): State<PatientService>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, Response> {
    match service.get_contacts(id).await {
        Ok(contacts) => Ok((StatusCode::OK, Json(contacts))),
        Err(e) => Err(error_response(e)),
    }
}

#[instrument(skip(service))]
pub async fn list_contacts(State(service): State<PatientService>) -> Result<impl IntoResponse, Response> {
    match service.list_contacts().await {
        Ok(contacts) => Ok((StatusCode::OK, Json(contacts))),
        Err(e) => Err(error_response(e)),
    }
}

fn body_rejected(rejection: JsonRejection) -> Response {
    warn!("Unreadable request body: {}", rejection);
    ErrorResponse::bad_request("Faltan datos").into_response()
}

fn error_response(err: PatientServiceError) -> Response {
    match err {
        PatientServiceError::MissingData => ErrorResponse::bad_request(err.to_string()).into_response(),
        PatientServiceError::ValidationError(msg) => ErrorResponse::bad_request(msg).into_response(),
        PatientServiceError::NotFound(msg) => ErrorResponse::not_found(msg).into_response(),
        PatientServiceError::RepositoryError(msg) => {
            error!("Storage failure: {}", msg);
            ErrorResponse::new(StatusCode::INTERNAL_SERVER_ERROR, "No se pudo conectar a la base de datos")
                .into_response()
        }
    }
}
