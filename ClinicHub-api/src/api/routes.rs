use std::any::Any;

use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{debug, error};

use crate::api::handlers::{health, patients, summary};
use crate::entities::common::ErrorResponse;

/// Router of the summary orchestrator
pub fn create_orchestrator_app(service: summary::SummaryService) -> Router {
    debug!("Creating orchestrator router");
    health::initialize_server_start_time();

    Router::new()
        .route("/", get(health::orchestrator_root))
        .route("/health", get(health::health_check))
        .route("/resumen/paciente/:id", get(summary::get_patient_summary))
        .route("/resumen/medico/:id", get(summary::get_physician_summary))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Router of the patient-data service
pub fn create_patients_app(service: patients::PatientService) -> Router {
    debug!("Creating patient-data router");
    health::initialize_server_start_time();

    Router::new()
        .route("/", get(health::patients_root))
        .route("/health", get(health::health_check))
        .route("/pacientes", get(patients::list_patients).post(patients::create_patient))
        .route("/pacientes/contacto", post(patients::add_contact))
        .route("/pacientes/:id", get(patients::get_patient))
        .route("/pacientes/:id/contacto", get(patients::get_contacts))
        .route("/contactos", get(patients::list_contacts))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Turn a handler panic into the generic 500 envelope
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!("Handler panicked: {}", detail);
    ErrorResponse::internal_error().into_response()
}
