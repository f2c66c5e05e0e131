//! Orchestrator against real HTTP collaborators on ephemeral ports.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use clinic_hub_api::api::{create_orchestrator_app, create_patients_app};
use clinic_hub_data::database::create_in_memory_pool;
use clinic_hub_data::upstream::UpstreamConfig;
use clinic_hub_domain::services::{create_patient_service, create_summary_service};

async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing listens on
async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn orchestrator(patients: SocketAddr, consultations: SocketAddr) -> Router {
    let service = create_summary_service(UpstreamConfig {
        patients_base_url: format!("http://{}", patients),
        consultations_base_url: format!("http://{}", consultations),
        timeout: Duration::from_secs(2),
    })
    .unwrap();
    create_orchestrator_app(Arc::new(service))
}

async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_patient_summary_with_consultations_down() {
    let patients = Router::new()
        .route(
            "/pacientes/42",
            get(|| async { Json(json!({"id": 42, "nombre": "Ana", "dni": "30111222"})) }),
        )
        .route("/pacientes/42/contacto", get(|| async { Json(json!([])) }));
    let patients_addr = spawn(patients).await;
    let consultations_addr = closed_port().await;

    let (status, body) = call(
        orchestrator(patients_addr, consultations_addr),
        Method::GET,
        "/resumen/paciente/42",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "paciente": {"id": 42, "nombre": "Ana", "dni": "30111222"},
            "contactos": [],
            "consultas": []
        })
    );
}

#[tokio::test]
async fn test_patient_summary_against_patients_service() {
    let pool = create_in_memory_pool().unwrap();
    let patients = create_patients_app(Arc::new(create_patient_service(pool)));
    let patients_addr = spawn(patients.clone()).await;

    let (status, created) = call(
        patients.clone(),
        Method::POST,
        "/pacientes",
        Some(json!({"nombre": "Luis", "dni": "20999888", "fecha_nac": "1985-11-30", "sexo": "M"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, _) = call(
        patients,
        Method::POST,
        "/pacientes/contacto",
        Some(json!({"id": id, "telefono": "1144440000", "direccion": "Calle 2"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let consultations = Router::new().route(
        "/consultas/paciente/:id",
        get(|| async { Json(json!([{"id": 1, "motivo": "control"}])) }),
    );
    let consultations_addr = spawn(consultations).await;

    let (status, body) = call(
        orchestrator(patients_addr, consultations_addr),
        Method::GET,
        &format!("/resumen/paciente/{}", id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paciente"]["nombre"], "Luis");
    assert_eq!(body["contactos"][0]["telefono"], "1144440000");
    assert_eq!(body["consultas"], json!([{"id": 1, "motivo": "control"}]));
}

#[tokio::test]
async fn test_unknown_patient_is_not_found_without_dependents() {
    let pool = create_in_memory_pool().unwrap();
    let patients_addr = spawn(create_patients_app(Arc::new(create_patient_service(pool)))).await;
    let consultations_addr = closed_port().await;

    let (status, body) = call(
        orchestrator(patients_addr, consultations_addr),
        Method::GET,
        "/resumen/paciente/7",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Paciente no encontrado"}));
}

#[tokio::test]
async fn test_physician_summary_with_unreachable_service_is_internal() {
    let patients_addr = closed_port().await;
    let consultations_addr = closed_port().await;

    let (status, body) = call(
        orchestrator(patients_addr, consultations_addr),
        Method::GET,
        "/resumen/medico/3",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Error interno"}));
}
