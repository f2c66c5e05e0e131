use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Resource, Service, UpstreamClient, UpstreamError};

/// Base URLs and timeout for the orchestrator's collaborators
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub patients_base_url: String,
    pub consultations_base_url: String,
    pub timeout: Duration,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            patients_base_url: "http://pacientes:5000".to_string(),
            consultations_base_url: "http://consultas-medicas:3000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// reqwest-backed implementation of [`UpstreamClient`]
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl HttpUpstreamClient {
    /// Build a client; fails only if the TLS backend cannot be initialized
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn url_for(&self, resource: Resource) -> String {
        let base = match resource.service() {
            Service::Patients => &self.config.patients_base_url,
            Service::Consultations => &self.config.consultations_base_url,
        };
        format!("{}{}", base.trim_end_matches('/'), resource.path())
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn fetch(&self, resource: Resource) -> Result<Value, UpstreamError> {
        let url = self.url_for(resource);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            UpstreamError::Transport {
                resource,
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!("{} answered {}", url, status);
            return Err(UpstreamError::Rejected {
                resource,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| UpstreamError::Transport {
            resource,
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| UpstreamError::Malformed {
            resource,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    async fn spawn_server(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(patients: &str, consultations: &str) -> HttpUpstreamClient {
        HttpUpstreamClient::new(UpstreamConfig {
            patients_base_url: patients.to_string(),
            consultations_base_url: consultations.to_string(),
            timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_success_returns_payload() {
        let app = Router::new().route("/pacientes/7", get(|| async { Json(json!({"id": 7, "nombre": "Ana"})) }));
        let base = spawn_server(app).await;
        let client = client_for(&base, &base);

        let payload = client.fetch(Resource::Patient(7)).await.unwrap();
        assert_eq!(payload["nombre"], "Ana");
    }

    #[tokio::test]
    async fn test_non_success_is_rejected() {
        let app = Router::new().route(
            "/medico/9",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"error": "no"}))) }),
        );
        let base = spawn_server(app).await;
        let client = client_for(&base, &base);

        let err = client.fetch(Resource::Physician(9)).await.unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Rejected {
                resource: Resource::Physician(9),
                status: 404
            }
        );
    }

    #[tokio::test]
    async fn test_bodyless_success_is_rejected() {
        let app = Router::new().route("/pacientes/1/contacto", get(|| async { StatusCode::NO_CONTENT }));
        let base = spawn_server(app).await;
        let client = client_for(&base, &base);

        let err = client.fetch(Resource::PatientContacts(1)).await.unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Rejected {
                resource: Resource::PatientContacts(1),
                status: 204
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let app = Router::new().route("/consultas/paciente/1", get(|| async { "<html>oops</html>" }));
        let base = spawn_server(app).await;
        let client = client_for(&base, &base);

        let err = client.fetch(Resource::PatientConsultations(1)).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}", addr), &format!("http://{}", addr));
        let err = client.fetch(Resource::PatientContacts(1)).await.unwrap_err();
        assert!(matches!(err, UpstreamError::Transport { .. }));
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = client_for("http://pacientes:5000/", "http://consultas:3000");
        assert_eq!(client.url_for(Resource::Patient(1)), "http://pacientes:5000/pacientes/1");
        assert_eq!(
            client.url_for(Resource::PhysicianConsultations(2)),
            "http://consultas:3000/consultas/medico/2"
        );
    }
}
