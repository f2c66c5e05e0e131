use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{ExamSink, SinkError};
use crate::models::exam::ExamRecord;

/// Posts each record as JSON to the exams API
#[derive(Debug, Clone)]
pub struct HttpExamSink {
    http: reqwest::Client,
    url: String,
}

impl HttpExamSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ExamSink for HttpExamSink {
    async fn submit(&self, record: &ExamRecord) -> Result<(), SinkError> {
        let response = self
            .http
            .post(&self.url)
            .json(record)
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        debug!("{} rejected record with {}", self.url, status);
        Err(SinkError::Rejected(format!("HTTP {}: {}", status.as_u16(), body.trim())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::exam::{ExamResult, ExamStatus, ExamType};
    use axum::{http::StatusCode, routing::post, Json, Router};
    use chrono::NaiveDateTime;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    fn record() -> ExamRecord {
        let mut result = ExamResult::new();
        result.insert("Resultado".to_string(), "Negativo".to_string());

        ExamRecord {
            patient_id: 10000001,
            physician_id: 12,
            exam_type: ExamType::Covid,
            timestamp: NaiveDateTime::parse_from_str("2024-06-01T09:00:00", "%Y-%m-%dT%H:%M:%S").unwrap(),
            status: ExamStatus::Pending,
            result,
            comment: None,
        }
    }

    async fn spawn_server(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_accepted_record_is_posted_as_json() {
        let received: Arc<Mutex<Vec<Value>>> = Arc::default();
        let captured = received.clone();
        let app = Router::new().route(
            "/api/examenes",
            post(move |Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    captured.lock().unwrap().push(body);
                    StatusCode::CREATED
                }
            }),
        );
        let base = spawn_server(app).await;
        let sink = HttpExamSink::new(format!("{}/api/examenes", base), Duration::from_secs(2)).unwrap();

        sink.submit(&record()).await.unwrap();

        let bodies = received.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["tipoExamen"], "COVID");
        assert_eq!(bodies[0]["pacienteId"], "10000001");
    }

    #[tokio::test]
    async fn test_error_status_is_rejection() {
        let app = Router::new().route(
            "/api/examenes",
            post(|| async { (StatusCode::BAD_REQUEST, "campo invalido") }),
        );
        let base = spawn_server(app).await;
        let sink = HttpExamSink::new(format!("{}/api/examenes", base), Duration::from_secs(2)).unwrap();

        let err = sink.submit(&record()).await.unwrap_err();
        assert_eq!(err, SinkError::Rejected("HTTP 400: campo invalido".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sink = HttpExamSink::new(format!("http://{}/api/examenes", addr), Duration::from_secs(2)).unwrap();
        let err = sink.submit(&record()).await.unwrap_err();
        assert_eq!(err.kind(), crate::sink::FailureKind::TransportError);
    }
}
