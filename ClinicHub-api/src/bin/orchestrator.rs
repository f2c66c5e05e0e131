use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tracing::info;

use clinic_hub_api::api::create_orchestrator_app;
use clinic_hub_api::config::OrchestratorConfig;
use clinic_hub_api::{server, telemetry};
use clinic_hub_domain::services::create_summary_service;

/// Entry point of the summary orchestrator
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    telemetry::init_tracing();
    info!("🚀 Starting summary orchestrator");

    let config = OrchestratorConfig::from_env();
    info!(
        "Upstreams: patients={}, consultations={}, timeout={:?}",
        config.upstream.patients_base_url, config.upstream.consultations_base_url, config.upstream.timeout
    );

    let service = create_summary_service(config.upstream.clone())
        .context("Failed to build the upstream HTTP client")?;
    let app = create_orchestrator_app(Arc::new(service));

    server::serve(app, config.port)
        .await
        .with_context(|| format!("Server failed on port {}", config.port))
}
