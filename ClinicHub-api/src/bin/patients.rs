use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tracing::info;

use clinic_hub_api::api::create_patients_app;
use clinic_hub_api::config::PatientsConfig;
use clinic_hub_api::{server, telemetry};
use clinic_hub_data::database::create_sqlite_pool;
use clinic_hub_domain::services::create_patient_service;

/// Entry point of the patient-data service
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    telemetry::init_tracing();
    info!("🚀 Starting patient-data service");

    let config = PatientsConfig::from_env();
    let pool = create_sqlite_pool(&config.database).with_context(|| {
        format!("Failed to open the database at {}", config.database.sqlite_path)
    })?;

    let app = create_patients_app(Arc::new(create_patient_service(pool)));

    server::serve(app, config.port)
        .await
        .with_context(|| format!("Server failed on port {}", config.port))
}
