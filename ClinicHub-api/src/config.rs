//! Runtime configuration for the two services, read from the environment.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use clinic_hub_data::database::DatabaseConfig;
use clinic_hub_data::upstream::UpstreamConfig;

/// Orchestrator settings
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub upstream: UpstreamConfig,
    pub port: u16,
}

impl OrchestratorConfig {
    pub const DEFAULT_PORT: u16 = 5002;

    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_vars<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = UpstreamConfig::default();
        let timeout_secs = parse_var(&get, "UPSTREAM_TIMEOUT_SECONDS", defaults.timeout.as_secs());

        Self {
            upstream: UpstreamConfig {
                patients_base_url: get("PACIENTES_API_URL").unwrap_or(defaults.patients_base_url),
                consultations_base_url: get("CONSULTAS_API_URL")
                    .unwrap_or(defaults.consultations_base_url),
                timeout: Duration::from_secs(timeout_secs),
            },
            port: parse_var(&get, "PORT", Self::DEFAULT_PORT),
        }
    }
}

/// Patient-data service settings
#[derive(Debug, Clone)]
pub struct PatientsConfig {
    pub database: DatabaseConfig,
    pub port: u16,
}

impl PatientsConfig {
    pub const DEFAULT_PORT: u16 = 5000;

    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(),
            port: parse_var(&|key: &str| std::env::var(key).ok(), "PORT", Self::DEFAULT_PORT),
        }
    }
}

fn parse_var<F, T>(get: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
{
    match get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value {:?} for {}, using {}", raw, key, default);
            default
        }),
        None => default,
    }
}
