//! Outbound calls to the patient-data and consultation services.
//!
//! A call either yields the decoded JSON payload of a 200 response or one of
//! three failures: the collaborator could not be reached, it answered with any
//! other status, or it answered 200 with a body that is not valid JSON.
//! A bodyless success such as 204 counts as a rejection.
//! Callers decide how each failure is treated.

mod http;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub use http::{HttpUpstreamClient, UpstreamConfig};

/// Resources the orchestrator reads from its collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// `GET /pacientes/{id}` on the patient-data service
    Patient(i64),
    /// `GET /pacientes/{id}/contacto` on the patient-data service
    PatientContacts(i64),
    /// `GET /consultas/paciente/{id}` on the consultation service
    PatientConsultations(i64),
    /// `GET /medico/{id}` on the consultation service
    Physician(i64),
    /// `GET /consultas/medico/{id}` on the consultation service
    PhysicianConsultations(i64),
}

/// Collaborator that owns a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Patients,
    Consultations,
}

impl Resource {
    /// Service the resource lives on
    pub fn service(&self) -> Service {
        match self {
            Resource::Patient(_) | Resource::PatientContacts(_) => Service::Patients,
            Resource::PatientConsultations(_)
            | Resource::Physician(_)
            | Resource::PhysicianConsultations(_) => Service::Consultations,
        }
    }

    /// Path relative to the owning service's base URL
    pub fn path(&self) -> String {
        match self {
            Resource::Patient(id) => format!("/pacientes/{}", id),
            Resource::PatientContacts(id) => format!("/pacientes/{}/contacto", id),
            Resource::PatientConsultations(id) => format!("/consultas/paciente/{}", id),
            Resource::Physician(id) => format!("/medico/{}", id),
            Resource::PhysicianConsultations(id) => format!("/consultas/medico/{}", id),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Failure of a single outbound call
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UpstreamError {
    /// Connection or network failure reaching the collaborator
    #[error("Transport error calling {resource}: {message}")]
    Transport { resource: Resource, message: String },

    /// Collaborator answered with a status other than 200
    #[error("{resource} answered with status {status}")]
    Rejected { resource: Resource, status: u16 },

    /// Collaborator answered 200 with a payload that could not be decoded
    #[error("Malformed payload from {resource}: {message}")]
    Malformed { resource: Resource, message: String },
}

/// Client trait for the orchestrator's outbound calls
#[async_trait]
pub trait UpstreamClient {
    /// Fetch one resource, returning the decoded JSON payload of a 200 answer
    async fn fetch(&self, resource: Resource) -> Result<Value, UpstreamError>;
}
