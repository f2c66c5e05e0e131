use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use clinic_hub_data::upstream::{
    HttpUpstreamClient, Resource, UpstreamClient, UpstreamConfig, UpstreamError,
};

use crate::entities::summary::{PatientSummary, PhysicianSummary};

/// Summary service errors
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The primary record does not exist upstream
    #[error("Paciente no encontrado")]
    PatientNotFound(i64),

    #[error("Médico no encontrado")]
    PhysicianNotFound(i64),

    /// Any other upstream failure that the summary cannot absorb
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

/// Trait for building composite views from the collaborators
#[async_trait]
pub trait SummaryServiceTrait {
    /// Patient record with its contacts and consultations
    async fn patient_summary(&self, patient_id: i64) -> Result<PatientSummary, SummaryError>;

    /// Physician record with their consultations
    async fn physician_summary(&self, physician_id: i64) -> Result<PhysicianSummary, SummaryError>;
}

/// Summary service over an upstream client
pub struct SummaryService<C: UpstreamClient> {
    client: C,
}

impl<C: UpstreamClient> SummaryService<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

/// Primary lookup: any answer other than 200 means the record does not exist, any
/// other failure propagates.
fn required(
    outcome: Result<Value, UpstreamError>,
    not_found: SummaryError,
) -> Result<Value, SummaryError> {
    match outcome {
        Ok(value) => Ok(value),
        Err(UpstreamError::Rejected { resource, status }) => {
            debug!("{} answered {}", resource, status);
            Err(not_found)
        }
        Err(err) => Err(err.into()),
    }
}

/// Dependent lookup: an unreachable collaborator or an answer other than 200
/// yields an empty list. A 200 payload that is not a JSON array is malformed.
fn or_empty(resource: Resource, outcome: Result<Value, UpstreamError>) -> Result<Vec<Value>, SummaryError> {
    match outcome {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(UpstreamError::Malformed {
            resource,
            message: format!("expected a JSON array, got {}", json_kind(&other)),
        }
        .into()),
        Err(err @ UpstreamError::Malformed { .. }) => Err(err.into()),
        Err(err) => {
            warn!("Degrading {} to an empty list: {}", resource, err);
            Ok(Vec::new())
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl<C: UpstreamClient + Send + Sync> SummaryServiceTrait for SummaryService<C> {
    async fn patient_summary(&self, patient_id: i64) -> Result<PatientSummary, SummaryError> {
        let patient = required(
            self.client.fetch(Resource::Patient(patient_id)).await,
            SummaryError::PatientNotFound(patient_id),
        )?;

        let contacts_resource = Resource::PatientContacts(patient_id);
        let consultations_resource = Resource::PatientConsultations(patient_id);
        let (contacts, consultations) = tokio::join!(
            self.client.fetch(contacts_resource),
            self.client.fetch(consultations_resource),
        );

        Ok(PatientSummary {
            patient,
            contacts: or_empty(contacts_resource, contacts)?,
            consultations: or_empty(consultations_resource, consultations)?,
        })
    }

    async fn physician_summary(&self, physician_id: i64) -> Result<PhysicianSummary, SummaryError> {
        let physician = required(
            self.client.fetch(Resource::Physician(physician_id)).await,
            SummaryError::PhysicianNotFound(physician_id),
        )?;

        let consultations_resource = Resource::PhysicianConsultations(physician_id);
        let consultations = self.client.fetch(consultations_resource).await;

        Ok(PhysicianSummary {
            physician,
            consultations: or_empty(consultations_resource, consultations)?,
        })
    }
}

/// Create a summary service that talks to the collaborators over HTTP
pub fn create_summary_service(
    config: UpstreamConfig,
) -> Result<impl SummaryServiceTrait + Send + Sync, reqwest::Error> {
    let client = HttpUpstreamClient::new(config)?;
    Ok(SummaryService::new(client))
}
