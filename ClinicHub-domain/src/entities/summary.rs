use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Composite view of a patient: the patient record plus contacts and consultations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    #[serde(rename = "paciente")]
    pub patient: Value,

    #[serde(rename = "contactos")]
    pub contacts: Vec<Value>,

    #[serde(rename = "consultas")]
    pub consultations: Vec<Value>,
}

/// Composite view of a physician: the physician record plus their consultations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicianSummary {
    #[serde(rename = "medico")]
    pub physician: Value,

    #[serde(rename = "consultas")]
    pub consultations: Vec<Value>,
}
