use serde::{Deserialize, Serialize};
use validator::Validate;

pub use clinic_hub_data::models::patient::{Contact, NewContact, NewPatient, Patient};

/// Request payload for registering a patient.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation failure rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreatePatientRequest {
    #[validate(required, length(min = 1, max = 100, message = "nombre must be 1-100 characters"))]
    pub nombre: Option<String>,

    #[validate(required, length(min = 1, max = 20, message = "dni must be 1-20 characters"))]
    pub dni: Option<String>,

    /// Date of birth, `YYYY-MM-DD`
    #[validate(required)]
    pub fecha_nac: Option<String>,

    #[validate(required)]
    pub sexo: Option<String>,
}

/// Request payload for adding a contact entry to a patient
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateContactRequest {
    /// Patient id
    #[validate(required)]
    pub id: Option<i64>,

    #[validate(required, length(min = 1, max = 15, message = "telefono must be 1-15 characters"))]
    pub telefono: Option<String>,

    #[validate(required, length(min = 1, max = 255, message = "direccion must be 1-255 characters"))]
    pub direccion: Option<String>,
}

/// Identifier of a newly created row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: i64,
}
