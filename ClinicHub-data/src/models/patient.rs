use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage model for a patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Row identifier
    pub id: i64,

    /// Full name
    #[serde(rename = "nombre")]
    pub name: String,

    /// National identity document number
    #[serde(rename = "dni")]
    pub national_id: String,

    /// Date of birth
    #[serde(rename = "fecha_nac")]
    pub birth_date: NaiveDate,

    /// Sex, `M` or `F`
    #[serde(rename = "sexo")]
    pub sex: String,
}

/// Input data for inserting a patient
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub national_id: String,
    pub birth_date: NaiveDate,
    pub sex: String,
}

/// Storage model for a patient contact entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,

    /// Owning patient
    #[serde(rename = "paciente_id")]
    pub patient_id: i64,

    #[serde(rename = "telefono")]
    pub phone: String,

    #[serde(rename = "direccion")]
    pub address: String,
}

/// Input data for inserting a contact entry
#[derive(Debug, Clone)]
pub struct NewContact {
    pub patient_id: i64,
    pub phone: String,
    pub address: String,
}
