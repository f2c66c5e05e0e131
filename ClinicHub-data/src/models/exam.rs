use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lab exam categories accepted by the exams API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamType {
    #[serde(rename = "Sangre")]
    Blood,
    #[serde(rename = "Radiografía")]
    XRay,
    #[serde(rename = "Tomografía")]
    Tomography,
    #[serde(rename = "Ultrasonido")]
    Ultrasound,
    #[serde(rename = "Electrocardiograma")]
    Electrocardiogram,
    #[serde(rename = "COVID")]
    Covid,
    #[serde(rename = "Orina")]
    Urine,
    #[serde(rename = "Biopsia")]
    Biopsy,
    #[serde(rename = "Colesterol")]
    Cholesterol,
    #[serde(rename = "Hígado")]
    Liver,
}

impl ExamType {
    /// Every exam type, in catalogue order
    pub const ALL: [ExamType; 10] = [
        ExamType::Blood,
        ExamType::XRay,
        ExamType::Tomography,
        ExamType::Ultrasound,
        ExamType::Electrocardiogram,
        ExamType::Covid,
        ExamType::Urine,
        ExamType::Biopsy,
        ExamType::Cholesterol,
        ExamType::Liver,
    ];

    /// Label used on the wire
    pub fn label(&self) -> &'static str {
        match self {
            ExamType::Blood => "Sangre",
            ExamType::XRay => "Radiografía",
            ExamType::Tomography => "Tomografía",
            ExamType::Ultrasound => "Ultrasonido",
            ExamType::Electrocardiogram => "Electrocardiograma",
            ExamType::Covid => "COVID",
            ExamType::Urine => "Orina",
            ExamType::Biopsy => "Biopsia",
            ExamType::Cholesterol => "Colesterol",
            ExamType::Liver => "Hígado",
        }
    }

    /// Parse a wire label, returning `None` for anything outside the catalogue
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Processing status of an exam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExamStatus {
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "completado")]
    Completed,
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl ExamStatus {
    pub const ALL: [ExamStatus; 3] = [ExamStatus::Pending, ExamStatus::Completed, ExamStatus::Cancelled];
}

/// Metric name to formatted value (value plus unit), in insertion order
pub type ExamResult = IndexMap<String, String>;

/// A lab exam record as submitted to the exams API or the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Patient identifier, sent as a decimal string
    #[serde(rename = "pacienteId", with = "id_as_string")]
    pub patient_id: u32,

    /// Physician identifier, sent as a decimal string
    #[serde(rename = "medicoId", with = "id_as_string")]
    pub physician_id: u32,

    #[serde(rename = "tipoExamen")]
    pub exam_type: ExamType,

    /// Creation instant, ISO-8601 without offset
    #[serde(rename = "fecha")]
    pub timestamp: NaiveDateTime,

    #[serde(rename = "estado")]
    pub status: ExamStatus,

    #[serde(rename = "resultado")]
    pub result: ExamResult,

    /// Free-text comment; omitted from the payload when absent
    #[serde(rename = "comentarios", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

mod id_as_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
