//! Synthetic lab exam records.
//!
//! Every exam type maps to exactly one result builder, so a record's
//! `resultado` keys are fully determined by its `tipoExamen`. Randomness is
//! always supplied by the caller; seed the RNG to get reproducible batches.

use std::ops::RangeInclusive;

use chrono::{Local, NaiveDateTime, SubsecRound};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::entities::exam::{ExamRecord, ExamResult, ExamStatus, ExamType};

/// Identifier ranges and comment rate used when generating records
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub patient_ids: RangeInclusive<u32>,
    pub physician_ids: RangeInclusive<u32>,
    /// Probability that a record carries a comment
    pub comment_probability: f64,
}

impl GeneratorConfig {
    /// Ranges expected by the exams HTTP API (8-digit patient ids)
    pub fn for_exams_api() -> Self {
        Self {
            patient_ids: 10_000_000..=99_999_999,
            physician_ids: 1..=100,
            comment_probability: 0.8,
        }
    }

    /// Ranges used when loading the document store directly
    pub fn for_document_store() -> Self {
        Self {
            patient_ids: 1..=200_000,
            physician_ids: 1..=100,
            comment_probability: 0.8,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::for_exams_api()
    }
}

/// Produces independent exam records from a caller-supplied RNG
#[derive(Debug, Clone, Default)]
pub struct ExamGenerator {
    config: GeneratorConfig,
}

impl ExamGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate the record for batch position `index`, stamped with the current local time
    pub fn generate<R: RngCore + ?Sized>(&self, rng: &mut R, index: usize) -> ExamRecord {
        self.generate_at(rng, index, now_to_the_second())
    }

    /// Generate the record for batch position `index` with an explicit timestamp
    pub fn generate_at<R: RngCore + ?Sized>(
        &self,
        rng: &mut R,
        index: usize,
        timestamp: NaiveDateTime,
    ) -> ExamRecord {
        let exam_type = *ExamType::ALL.choose(rng).unwrap_or(&ExamType::Blood);
        let status = *ExamStatus::ALL.choose(rng).unwrap_or(&ExamStatus::Pending);

        ExamRecord {
            patient_id: rng.gen_range(self.config.patient_ids.clone()),
            physician_id: rng.gen_range(self.config.physician_ids.clone()),
            exam_type,
            timestamp,
            status,
            result: build_result(exam_type, rng),
            comment: rng
                .gen_bool(self.config.comment_probability)
                .then(|| format!("Observación general del examen {}", index)),
        }
    }
}

/// Pure result builder for one exam type
pub type ResultBuilder = fn(&mut dyn RngCore) -> ExamResult;

/// Builder that produces the result schema of `exam_type`
pub fn result_builder(exam_type: ExamType) -> ResultBuilder {
    match exam_type {
        ExamType::Blood => blood,
        ExamType::XRay => x_ray,
        ExamType::Tomography => tomography,
        ExamType::Ultrasound => ultrasound,
        ExamType::Electrocardiogram => electrocardiogram,
        ExamType::Covid => covid,
        ExamType::Urine => urine,
        ExamType::Biopsy => biopsy,
        ExamType::Cholesterol => cholesterol,
        ExamType::Liver => liver,
    }
}

/// Build a result for a known exam type
pub fn build_result<R: RngCore + ?Sized>(exam_type: ExamType, mut rng: &mut R) -> ExamResult {
    result_builder(exam_type)(&mut rng)
}

/// Build a result for a raw exam label; labels outside the catalogue get the placeholder result
pub fn result_for_label<R: RngCore + ?Sized>(label: &str, rng: &mut R) -> ExamResult {
    match ExamType::from_label(label) {
        Some(exam_type) => build_result(exam_type, rng),
        None => fallback_result(),
    }
}

/// Single-field "no result" placeholder
pub fn fallback_result() -> ExamResult {
    result([("Observación", "Sin resultados".to_string())])
}

fn result<const N: usize>(fields: [(&str, String); N]) -> ExamResult {
    fields
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn pick(rng: &mut dyn RngCore, options: &[&str]) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}

fn one_decimal(rng: &mut dyn RngCore, range: RangeInclusive<f64>, unit: &str) -> String {
    format!("{:.1} {}", rng.gen_range(range), unit)
}

fn whole(rng: &mut dyn RngCore, range: RangeInclusive<u32>, unit: &str) -> String {
    format!("{} {}", rng.gen_range(range), unit)
}

fn blood(rng: &mut dyn RngCore) -> ExamResult {
    result([
        ("Hemoglobina", one_decimal(rng, 12.0..=17.0, "g/dL")),
        ("Glóbulos blancos", whole(rng, 4_000..=11_000, "/µL")),
        ("Plaquetas", whole(rng, 150_000..=450_000, "/µL")),
    ])
}

fn x_ray(rng: &mut dyn RngCore) -> ExamResult {
    result([(
        "Observación",
        pick(rng, &["Sin fracturas", "Lesión detectada", "Neumonía sospechosa"]),
    )])
}

fn tomography(rng: &mut dyn RngCore) -> ExamResult {
    result([
        ("Área analizada", pick(rng, &["Craneo", "Tórax", "Abdomen"])),
        ("Resultado", pick(rng, &["Normal", "Anomalía detectada"])),
    ])
}

fn ultrasound(rng: &mut dyn RngCore) -> ExamResult {
    result([
        ("Hígado", pick(rng, &["Normal", "Inflamado"])),
        ("Riñones", pick(rng, &["Normal", "Piedras detectadas"])),
    ])
}

fn electrocardiogram(rng: &mut dyn RngCore) -> ExamResult {
    result([
        ("Ritmo", pick(rng, &["Normal", "Arritmia"])),
        ("Frecuencia", whole(rng, 60..=100, "bpm")),
    ])
}

fn covid(rng: &mut dyn RngCore) -> ExamResult {
    result([
        ("Resultado", pick(rng, &["Positivo", "Negativo"])),
        ("Carga viral", whole(rng, 1_000..=100_000, "copias/mL")),
    ])
}

fn urine(rng: &mut dyn RngCore) -> ExamResult {
    result([
        ("Color", pick(rng, &["Amarillo", "Ámbar", "Claro"])),
        ("Proteínas", pick(rng, &["Negativo", "Traza", "Positivo"])),
        ("Glucosa", pick(rng, &["Negativo", "Positivo"])),
    ])
}

fn biopsy(rng: &mut dyn RngCore) -> ExamResult {
    result([
        ("Diagnóstico", pick(rng, &["Benigno", "Maligno"])),
        ("Inflamación", pick(rng, &["Presente", "Ausente"])),
    ])
}

fn cholesterol(rng: &mut dyn RngCore) -> ExamResult {
    result([
        ("LDL", whole(rng, 70..=190, "mg/dL")),
        ("HDL", whole(rng, 40..=90, "mg/dL")),
        ("Triglicéridos", whole(rng, 100..=250, "mg/dL")),
    ])
}

fn liver(rng: &mut dyn RngCore) -> ExamResult {
    result([
        ("ALT", whole(rng, 10..=50, "U/L")),
        ("AST", whole(rng, 10..=40, "U/L")),
        ("Bilirrubina", one_decimal(rng, 0.3..=1.2, "mg/dL")),
    ])
}

/// `fecha` is written as `YYYY-MM-DDTHH:MM:SS`, so sub-second precision is dropped
fn now_to_the_second() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}
