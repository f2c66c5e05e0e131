pub mod generator;
pub mod loader;
pub mod patients;
pub mod summary;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use generator::{ExamGenerator, GeneratorConfig};
pub use loader::{BatchOutcome, BulkLoader, ItemFailure, LoaderConfig};
pub use patients::{create_patient_service, PatientServiceError, PatientServiceTrait};
pub use summary::{create_summary_service, SummaryError, SummaryServiceTrait};
