// Repository module structure
pub mod errors;
mod patients;

// Re-export commonly used types
pub use errors::RepositoryError;
pub use patients::{PatientRepository, PatientRepositoryTrait};
