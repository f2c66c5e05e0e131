pub mod health;
pub mod patients;
pub mod summary;


// Re-export handlers for easier imports
pub use health::{health_check, orchestrator_root, patients_root};
pub use summary::{get_patient_summary, get_physician_summary};
