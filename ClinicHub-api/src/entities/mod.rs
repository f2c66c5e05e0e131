// Public entities for the ClinicHub HTTP surfaces

// Common entities for error handling and liveness
pub mod common;
