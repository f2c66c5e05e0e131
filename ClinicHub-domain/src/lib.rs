// ClinicHub Domain
// This crate contains the business logic for the ClinicHub services

// Services that implement business logic
pub mod services;

// Domain entities
pub mod entities;

// Batch failure report artifact
pub mod report;

// Re-export the data layer for convenience
pub use clinic_hub_data as data;

// Testing utilities - only available with mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
