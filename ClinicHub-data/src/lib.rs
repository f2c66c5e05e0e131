// ClinicHub Data
// This crate handles data access and external service interactions

// SQLite connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Storage and wire models
pub mod models;

// Outbound calls to the patient-data and consultation services
pub mod upstream;

// Destinations for generated exam records
pub mod sink;
