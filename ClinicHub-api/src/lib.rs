// ClinicHub-api lib.rs
//
// HTTP surfaces of ClinicHub: the summary orchestrator and the
// patient-data service. Both binaries under src/bin build on this library.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod server;
pub mod telemetry;
