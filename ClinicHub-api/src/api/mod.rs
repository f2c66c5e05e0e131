pub mod handlers;
pub mod routes;


pub use routes::{create_orchestrator_app, create_patients_app};
