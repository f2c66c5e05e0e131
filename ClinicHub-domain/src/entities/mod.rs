// Domain entities
pub mod exam;
pub mod patient;
pub mod summary;
