// Storage and wire models shared by the services
pub mod exam;
pub mod patient;
