// Exam records share one representation across generation, transport and storage.
pub use clinic_hub_data::models::exam::{ExamRecord, ExamResult, ExamStatus, ExamType};
