use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationErrors};

use clinic_hub_data::database::DbPool;
use clinic_hub_data::repository::{PatientRepository, PatientRepositoryTrait, RepositoryError};

use crate::entities::patient::{
    Contact, CreateContactRequest, CreatePatientRequest, CreatedId, NewContact, NewPatient, Patient,
};

const PATIENT_NOT_FOUND: &str = "Paciente no encontrado";
const NO_CONTACTS: &str = "No se encontraron contactos para el paciente";

/// Patient service errors.
///
/// `NotFound` carries a message fit for callers.
#[derive(Debug, Error)]
pub enum PatientServiceError {
    /// A required field is absent
    #[error("Faltan datos")]
    MissingData,

    /// A field is present but unusable
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Trait for patient service operations
#[async_trait]
pub trait PatientServiceTrait {
    /// Register a patient
    async fn create_patient(&self, request: CreatePatientRequest) -> Result<CreatedId, PatientServiceError>;

    /// Get a patient by id
    async fn get_patient(&self, id: i64) -> Result<Patient, PatientServiceError>;

    /// Get every patient
    async fn list_patients(&self) -> Result<Vec<Patient>, PatientServiceError>;

    /// Add a contact entry to an existing patient
    async fn add_contact(&self, request: CreateContactRequest) -> Result<CreatedId, PatientServiceError>;

    /// Contact entries of one patient; a patient without entries is not found
    async fn get_contacts(&self, patient_id: i64) -> Result<Vec<Contact>, PatientServiceError>;

    /// Get every contact entry
    async fn list_contacts(&self) -> Result<Vec<Contact>, PatientServiceError>;
}

/// Patient service for domain logic
pub struct PatientService<R: PatientRepositoryTrait> {
    repository: R,
}

impl<R: PatientRepositoryTrait> PatientService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn map_repo_error(&self, err: RepositoryError) -> PatientServiceError {
        match err {
            RepositoryError::NotFound(msg) => {
                info!("{}", msg);
                PatientServiceError::NotFound(PATIENT_NOT_FOUND.to_string())
            }
            _ => {
                error!("Repository failure: {}", err);
                PatientServiceError::RepositoryError(err.to_string())
            }
        }
    }
}

/// Missing fields win over malformed ones
fn validation_error(errors: ValidationErrors) -> PatientServiceError {
    let field_errors = errors.field_errors();

    if field_errors
        .values()
        .flat_map(|errs| errs.iter())
        .any(|err| err.code == "required")
    {
        return PatientServiceError::MissingData;
    }

    let message = field_errors
        .iter()
        .map(|(field, errs)| {
            let msgs: Vec<String> = errs
                .iter()
                .map(|err| match &err.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid {}", field),
                })
                .collect();
            format!("{}: {}", field, msgs.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ");

    PatientServiceError::ValidationError(message)
}

fn into_new_patient(request: CreatePatientRequest) -> Result<NewPatient, PatientServiceError> {
    request.validate().map_err(validation_error)?;

    let (Some(name), Some(national_id), Some(raw_date), Some(sex)) =
        (request.nombre, request.dni, request.fecha_nac, request.sexo)
    else {
        return Err(PatientServiceError::MissingData);
    };

    let birth_date = NaiveDate::parse_from_str(raw_date.trim(), "%Y-%m-%d").map_err(|_| {
        PatientServiceError::ValidationError(format!(
            "fecha_nac must be YYYY-MM-DD, got {}",
            raw_date
        ))
    })?;

    let sex = sex.trim().to_uppercase();
    if sex != "M" && sex != "F" {
        return Err(PatientServiceError::ValidationError(
            "sexo must be M or F".to_string(),
        ));
    }

    Ok(NewPatient {
        name,
        national_id,
        birth_date,
        sex,
    })
}

fn into_new_contact(request: CreateContactRequest) -> Result<NewContact, PatientServiceError> {
    request.validate().map_err(validation_error)?;

    let (Some(patient_id), Some(phone), Some(address)) =
        (request.id, request.telefono, request.direccion)
    else {
        return Err(PatientServiceError::MissingData);
    };

    Ok(NewContact {
        patient_id,
        phone,
        address,
    })
}

#[async_trait]
impl<R: PatientRepositoryTrait + Send + Sync> PatientServiceTrait for PatientService<R> {
    async fn create_patient(&self, request: CreatePatientRequest) -> Result<CreatedId, PatientServiceError> {
        let patient = into_new_patient(request)?;

        let id = self
            .repository
            .create_patient(patient)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        info!("Registered patient {}", id);
        Ok(CreatedId { id })
    }

    async fn get_patient(&self, id: i64) -> Result<Patient, PatientServiceError> {
        self.repository
            .get_patient(id)
            .await
            .map_err(|e| self.map_repo_error(e))?
            .ok_or_else(|| PatientServiceError::NotFound(PATIENT_NOT_FOUND.to_string()))
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, PatientServiceError> {
        self.repository
            .list_patients()
            .await
            .map_err(|e| self.map_repo_error(e))
    }

    async fn add_contact(&self, request: CreateContactRequest) -> Result<CreatedId, PatientServiceError> {
        let contact = into_new_contact(request)?;

        let id = self
            .repository
            .add_contact(contact)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        Ok(CreatedId { id })
    }

    async fn get_contacts(&self, patient_id: i64) -> Result<Vec<Contact>, PatientServiceError> {
        let contacts = self
            .repository
            .get_contacts(patient_id)
            .await
            .map_err(|e| self.map_repo_error(e))?;

        if contacts.is_empty() {
            return Err(PatientServiceError::NotFound(NO_CONTACTS.to_string()));
        }
        Ok(contacts)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, PatientServiceError> {
        self.repository
            .list_contacts()
            .await
            .map_err(|e| self.map_repo_error(e))
    }
}

/// Create a patient service backed by the SQLite repository
pub fn create_patient_service(pool: DbPool) -> impl PatientServiceTrait + Send + Sync {
    PatientService::new(PatientRepository::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockPatientRepository;

    fn request() -> CreatePatientRequest {
        CreatePatientRequest {
            nombre: Some("Ana Pérez".to_string()),
            dni: Some("30111222".to_string()),
            fecha_nac: Some("1990-04-02".to_string()),
            sexo: Some("F".to_string()),
        }
    }

    fn service() -> PatientService<MockPatientRepository> {
        PatientService::new(MockPatientRepository::new())
    }

    #[tokio::test]
    async fn test_create_and_get_patient() {
        let service = service();

        let created = service.create_patient(request()).await.unwrap();
        let patient = service.get_patient(created.id).await.unwrap();

        assert_eq!(patient.name, "Ana Pérez");
        assert_eq!(patient.birth_date, NaiveDate::from_ymd_opt(1990, 4, 2).unwrap());
        assert_eq!(service.list_patients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_field_is_missing_data() {
        let service = service();
        let mut req = request();
        req.dni = None;

        let err = service.create_patient(req).await.unwrap_err();

        assert!(matches!(err, PatientServiceError::MissingData));
        assert_eq!(err.to_string(), "Faltan datos");
    }

    #[tokio::test]
    async fn test_invalid_date_is_rejected() {
        let service = service();
        let mut req = request();
        req.fecha_nac = Some("02/04/1990".to_string());

        let err = service.create_patient(req).await.unwrap_err();

        assert!(matches!(err, PatientServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_invalid_sex_is_rejected() {
        let service = service();
        let mut req = request();
        req.sexo = Some("X".to_string());

        let err = service.create_patient(req).await.unwrap_err();

        assert!(matches!(err, PatientServiceError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_unknown_patient_is_not_found() {
        let err = service().get_patient(404).await.unwrap_err();
        assert!(matches!(err, PatientServiceError::NotFound(_)));
        assert_eq!(err.to_string(), "Paciente no encontrado");
    }

    #[tokio::test]
    async fn test_contacts_flow() {
        let service = service();
        let created = service.create_patient(request()).await.unwrap();

        // No contacts yet
        assert!(matches!(
            service.get_contacts(created.id).await,
            Err(PatientServiceError::NotFound(_))
        ));

        service
            .add_contact(CreateContactRequest {
                id: Some(created.id),
                telefono: Some("1155550000".to_string()),
                direccion: Some("Av. Siempreviva 742".to_string()),
            })
            .await
            .unwrap();

        let contacts = service.get_contacts(created.id).await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].phone, "1155550000");
        assert_eq!(service.list_contacts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_contact_for_unknown_patient() {
        let err = service()
            .add_contact(CreateContactRequest {
                id: Some(77),
                telefono: Some("1".to_string()),
                direccion: Some("somewhere".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PatientServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_contact_without_phone_is_missing_data() {
        let err = service()
            .add_contact(CreateContactRequest {
                id: Some(1),
                telefono: None,
                direccion: Some("somewhere".to_string()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PatientServiceError::MissingData));
    }

    #[tokio::test]
    async fn test_storage_failure_is_repository_error() {
        let service = PatientService::new(MockPatientRepository::new().with_failure());

        let err = service.list_patients().await.unwrap_err();

        assert!(matches!(err, PatientServiceError::RepositoryError(_)));
    }
}
