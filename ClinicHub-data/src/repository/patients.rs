use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::errors::RepositoryError;
use crate::database::DbPool;
use crate::models::patient::{Contact, NewContact, NewPatient, Patient};

/// Repository trait for patients and their contact entries
#[async_trait]
pub trait PatientRepositoryTrait {
    /// Insert a patient and return its new id
    async fn create_patient(&self, patient: NewPatient) -> Result<i64, RepositoryError>;

    /// Get a patient by id
    async fn get_patient(&self, id: i64) -> Result<Option<Patient>, RepositoryError>;

    /// Get every patient
    async fn list_patients(&self) -> Result<Vec<Patient>, RepositoryError>;

    /// Insert a contact entry for an existing patient and return its new id
    async fn add_contact(&self, contact: NewContact) -> Result<i64, RepositoryError>;

    /// Get the contact entries of one patient
    async fn get_contacts(&self, patient_id: i64) -> Result<Vec<Contact>, RepositoryError>;

    /// Get every contact entry
    async fn list_contacts(&self) -> Result<Vec<Contact>, RepositoryError>;
}

/// SQLite-backed patient repository
#[derive(Debug, Clone)]
pub struct PatientRepository {
    pool: DbPool,
}

impl PatientRepository {
    /// Create a repository over an initialized pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    let raw_date: String = row.get(3)?;
    let birth_date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        national_id: row.get(2)?,
        birth_date,
        sex: row.get(4)?,
    })
}

fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        phone: row.get(2)?,
        address: row.get(3)?,
    })
}

#[async_trait]
impl PatientRepositoryTrait for PatientRepository {
    async fn create_patient(&self, patient: NewPatient) -> Result<i64, RepositoryError> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO pacientes (nombre, dni, fecha_nac, sexo) VALUES (?1, ?2, ?3, ?4)",
            params![
                patient.name,
                patient.national_id,
                patient.birth_date.format(DATE_FORMAT).to_string(),
                patient.sex,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Stored patient {}", id);
        Ok(id)
    }

    async fn get_patient(&self, id: i64) -> Result<Option<Patient>, RepositoryError> {
        let conn = self.pool.get()?;

        let patient = conn
            .query_row(
                "SELECT id, nombre, dni, fecha_nac, sexo FROM pacientes WHERE id = ?1",
                [id],
                patient_from_row,
            )
            .optional()?;

        Ok(patient)
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, nombre, dni, fecha_nac, sexo FROM pacientes ORDER BY id")?;
        let patients = stmt
            .query_map([], patient_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(patients)
    }

    async fn add_contact(&self, contact: NewContact) -> Result<i64, RepositoryError> {
        let conn = self.pool.get()?;

        let exists = conn
            .query_row("SELECT id FROM pacientes WHERE id = ?1", [contact.patient_id], |row| {
                row.get::<_, i64>(0)
            })
            .optional()?;

        if exists.is_none() {
            return Err(RepositoryError::NotFound(format!("patient {}", contact.patient_id)));
        }

        conn.execute(
            "INSERT INTO contactos_pacientes (paciente_id, telefono, direccion) VALUES (?1, ?2, ?3)",
            params![contact.patient_id, contact.phone, contact.address],
        )?;

        let id = conn.last_insert_rowid();
        debug!("Stored contact {} for patient {}", id, contact.patient_id);
        Ok(id)
    }

    async fn get_contacts(&self, patient_id: i64) -> Result<Vec<Contact>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, paciente_id, telefono, direccion FROM contactos_pacientes
             WHERE paciente_id = ?1 ORDER BY id",
        )?;
        let contacts = stmt
            .query_map([patient_id], contact_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(contacts)
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT id, paciente_id, telefono, direccion FROM contactos_pacientes ORDER BY id")?;
        let contacts = stmt
            .query_map([], contact_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(contacts)
    }
}
