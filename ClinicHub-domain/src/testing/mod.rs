// Testing utilities and mock implementations for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use clinic_hub_data::repository::{PatientRepositoryTrait, RepositoryError};
use clinic_hub_data::sink::{ExamSink, SinkError};
use clinic_hub_data::upstream::{Resource, UpstreamClient, UpstreamError};

use crate::entities::exam::ExamRecord;
use crate::entities::patient::{Contact, NewContact, NewPatient, Patient};

/// Upstream client answering from a fixed table of canned results.
///
/// Resources without an entry fail with a transport error, as if the
/// collaborator were down. Every call is recorded.
#[derive(Default)]
pub struct MockUpstreamClient {
    responses: HashMap<Resource, Result<Value, UpstreamError>>,
    calls: Mutex<Vec<Resource>>,
}

impl MockUpstreamClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `resource` with a 200 carrying `payload`
    pub fn with_response(mut self, resource: Resource, payload: Value) -> Self {
        self.responses.insert(resource, Ok(payload));
        self
    }

    /// Answer `resource` with any status other than 200
    pub fn with_rejection(mut self, resource: Resource, status: u16) -> Self {
        self.responses
            .insert(resource, Err(UpstreamError::Rejected { resource, status }));
        self
    }

    /// Answer `resource` with a 200 whose body is not valid JSON
    pub fn with_malformed(mut self, resource: Resource) -> Self {
        self.responses.insert(
            resource,
            Err(UpstreamError::Malformed {
                resource,
                message: "expected value at line 1 column 1".to_string(),
            }),
        );
        self
    }

    /// Resources fetched so far, in call order
    pub fn calls(&self) -> Vec<Resource> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for MockUpstreamClient {
    async fn fetch(&self, resource: Resource) -> Result<Value, UpstreamError> {
        self.calls.lock().unwrap().push(resource);

        self.responses.get(&resource).cloned().unwrap_or_else(|| {
            Err(UpstreamError::Transport {
                resource,
                message: "connection refused".to_string(),
            })
        })
    }
}

type Script = Box<dyn Fn(usize) -> Result<(), SinkError> + Send + Sync>;

/// Sink whose answer is decided by a closure over the 1-based call number
pub struct ScriptedSink {
    script: Script,
    calls: AtomicUsize,
    accepted: Mutex<Vec<ExamRecord>>,
}

impl ScriptedSink {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(usize) -> Result<(), SinkError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            calls: AtomicUsize::new(0),
            accepted: Mutex::new(Vec::new()),
        }
    }

    /// Sink that accepts every record
    pub fn accepting() -> Self {
        Self::new(|_| Ok(()))
    }

    /// Number of submissions received, retries included
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Records that were accepted
    pub fn accepted(&self) -> Vec<ExamRecord> {
        self.accepted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExamSink for ScriptedSink {
    async fn submit(&self, record: &ExamRecord) -> Result<(), SinkError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        (self.script)(call)?;
        self.accepted.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// In-memory patient repository
#[derive(Default)]
pub struct MockPatientRepository {
    patients: RwLock<Vec<Patient>>,
    contacts: RwLock<Vec<Contact>>,
    should_fail: bool,
}

impl MockPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure every call to fail with a storage error
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    fn check(&self) -> Result<(), RepositoryError> {
        if self.should_fail {
            Err(RepositoryError::Corrupt(
                "mock is configured to fail".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PatientRepositoryTrait for MockPatientRepository {
    async fn create_patient(&self, patient: NewPatient) -> Result<i64, RepositoryError> {
        self.check()?;
        let mut patients = self.patients.write().unwrap();
        let id = patients.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        patients.push(Patient {
            id,
            name: patient.name,
            national_id: patient.national_id,
            birth_date: patient.birth_date,
            sex: patient.sex,
        });
        Ok(id)
    }

    async fn get_patient(&self, id: i64) -> Result<Option<Patient>, RepositoryError> {
        self.check()?;
        let patients = self.patients.read().unwrap();
        Ok(patients.iter().find(|p| p.id == id).cloned())
    }

    async fn list_patients(&self) -> Result<Vec<Patient>, RepositoryError> {
        self.check()?;
        Ok(self.patients.read().unwrap().clone())
    }

    async fn add_contact(&self, contact: NewContact) -> Result<i64, RepositoryError> {
        self.check()?;
        if !self
            .patients
            .read()
            .unwrap()
            .iter()
            .any(|p| p.id == contact.patient_id)
        {
            return Err(RepositoryError::NotFound(format!(
                "Patient {} not found",
                contact.patient_id
            )));
        }

        let mut contacts = self.contacts.write().unwrap();
        let id = contacts.len() as i64 + 1;
        contacts.push(Contact {
            id,
            patient_id: contact.patient_id,
            phone: contact.phone,
            address: contact.address,
        });
        Ok(id)
    }

    async fn get_contacts(&self, patient_id: i64) -> Result<Vec<Contact>, RepositoryError> {
        self.check()?;
        let contacts = self.contacts.read().unwrap();
        Ok(contacts
            .iter()
            .filter(|c| c.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, RepositoryError> {
        self.check()?;
        Ok(self.contacts.read().unwrap().clone())
    }
}
