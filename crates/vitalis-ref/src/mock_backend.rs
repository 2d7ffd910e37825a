//! An in-memory stand-in for the persistence service.
//!
//! Entities travel through `serde_json` on the way in and out so the wire
//! shapes are exercised exactly as a REST client would see them. The backend
//! can be switched offline to simulate an unreachable service.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use vitalis_contracts::{
    endpoint::Endpoint,
    error::{VitalisError, VitalisResult},
    medication::{Medication, MedicationId},
    profile::UserProfile,
    report::{MedicalReport, ReportId},
    snapshot::HealthSnapshot,
    vital::VitalRecord,
};
use vitalis_core::traits::PersistenceService;

struct Tables {
    user: UserProfile,
    medications: Vec<Medication>,
    vitals: Vec<VitalRecord>,
    reports: Vec<MedicalReport>,
}

pub struct InMemoryBackend {
    tables: Mutex<Tables>,
    online: AtomicBool,
}

impl InMemoryBackend {
    pub fn from_snapshot(snapshot: HealthSnapshot) -> Self {
        Self {
            tables: Mutex::new(Tables {
                user: snapshot.user,
                medications: snapshot.medications,
                vitals: snapshot.vitals,
                reports: snapshot.reports,
            }),
            online: AtomicBool::new(true),
        }
    }

    /// While offline every call fails with `Collaborator`.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn medication_count(&self) -> usize {
        self.tables.lock().map(|t| t.medications.len()).unwrap_or(0)
    }

    pub fn vital_count(&self) -> usize {
        self.tables.lock().map(|t| t.vitals.len()).unwrap_or(0)
    }

    pub fn report_count(&self) -> usize {
        self.tables.lock().map(|t| t.reports.len()).unwrap_or(0)
    }

    /// Gate one call: fails when offline, logs the endpoint otherwise.
    fn open(&self, endpoint: Endpoint) -> VitalisResult<MutexGuard<'_, Tables>> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(failed(&endpoint, "service unreachable"));
        }
        debug!(endpoint = %endpoint, "persistence call");
        self.tables
            .lock()
            .map_err(|_| failed(&endpoint, "backend state lock poisoned"))
    }
}

fn failed(endpoint: &Endpoint, why: &str) -> VitalisError {
    VitalisError::Collaborator {
        reason: format!("{} failed: {}", endpoint, why),
    }
}

/// Serialize and decode again, as the value would cross the wire.
fn wire<T: Serialize + DeserializeOwned>(value: &T) -> VitalisResult<T> {
    serde_json::to_value(value)
        .and_then(serde_json::from_value)
        .map_err(|e| VitalisError::Collaborator {
            reason: format!("malformed JSON body: {}", e),
        })
}

impl PersistenceService for InMemoryBackend {
    fn fetch_user(&self) -> VitalisResult<UserProfile> {
        let tables = self.open(Endpoint::FetchUser)?;
        wire(&tables.user)
    }

    fn update_user(&self, user: &UserProfile) -> VitalisResult<UserProfile> {
        let mut tables = self.open(Endpoint::UpdateUser)?;
        tables.user = wire(user)?;
        wire(&tables.user)
    }

    fn fetch_medications(&self) -> VitalisResult<Vec<Medication>> {
        let tables = self.open(Endpoint::FetchMedications)?;
        wire(&tables.medications)
    }

    fn add_medication(&self, medication: &Medication) -> VitalisResult<Medication> {
        let mut tables = self.open(Endpoint::AddMedication)?;
        let stored = wire(medication)?;
        tables.medications.push(stored.clone());
        Ok(stored)
    }

    fn remove_medication(&self, id: &MedicationId) -> VitalisResult<Medication> {
        let endpoint = Endpoint::RemoveMedication(id.clone());
        let mut tables = self.open(endpoint.clone())?;
        let index = tables
            .medications
            .iter()
            .position(|m| &m.id == id)
            .ok_or_else(|| failed(&endpoint, "not found"))?;
        Ok(tables.medications.remove(index))
    }

    fn take_dose(&self, id: &MedicationId) -> VitalisResult<Medication> {
        let endpoint = Endpoint::TakeDose(id.clone());
        let mut tables = self.open(endpoint.clone())?;
        let medication = tables
            .medications
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or_else(|| failed(&endpoint, "not found"))?;
        medication.record_dose(chrono::Utc::now());
        wire(medication)
    }

    fn fetch_vitals(&self) -> VitalisResult<Vec<VitalRecord>> {
        let tables = self.open(Endpoint::FetchVitals)?;
        wire(&tables.vitals)
    }

    fn add_vital(&self, record: &VitalRecord) -> VitalisResult<VitalRecord> {
        let mut tables = self.open(Endpoint::AddVital)?;
        let stored = wire(record)?;
        tables.vitals.push(stored.clone());
        Ok(stored)
    }

    fn fetch_reports(&self) -> VitalisResult<Vec<MedicalReport>> {
        let tables = self.open(Endpoint::FetchReports)?;
        wire(&tables.reports)
    }

    fn add_report(&self, report: &MedicalReport) -> VitalisResult<MedicalReport> {
        let mut tables = self.open(Endpoint::AddReport)?;
        let stored = wire(report)?;
        tables.reports.insert(0, stored.clone());
        Ok(stored)
    }

    fn remove_report(&self, id: &ReportId) -> VitalisResult<MedicalReport> {
        let endpoint = Endpoint::RemoveReport(id.clone());
        let mut tables = self.open(endpoint.clone())?;
        let index = tables
            .reports
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| failed(&endpoint, "not found"))?;
        Ok(tables.reports.remove(index))
    }
}
