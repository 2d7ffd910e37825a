//! Collaborator trait definitions.
//!
//! The store itself performs no I/O. These traits describe the three
//! collaborators that sit around it:
//!
//! - `PersistenceService`: the REST backend the in-memory state mirrors
//! - `DocumentAnalyzer`: the AI service that reads images
//! - `ChangeJournal`: the sink that records every applied mutation
//!
//! Collaborator failures are reported to the caller and never alter store
//! state.

use vitalis_contracts::{
    change::StoreChange,
    draft::{MedicationCandidate, ReportDraft},
    error::VitalisResult,
    medication::{Medication, MedicationId},
    profile::UserProfile,
    report::{MedicalReport, ReportId},
    vital::VitalRecord,
};

/// The persistence backend.
///
/// Every call returns the affected entity or entity list. Any non-success
/// outcome is surfaced as `VitalisError::Collaborator`; no structured error
/// body is assumed.
pub trait PersistenceService: Send + Sync {
    fn fetch_user(&self) -> VitalisResult<UserProfile>;
    fn update_user(&self, user: &UserProfile) -> VitalisResult<UserProfile>;

    fn fetch_medications(&self) -> VitalisResult<Vec<Medication>>;
    fn add_medication(&self, medication: &Medication) -> VitalisResult<Medication>;
    fn remove_medication(&self, id: &MedicationId) -> VitalisResult<Medication>;
    fn take_dose(&self, id: &MedicationId) -> VitalisResult<Medication>;

    fn fetch_vitals(&self) -> VitalisResult<Vec<VitalRecord>>;
    fn add_vital(&self, record: &VitalRecord) -> VitalisResult<VitalRecord>;

    fn fetch_reports(&self) -> VitalisResult<Vec<MedicalReport>>;
    fn add_report(&self, report: &MedicalReport) -> VitalisResult<MedicalReport>;
    fn remove_report(&self, id: &ReportId) -> VitalisResult<MedicalReport>;
}

/// The AI extraction service.
///
/// Implementations fail closed: when the service is unavailable or its reply
/// is not well-formed, they return an empty list or `None` rather than an
/// error. The store never calls this trait; a higher layer feeds its output
/// into `add_medication` / `add_report_draft`.
pub trait DocumentAnalyzer: Send + Sync {
    /// Read a prescription image and list the medications on it.
    fn extract_medications(&self, image: &[u8]) -> Vec<MedicationCandidate>;

    /// Classify a medical document and guess its title, type, date, summary.
    fn classify_document(&self, image: &[u8]) -> Option<ReportDraft>;
}

/// Append-only record of applied store changes.
///
/// The store calls `append` once per mutation that altered state. A failed
/// append is logged by the store and does not undo the mutation.
pub trait ChangeJournal: Send + Sync {
    fn append(&self, change: &StoreChange) -> VitalisResult<()>;
}
