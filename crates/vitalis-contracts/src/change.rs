//! Records of applied store mutations.
//!
//! The store emits exactly one `StoreChange` per mutation that altered state.
//! A mutation naming a missing id emits nothing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    endpoint::Endpoint,
    medication::{Medication, MedicationId},
    report::{MedicalReport, ReportId},
    vital::VitalRecord,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreChange {
    MedicationAdded { medication: Medication },
    MedicationRemoved { id: MedicationId },
    DoseTaken {
        id: MedicationId,
        taken_at: DateTime<Utc>,
        /// Inventory left after the dose.
        remaining: u32,
    },
    VitalLogged { record: VitalRecord },
    ReportAdded { report: MedicalReport },
    ReportRemoved { id: ReportId },
}

impl StoreChange {
    /// The persistence endpoint that replays this change.
    pub fn endpoint(&self) -> Endpoint {
        match self {
            StoreChange::MedicationAdded { .. } => Endpoint::AddMedication,
            StoreChange::MedicationRemoved { id } => Endpoint::RemoveMedication(id.clone()),
            StoreChange::DoseTaken { id, .. } => Endpoint::TakeDose(id.clone()),
            StoreChange::VitalLogged { .. } => Endpoint::AddVital,
            StoreChange::ReportAdded { .. } => Endpoint::AddReport,
            StoreChange::ReportRemoved { id } => Endpoint::RemoveReport(id.clone()),
        }
    }

    /// Short discriminant for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StoreChange::MedicationAdded { .. } => "medication_added",
            StoreChange::MedicationRemoved { .. } => "medication_removed",
            StoreChange::DoseTaken { .. } => "dose_taken",
            StoreChange::VitalLogged { .. } => "vital_logged",
            StoreChange::ReportAdded { .. } => "report_added",
            StoreChange::ReportRemoved { .. } => "report_removed",
        }
    }
}
