//! A full, serialisable copy of the store's state.

use serde::{Deserialize, Serialize};

use crate::{
    medication::Medication, profile::UserProfile, report::MedicalReport, vital::VitalRecord,
};

/// Everything the store holds, in display order.
///
/// Used to seed a store and to export it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSnapshot {
    pub user: UserProfile,
    pub medications: Vec<Medication>,
    pub vitals: Vec<VitalRecord>,
    /// Newest first.
    pub reports: Vec<MedicalReport>,
    pub health_score: u8,
}
