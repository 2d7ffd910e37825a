//! Medication inventory and dose tracking types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied unique identifier for a medication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicationId(pub String);

impl MedicationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MedicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A medication the user takes on a schedule.
///
/// `inventory` counts remaining doses and never goes below zero. The only
/// in-place mutation is [`Medication::record_dose`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    /// Free text, e.g. "500mg".
    pub dosage: String,
    /// Free-text label, e.g. "Twice Daily".
    pub frequency: String,
    /// Scheduled times as "HH:MM" strings, in display order.
    pub times: Vec<String>,
    pub inventory: u32,
    pub refill_threshold: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_taken: Option<DateTime<Utc>>,
}

impl Medication {
    /// True when the remaining inventory has fallen to or below the threshold.
    pub fn is_refill_due(&self) -> bool {
        self.inventory <= self.refill_threshold
    }

    /// Apply one administered dose: inventory decrements, floor-clamped at 0.
    pub fn record_dose(&mut self, at: DateTime<Utc>) {
        self.inventory = self.inventory.saturating_sub(1);
        self.last_taken = Some(at);
    }

    /// The first scheduled time, if any.
    pub fn next_scheduled_time(&self) -> Option<&str> {
        self.times.first().map(String::as_str)
    }
}
