//! Read-only views derived from the store's lists.
//!
//! Nothing here mutates or performs I/O; every function completes in one
//! synchronous call.

use std::fmt;

use serde::Serialize;

use vitalis_contracts::{
    medication::{Medication, MedicationId},
    profile::{EmergencyContact, UserProfile},
    vital::{VitalRecord, VitalType},
};

// ── Vital series ─────────────────────────────────────────────────────────────

/// The records of one vital type, ascending by timestamp.
///
/// Ties keep their log order. The series borrows from the store and can be
/// iterated any number of times.
#[derive(Debug, Clone)]
pub struct VitalSeries<'a> {
    vital_type: VitalType,
    records: Vec<&'a VitalRecord>,
}

impl<'a> VitalSeries<'a> {
    /// Filter `log` to `vital_type` and stable-sort by timestamp.
    pub fn collect(log: &'a [VitalRecord], vital_type: VitalType) -> Self {
        let mut records: Vec<&VitalRecord> =
            log.iter().filter(|v| v.vital_type == vital_type).collect();
        records.sort_by_key(|v| v.timestamp);
        Self { vital_type, records }
    }

    pub fn vital_type(&self) -> VitalType {
        self.vital_type
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a VitalRecord> + Clone + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&'a VitalRecord> {
        self.records.last().copied()
    }

    /// One chart point per record; unparseable values become `None`.
    pub fn points(&self) -> Vec<TrendPoint> {
        self.iter()
            .map(|v| TrendPoint {
                timestamp: v.timestamp,
                value: v.primary_value(),
            })
            .collect()
    }

    /// Rounded mean of the positive primary values in the series.
    pub fn summary(&self) -> TrendSummary {
        let values: Vec<f64> = self
            .iter()
            .filter_map(VitalRecord::primary_value)
            .filter(|v| *v > 0.0)
            .collect();

        if values.is_empty() {
            return TrendSummary::NoData {
                vital_type: self.vital_type,
            };
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        TrendSummary::Average {
            vital_type: self.vital_type,
            value: mean.round() as i64,
            samples: values.len(),
        }
    }
}

impl<'s, 'a> IntoIterator for &'s VitalSeries<'a> {
    type Item = &'a VitalRecord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'s, &'a VitalRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter().copied()
    }
}

/// A single chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub value: Option<f64>,
}

/// The local trend insight for one vital type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendSummary {
    NoData { vital_type: VitalType },
    Average {
        vital_type: VitalType,
        /// Arithmetic mean rounded to the nearest integer.
        value: i64,
        samples: usize,
    },
}

impl TrendSummary {
    pub fn average(&self) -> Option<i64> {
        match self {
            TrendSummary::NoData { .. } => None,
            TrendSummary::Average { value, .. } => Some(*value),
        }
    }
}

impl fmt::Display for TrendSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendSummary::NoData { .. } => f.write_str("No vitals available to analyze."),
            TrendSummary::Average { vital_type, value, .. } => write!(
                f,
                "Average {} in view: {}. Keep monitoring and consult your doctor if needed.",
                vital_type, value
            ),
        }
    }
}

/// Newest-first window of at most `limit` records across all types.
pub fn recent_vitals(log: &[VitalRecord], limit: usize) -> Vec<&VitalRecord> {
    let mut records: Vec<&VitalRecord> = log.iter().collect();
    // Stable sort on the reversed key keeps log order for equal timestamps.
    records.sort_by_key(|v| std::cmp::Reverse(v.timestamp));
    records.truncate(limit);
    records
}

// ── Refill ───────────────────────────────────────────────────────────────────

/// Medications at or below their refill threshold, in list order.
pub fn refill_due(medications: &[Medication]) -> Vec<&Medication> {
    medications.iter().filter(|m| m.is_refill_due()).collect()
}

/// The dashboard banner for low stock, naming the first medication due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefillAlert {
    pub medication_id: MedicationId,
    pub medication_name: String,
    pub inventory: u32,
    pub refill_threshold: u32,
    /// How many further medications are also due.
    pub others_due: usize,
}

impl RefillAlert {
    pub fn from_due(due: &[&Medication]) -> Option<Self> {
        let (first, rest) = due.split_first()?;
        Some(Self {
            medication_id: first.id.clone(),
            medication_name: first.name.clone(),
            inventory: first.inventory,
            refill_threshold: first.refill_threshold,
            others_due: rest.len(),
        })
    }
}

impl fmt::Display for RefillAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You are running low on {}. Contact your pharmacy.",
            self.medication_name
        )?;
        match self.others_due {
            0 => Ok(()),
            1 => f.write_str(" 1 other medication also needs a refill."),
            n => write!(f, " {} other medications also need a refill.", n),
        }
    }
}

// ── Emergency card ───────────────────────────────────────────────────────────

/// What a first responder needs to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyCard {
    pub name: String,
    pub age: u32,
    pub blood_type: String,
    pub allergies: Vec<String>,
    pub contact: EmergencyContact,
    /// (name, dosage) of every current medication.
    pub medications: Vec<(String, String)>,
}

impl EmergencyCard {
    pub fn build(user: &UserProfile, medications: &[Medication]) -> Self {
        Self {
            name: user.name.clone(),
            age: user.age,
            blood_type: user.blood_type.clone(),
            allergies: user.allergies.iter().map(str::to_string).collect(),
            contact: user.emergency_contact.clone(),
            medications: medications
                .iter()
                .map(|m| (m.name.clone(), m.dosage.clone()))
                .collect(),
        }
    }
}
