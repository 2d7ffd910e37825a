//! Partial records produced by document capture and AI extraction.
//!
//! Every field is optional. Promotion into a full record applies fixed
//! default-fill rules so the store only ever holds complete entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{VitalisError, VitalisResult},
    medication::{Medication, MedicationId},
    report::{MedicalReport, ReportId, ReportType},
};

/// Title used when a draft arrives without one.
pub const UNTITLED_REPORT: &str = "Untitled document";

/// A report whose fields may each be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    #[serde(default)]
    pub title: Option<String>,
    /// Free label; unrecognised values become `Other`.
    #[serde(default, rename = "type")]
    pub report_type: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ReportDraft {
    /// Overlay `other` on top of `self`: fields present in `other` win.
    pub fn merge(self, other: ReportDraft) -> ReportDraft {
        ReportDraft {
            title: non_blank(other.title).or(self.title),
            report_type: non_blank(other.report_type).or(self.report_type),
            date: non_blank(other.date).or(self.date),
            summary: non_blank(other.summary).or(self.summary),
            image_url: other.image_url.or(self.image_url),
        }
    }

    /// Fill defaults and produce a complete report.
    ///
    /// type → Other, date → `today`, summary → empty, title → [`UNTITLED_REPORT`].
    pub fn into_report(self, id: ReportId, today: NaiveDate) -> MedicalReport {
        MedicalReport {
            id,
            title: non_blank(self.title).unwrap_or_else(|| UNTITLED_REPORT.to_string()),
            report_type: self
                .report_type
                .as_deref()
                .map(ReportType::from_label_lenient)
                .unwrap_or_default(),
            date: non_blank(self.date).unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            summary: self.summary.unwrap_or_default(),
            image_url: self.image_url,
        }
    }
}

/// A medication as read off a prescription image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

impl MedicationCandidate {
    pub const DEFAULT_FREQUENCY: &'static str = "Daily";
    pub const DEFAULT_TIME: &'static str = "09:00";
    pub const DEFAULT_INVENTORY: u32 = 30;
    pub const DEFAULT_REFILL_THRESHOLD: u32 = 5;

    /// Promote to a full medication. A blank name is rejected.
    pub fn into_medication(self, id: MedicationId) -> VitalisResult<Medication> {
        let name = non_blank(self.name).ok_or_else(|| VitalisError::InvalidInput {
            reason: "medication name must not be empty".to_string(),
        })?;

        Ok(Medication {
            id,
            name,
            dosage: self.dosage.unwrap_or_default(),
            frequency: non_blank(self.frequency)
                .unwrap_or_else(|| Self::DEFAULT_FREQUENCY.to_string()),
            times: vec![Self::DEFAULT_TIME.to_string()],
            inventory: Self::DEFAULT_INVENTORY,
            refill_threshold: Self::DEFAULT_REFILL_THRESHOLD,
            instructions: None,
            last_taken: None,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
