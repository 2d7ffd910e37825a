//! Medical document types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied unique identifier for a report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl ReportId {
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

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportType {
    #[serde(rename = "Lab Report")]
    LabReport,
    #[serde(rename = "Prescription")]
    Prescription,
    #[serde(rename = "Radiology")]
    Radiology,
    #[serde(rename = "Discharge Summary")]
    DischargeSummary,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::LabReport,
        ReportType::Prescription,
        ReportType::Radiology,
        ReportType::DischargeSummary,
        ReportType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportType::LabReport => "Lab Report",
            ReportType::Prescription => "Prescription",
            ReportType::Radiology => "Radiology",
            ReportType::DischargeSummary => "Discharge Summary",
            ReportType::Other => "Other",
        }
    }

    /// Case-insensitive lookup. Unrecognised labels map to `Other`.
    pub fn from_label_lenient(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label))
            .unwrap_or(ReportType::Other)
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A stored medical document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalReport {
    pub id: ReportId,
    pub title: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// "YYYY-MM-DD" by convention; not validated.
    pub date: String,
    pub summary: String,
    /// Data-URL encoded image, e.g. "data:image/jpeg;base64,...".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}
