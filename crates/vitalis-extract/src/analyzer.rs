//! A `DocumentAnalyzer` built on any text-generation client.
//!
//! `ModelAnalyzer` owns the prompts and the reply parsing; the transport is
//! supplied by the host through `ModelClient`. Every path fails closed: a
//! transport error, an empty reply, or a reply that does not validate
//! produces an empty list, `None`, or a fixed fallback sentence.

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use vitalis_contracts::{
    draft::{MedicationCandidate, ReportDraft},
    error::VitalisResult,
    vital::VitalRecord,
};
use vitalis_core::traits::DocumentAnalyzer;

use crate::parse::{parse_document, parse_medications};

pub const PRESCRIPTION_PROMPT: &str = "Analyze this prescription image. Extract a list of medications.\n\
Return a JSON array where each object has:\n\
- name (string)\n\
- dosage (string)\n\
- frequency (string, e.g. \"Once a day\", \"Morning and Night\")\n\
\n\
Strictly return JSON.";

pub const DOCUMENT_PROMPT: &str = "Analyze this medical document.\n\
Identify the type (Lab Report, Radiology, Discharge Summary, Prescription, or Other).\n\
Extract the date of the report (YYYY-MM-DD format if possible, otherwise string).\n\
Generate a short, 1-sentence summary of the key finding or content.\n\
Suggest a Title for this document.\n\
\n\
Return JSON with keys: type, date, summary, title.\n\
Strictly return JSON.";

pub const NO_INSIGHT_DATA: &str = "No data available for analysis.";
pub const INSIGHT_UNAVAILABLE: &str = "AI Insights temporarily unavailable.";
pub const INSIGHT_EMPTY: &str = "Unable to generate insights at this time.";

/// What the request is for. Clients may route tasks to different models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTask {
    PrescriptionScan,
    DocumentClassification,
    VitalInsight,
}

/// An inline image attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 without a data-URL prefix.
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRequest {
    pub task: ModelTask,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<InlineImage>,
}

/// The transport to a text-generation service.
///
/// Returns the reply text, `Ok(None)` for an empty reply, or an error when the
/// service is unreachable or unconfigured.
pub trait ModelClient: Send + Sync {
    fn generate(&self, request: &ModelRequest) -> VitalisResult<Option<String>>;
}

/// Prompts a `ModelClient` and parses its replies.
pub struct ModelAnalyzer<C> {
    client: C,
    image_mime_type: String,
}

impl<C: ModelClient> ModelAnalyzer<C> {
    /// Images are sent as JPEG unless overridden.
    pub fn new(client: C) -> Self {
        Self {
            client,
            image_mime_type: "image/jpeg".to_string(),
        }
    }

    pub fn with_image_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.image_mime_type = mime_type.into();
        self
    }

    fn image_request(&self, task: ModelTask, prompt: &str, image: &[u8]) -> ModelRequest {
        ModelRequest {
            task,
            prompt: prompt.to_string(),
            image: Some(InlineImage {
                mime_type: self.image_mime_type.clone(),
                data: STANDARD.encode(image),
            }),
        }
    }

    /// Send `request`, folding transport errors and empty replies into `None`.
    fn reply(&self, request: &ModelRequest) -> Option<String> {
        match self.client.generate(request) {
            Ok(Some(text)) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                debug!(task = ?request.task, "model returned an empty reply");
                None
            }
            Err(e) => {
                warn!(task = ?request.task, error = %e, "model call failed");
                None
            }
        }
    }

    /// A short plain-language observation over the newest vitals.
    ///
    /// `recent` is expected newest first. Returns a fixed sentence when there
    /// is nothing to analyse or the service fails.
    pub fn vital_insight(&self, recent: &[&VitalRecord]) -> String {
        if recent.is_empty() {
            return NO_INSIGHT_DATA.to_string();
        }

        let request = ModelRequest {
            task: ModelTask::VitalInsight,
            prompt: insight_prompt(recent),
            image: None,
        };

        match self.client.generate(&request) {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => INSIGHT_EMPTY.to_string(),
            Err(e) => {
                warn!(error = %e, "insight call failed");
                INSIGHT_UNAVAILABLE.to_string()
            }
        }
    }
}

impl<C: ModelClient> DocumentAnalyzer for ModelAnalyzer<C> {
    fn extract_medications(&self, image: &[u8]) -> Vec<MedicationCandidate> {
        let request = self.image_request(ModelTask::PrescriptionScan, PRESCRIPTION_PROMPT, image);
        let Some(text) = self.reply(&request) else {
            return Vec::new();
        };
        match parse_medications(&text) {
            Ok(candidates) => {
                debug!(count = candidates.len(), "prescription scan parsed");
                candidates
            }
            Err(e) => {
                warn!(error = %e, "prescription scan reply rejected");
                Vec::new()
            }
        }
    }

    fn classify_document(&self, image: &[u8]) -> Option<ReportDraft> {
        let request =
            self.image_request(ModelTask::DocumentClassification, DOCUMENT_PROMPT, image);
        let text = self.reply(&request)?;
        match parse_document(&text) {
            Ok(draft) => Some(draft),
            Err(e) => {
                warn!(error = %e, "document classification reply rejected");
                None
            }
        }
    }
}

#[derive(Serialize)]
struct InsightRow<'a> {
    #[serde(rename = "type")]
    vital_type: &'a str,
    value: &'a str,
    date: String,
}

/// Build the insight prompt from the given records.
pub fn insight_prompt(recent: &[&VitalRecord]) -> String {
    let rows: Vec<InsightRow<'_>> = recent
        .iter()
        .map(|v| InsightRow {
            vital_type: v.vital_type.label(),
            value: &v.value,
            date: DateTime::<Utc>::from_timestamp_millis(v.timestamp)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        })
        .collect();
    let rows_json = serde_json::to_string(&rows).unwrap_or_else(|_| "[]".to_string());

    format!(
        "You are a helpful medical assistant for a senior.\n\
         Here are the recent vital signs logs: {rows_json}.\n\
         \n\
         Analyze the trends. Provide a brief, encouraging, plain-English summary (max 2 sentences).\n\
         If there are any concerning trends (like consistently high BP), mention it gently.\n\
         Do not give medical advice, just observations."
    )
}
