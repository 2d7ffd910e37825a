//! A deterministic text-generation client for the reference runtime.
//!
//! Replies are fixed per task and mimic what a hosted model sends back,
//! including the code fences models like to wrap JSON in. No network calls
//! are made.

use std::sync::atomic::{AtomicUsize, Ordering};

use vitalis_contracts::error::{VitalisError, VitalisResult};
use vitalis_extract::{ModelClient, ModelRequest, ModelTask};

pub const PRESCRIPTION_REPLY: &str = r#"```json
[
  { "name": "Atorvastatin", "dosage": "20mg", "frequency": "Once a day" },
  { "name": "Amlodipine", "dosage": "5mg", "frequency": "Morning and Night" },
  { "name": "", "dosage": "illegible", "frequency": "" }
]
```"#;

pub const DOCUMENT_REPLY: &str = r#"{
  "type": "Lab Report",
  "date": "2024-03-02",
  "summary": "Complete blood count within normal ranges.",
  "title": "CBC Panel"
}"#;

pub const INSIGHT_REPLY: &str = "Your blood pressure has been fairly steady this week, \
with one reading on the higher side. Keep logging and mention it at your next visit.";

/// Answers every task with a canned reply.
#[derive(Default)]
pub struct CannedModelClient {
    offline: bool,
    calls: AtomicUsize,
}

impl CannedModelClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose every call fails, as if no API key were configured.
    pub fn offline() -> Self {
        Self {
            offline: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ModelClient for CannedModelClient {
    fn generate(&self, request: &ModelRequest) -> VitalisResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(VitalisError::Collaborator {
                reason: "model service not configured".to_string(),
            });
        }
        let reply = match request.task {
            ModelTask::PrescriptionScan => PRESCRIPTION_REPLY,
            ModelTask::DocumentClassification => DOCUMENT_REPLY,
            ModelTask::VitalInsight => INSIGHT_REPLY,
        };
        Ok(Some(reply.to_string()))
    }
}
