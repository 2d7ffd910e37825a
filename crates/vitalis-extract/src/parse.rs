//! Reply parsing: fence stripping, JSON decoding, schema validation.
//!
//! Model replies are untrusted text. A reply is accepted only if, after the
//! Markdown code fences are removed, it decodes as JSON and passes the JSON
//! Schema for its task. Every failure is reported as
//! `VitalisError::ExtractionFailed` with all schema violations listed.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use vitalis_contracts::{
    draft::{MedicationCandidate, ReportDraft},
    error::{VitalisError, VitalisResult},
};

/// JSON Schema for a prescription scan: an array of partial medications.
pub fn medication_list_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name":      { "type": ["string", "null"] },
                "dosage":    { "type": ["string", "null"] },
                "frequency": { "type": ["string", "null"] }
            }
        }
    })
}

/// JSON Schema for a document classification: one partial report.
pub fn document_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title":   { "type": ["string", "null"] },
            "type":    { "type": ["string", "null"] },
            "date":    { "type": ["string", "null"] },
            "summary": { "type": ["string", "null"] }
        }
    })
}

/// Remove Markdown code fences (```json ... ```) and surrounding whitespace.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode `text` as JSON and validate it against `schema`.
pub fn parse_validated(text: &str, schema: &Value) -> VitalisResult<Value> {
    let cleaned = strip_code_fences(text);
    let value: Value = serde_json::from_str(&cleaned).map_err(|e| VitalisError::ExtractionFailed {
        reason: format!("reply is not well-formed JSON: {e}"),
    })?;

    let validator = jsonschema::validator_for(schema).map_err(|e| VitalisError::ExtractionFailed {
        reason: format!("invalid JSON Schema document: {e}"),
    })?;

    let violations: Vec<String> = validator
        .iter_errors(&value)
        .map(|error| format!("at '{}': {}", error.instance_path, error))
        .collect();

    if !violations.is_empty() {
        warn!(count = violations.len(), "extraction reply failed schema validation");
        return Err(VitalisError::ExtractionFailed {
            reason: format!("reply violates schema: {}", violations.join("; ")),
        });
    }

    debug!("extraction reply passed schema validation");
    Ok(value)
}

fn decode<T: DeserializeOwned>(value: Value) -> VitalisResult<T> {
    serde_json::from_value(value).map_err(|e| VitalisError::ExtractionFailed {
        reason: format!("reply does not map onto the expected record: {e}"),
    })
}

/// Parse a prescription-scan reply.
pub fn parse_medications(text: &str) -> VitalisResult<Vec<MedicationCandidate>> {
    decode(parse_validated(text, &medication_list_schema())?)
}

/// Parse a document-classification reply.
pub fn parse_document(text: &str) -> VitalisResult<ReportDraft> {
    decode(parse_validated(text, &document_schema())?)
}

#[cfg(test)]
mod tests {
    use vitalis_contracts::error::VitalisError;

    use super::*;

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }

    #[test]
    fn fenced_medication_list_parses() {
        let reply = "```json\n[{\"name\": \"Metformin\", \"dosage\": \"500mg\", \"frequency\": \"Twice a day\"}, {\"name\": \"Lisinopril\"}]\n```";
        let meds = parse_medications(reply).unwrap();
        assert_eq!(meds.len(), 2);
        assert_eq!(meds[0].dosage.as_deref(), Some("500mg"));
        assert_eq!(meds[1].frequency, None);
    }

    #[test]
    fn null_fields_are_accepted() {
        let meds = parse_medications(r#"[{"name": "Aspirin", "dosage": null}]"#).unwrap();
        assert_eq!(meds[0].dosage, None);
    }

    #[test]
    fn wrong_shape_lists_every_violation() {
        match parse_medications(r#"[{"name": 5}, {"dosage": ["x"]}]"#) {
            Err(VitalisError::ExtractionFailed { reason }) => {
                assert!(reason.contains("/0/name"), "{reason}");
                assert!(reason.contains("/1/dosage"), "{reason}");
            }
            other => panic!("expected ExtractionFailed, got {:?}", other),
        }
    }

    #[test]
    fn object_instead_of_array_is_rejected() {
        assert!(parse_medications(r#"{"name": "Aspirin"}"#).is_err());
    }

    #[test]
    fn malformed_json_is_rejected() {
        match parse_document("Sorry, I cannot read this image.") {
            Err(VitalisError::ExtractionFailed { reason }) => {
                assert!(reason.contains("not well-formed JSON"));
            }
            other => panic!("expected ExtractionFailed, got {:?}", other),
        }
    }

    #[test]
    fn document_reply_maps_type_key() {
        let draft = parse_document(
            r#"{"title": "Chest X-Ray", "type": "Radiology", "date": "2023-11-02", "summary": "Clear lungs."}"#,
        )
        .unwrap();
        assert_eq!(draft.report_type.as_deref(), Some("Radiology"));
        assert_eq!(draft.title.as_deref(), Some("Chest X-Ray"));
        assert_eq!(draft.image_url, None);
    }
}
