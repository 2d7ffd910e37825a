//! Document capture: binary image in, partial report out.
//!
//! The payload is encoded as a data URL for display. When an analyzer is
//! supplied, its best-effort guess is overlaid on the captured draft; an
//! analyzer that fails closed leaves the captured draft untouched.

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use vitalis_contracts::{
    draft::ReportDraft,
    error::{VitalisError, VitalisResult},
};
use vitalis_core::traits::DocumentAnalyzer;

/// `data:<mime>;base64,<payload>`.
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Wrap an uploaded file as a draft titled by its file name.
pub fn capture(file_name: &str, mime_type: &str, bytes: &[u8]) -> VitalisResult<ReportDraft> {
    if bytes.is_empty() {
        return Err(VitalisError::InvalidInput {
            reason: format!("document '{}' is empty", file_name),
        });
    }
    if !mime_type.contains('/') {
        return Err(VitalisError::InvalidInput {
            reason: format!("'{}' is not a MIME type", mime_type),
        });
    }

    debug!(file_name, mime_type, size = bytes.len(), "document captured");
    Ok(ReportDraft {
        title: Some(file_name.to_string()).filter(|t| !t.trim().is_empty()),
        report_type: None,
        date: None,
        summary: None,
        image_url: Some(data_url(mime_type, bytes)),
    })
}

/// Capture, then overlay whatever `analyzer` can read from the image.
pub fn capture_and_classify(
    file_name: &str,
    mime_type: &str,
    bytes: &[u8],
    analyzer: &dyn DocumentAnalyzer,
) -> VitalisResult<ReportDraft> {
    let draft = capture(file_name, mime_type, bytes)?;
    match analyzer.classify_document(bytes) {
        Some(guess) => Ok(draft.merge(guess)),
        None => Ok(draft),
    }
}
