//! The REST table of the persistence service.
//!
//! Only the shape of each call is described here; transport lives outside
//! this workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{medication::MedicationId, report::ReportId};

/// Base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

/// Every call the persistence service accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    FetchUser,
    UpdateUser,
    FetchMedications,
    AddMedication,
    RemoveMedication(MedicationId),
    TakeDose(MedicationId),
    FetchVitals,
    AddVital,
    FetchReports,
    AddReport,
    RemoveReport(ReportId),
}

impl Endpoint {
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::FetchUser
            | Endpoint::FetchMedications
            | Endpoint::FetchVitals
            | Endpoint::FetchReports => HttpMethod::Get,
            Endpoint::UpdateUser => HttpMethod::Put,
            Endpoint::AddMedication
            | Endpoint::TakeDose(_)
            | Endpoint::AddVital
            | Endpoint::AddReport => HttpMethod::Post,
            Endpoint::RemoveMedication(_) | Endpoint::RemoveReport(_) => HttpMethod::Delete,
        }
    }

    /// Path relative to the API base, without a leading slash.
    ///
    /// Ids are percent-encoded, so each one stays a single path segment.
    pub fn path(&self) -> String {
        match self {
            Endpoint::FetchUser | Endpoint::UpdateUser => "user".to_string(),
            Endpoint::FetchMedications | Endpoint::AddMedication => "medications".to_string(),
            Endpoint::RemoveMedication(id) => format!("medications/{}", encode_segment(id.as_str())),
            Endpoint::TakeDose(id) => {
                format!("medications/{}/take-dose", encode_segment(id.as_str()))
            }
            Endpoint::FetchVitals | Endpoint::AddVital => "vitals".to_string(),
            Endpoint::FetchReports | Endpoint::AddReport => "reports".to_string(),
            Endpoint::RemoveReport(id) => format!("reports/{}", encode_segment(id.as_str())),
        }
    }

    /// Full URL under `base`. A trailing slash on `base` is tolerated.
    pub fn url(&self, base: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), self.path())
    }

    /// Whether the call carries a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(
            self,
            Endpoint::UpdateUser | Endpoint::AddMedication | Endpoint::AddVital | Endpoint::AddReport
        )
    }
}

/// Percent-encode every byte outside the RFC 3986 unreserved set.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.method(), self.path())
    }
}
