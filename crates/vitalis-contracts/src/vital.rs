//! Vital-sign log types and value parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied unique identifier for a vital record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VitalId(pub String);

impl VitalId {
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

impl fmt::Display for VitalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of vital signs the log accepts.
///
/// Wire names are the human labels ("Blood Pressure", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VitalType {
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    #[serde(rename = "Blood Sugar")]
    BloodSugar,
    #[serde(rename = "Heart Rate")]
    HeartRate,
    #[serde(rename = "Weight")]
    Weight,
}

impl VitalType {
    /// Every variant, in selector order.
    pub const ALL: [VitalType; 4] = [
        VitalType::BloodPressure,
        VitalType::BloodSugar,
        VitalType::HeartRate,
        VitalType::Weight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "Blood Pressure",
            VitalType::BloodSugar => "Blood Sugar",
            VitalType::HeartRate => "Heart Rate",
            VitalType::Weight => "Weight",
        }
    }

    /// Unit applied when a caller logs a bare value.
    pub fn default_unit(self) -> &'static str {
        match self {
            VitalType::BloodPressure => "mmHg",
            VitalType::BloodSugar => "mg/dL",
            VitalType::HeartRate => "bpm",
            VitalType::Weight => "kg",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for VitalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification assigned when a reading is logged. Never recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalStatus {
    Normal,
    Warning,
    Critical,
}

/// One entry of the append-only vital-sign log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalRecord {
    pub id: VitalId,
    #[serde(rename = "type")]
    pub vital_type: VitalType,
    /// Free text; composite for blood pressure ("120/80").
    pub value: String,
    pub unit: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub status: VitalStatus,
}

impl VitalRecord {
    /// The primary numeric component of `value` (systolic for blood pressure).
    pub fn primary_value(&self) -> Option<f64> {
        primary_value(&self.value)
    }
}

/// Parse the number before the first `/` of a vital value.
///
/// Parsing is lenient about trailing text ("72 bpm" yields 72) but requires a
/// leading number. Non-finite results are rejected.
pub fn primary_value(value: &str) -> Option<f64> {
    let head = value.split('/').next().unwrap_or("");
    leading_number(head)
}

/// Longest decimal-number prefix of `s` after leading whitespace.
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_value_yields_systolic() {
        assert_eq!(primary_value("128/82"), Some(128.0));
    }

    #[test]
    fn single_values_parse() {
        assert_eq!(primary_value("72"), Some(72.0));
        assert_eq!(primary_value("75.5"), Some(75.5));
        assert_eq!(primary_value("  110 mg/dL"), Some(110.0));
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(primary_value("72 bpm"), Some(72.0));
        assert_eq!(primary_value("1e2x"), Some(100.0));
        assert_eq!(primary_value("5e"), Some(5.0));
    }

    #[test]
    fn non_numeric_values_do_not_parse() {
        assert_eq!(primary_value(""), None);
        assert_eq!(primary_value("/80"), None);
        assert_eq!(primary_value("high"), None);
        assert_eq!(primary_value("."), None);
        assert_eq!(primary_value("-"), None);
    }

    #[test]
    fn negative_values_still_parse() {
        // Callers decide whether non-positive readings count.
        assert_eq!(primary_value("-4"), Some(-4.0));
    }

    #[test]
    fn vital_type_wire_names_are_labels() {
        let json = serde_json::to_string(&VitalType::BloodPressure).unwrap();
        assert_eq!(json, "\"Blood Pressure\"");
        let back: VitalType = serde_json::from_str("\"Heart Rate\"").unwrap();
        assert_eq!(back, VitalType::HeartRate);
    }

    #[test]
    fn vital_type_from_label_is_case_insensitive() {
        assert_eq!(VitalType::from_label("blood sugar"), Some(VitalType::BloodSugar));
        assert_eq!(VitalType::from_label(" Weight "), Some(VitalType::Weight));
        assert_eq!(VitalType::from_label("Temperature"), None);
    }

    #[test]
    fn record_uses_type_key_on_the_wire() {
        let json = serde_json::json!({
            "id": "3",
            "type": "Blood Pressure",
            "value": "125/80",
            "unit": "mmHg",
            "timestamp": 1_700_000_000_000_i64,
            "status": "warning"
        });
        let record: VitalRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.vital_type, VitalType::BloodPressure);
        assert_eq!(record.status, VitalStatus::Warning);
        assert_eq!(record.primary_value(), Some(125.0));
    }
}
