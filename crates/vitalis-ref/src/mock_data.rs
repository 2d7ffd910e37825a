//! Seed data for the reference runtime.
//!
//! All data is fictional. Timestamps are relative to the `now` supplied by
//! the caller so the trend views always have recent points.

use chrono::{DateTime, Duration, Utc};

use vitalis_contracts::{
    medication::{Medication, MedicationId},
    profile::{AllergyList, EmergencyContact, UserProfile},
    report::{MedicalReport, ReportId, ReportType},
    snapshot::HealthSnapshot,
    vital::{VitalId, VitalRecord, VitalStatus, VitalType},
};
use vitalis_core::config::ScoreRules;

pub fn seed_user() -> UserProfile {
    UserProfile {
        name: "Sarah Miller".to_string(),
        age: 74,
        blood_type: "O+".to_string(),
        allergies: AllergyList::new(["Penicillin", "Peanuts"]),
        emergency_contact: EmergencyContact {
            name: "Tom Miller".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            relation: "Son".to_string(),
        },
    }
}

pub fn seed_medications() -> Vec<Medication> {
    vec![
        Medication {
            id: MedicationId::new("1"),
            name: "Lisinopril".to_string(),
            dosage: "10mg".to_string(),
            frequency: "Daily".to_string(),
            times: vec!["09:00".to_string()],
            inventory: 24,
            refill_threshold: 7,
            instructions: Some("Take with food".to_string()),
            last_taken: None,
        },
        Medication {
            id: MedicationId::new("2"),
            name: "Metformin".to_string(),
            dosage: "500mg".to_string(),
            frequency: "Twice Daily".to_string(),
            times: vec!["09:00".to_string(), "18:00".to_string()],
            inventory: 12,
            refill_threshold: 10,
            instructions: Some("After meals".to_string()),
            last_taken: None,
        },
        Medication {
            id: MedicationId::new("3"),
            name: "Vitamin D".to_string(),
            dosage: "1000IU".to_string(),
            frequency: "Morning".to_string(),
            times: vec!["08:00".to_string()],
            inventory: 60,
            refill_threshold: 20,
            instructions: Some("Take with breakfast".to_string()),
            last_taken: None,
        },
    ]
}

pub fn seed_vitals(now: DateTime<Utc>) -> Vec<VitalRecord> {
    let day = |n: i64| (now - Duration::days(n)).timestamp_millis();
    let record = |id: &str, vital_type: VitalType, value: &str, timestamp: i64, status| {
        VitalRecord {
            id: VitalId::new(id),
            vital_type,
            value: value.to_string(),
            unit: vital_type.default_unit().to_string(),
            timestamp,
            status,
        }
    };

    vec![
        record("1", VitalType::BloodPressure, "128/82", day(2), VitalStatus::Normal),
        record("2", VitalType::BloodPressure, "135/88", day(1), VitalStatus::Warning),
        record("3", VitalType::BloodPressure, "125/80", day(0), VitalStatus::Normal),
        record("4", VitalType::BloodSugar, "110", day(1), VitalStatus::Normal),
        record("5", VitalType::Weight, "75", day(1), VitalStatus::Normal),
        record("6", VitalType::HeartRate, "72", day(1), VitalStatus::Normal),
    ]
}

/// Newest first.
pub fn seed_reports() -> Vec<MedicalReport> {
    vec![
        MedicalReport {
            id: ReportId::new("2"),
            title: "Chest X-Ray".to_string(),
            report_type: ReportType::Radiology,
            date: "2023-11-02".to_string(),
            summary: "Clear lungs, no signs of infection.".to_string(),
            image_url: None,
        },
        MedicalReport {
            id: ReportId::new("1"),
            title: "Annual Blood Work".to_string(),
            report_type: ReportType::LabReport,
            date: "2023-10-15".to_string(),
            summary: "Cholesterol slightly elevated, other values normal.".to_string(),
            image_url: None,
        },
    ]
}

/// The complete seed state, scored from `rules.initial`.
pub fn seed_snapshot(now: DateTime<Utc>, rules: &ScoreRules) -> HealthSnapshot {
    HealthSnapshot {
        user: seed_user(),
        medications: seed_medications(),
        vitals: seed_vitals(now),
        reports: seed_reports(),
        health_score: rules.initial,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use vitalis_contracts::vital::VitalType;
    use vitalis_core::{config::ScoreRules, HealthRecordStore};

    use super::seed_snapshot;

    #[test]
    fn seed_has_one_refill_due_medication() {
        let store = HealthRecordStore::new(
            seed_snapshot(Utc::now(), &ScoreRules::default()),
            ScoreRules::default(),
        );
        let due: Vec<&str> = store.refill_due().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(due, vec!["Metformin"]);
        assert_eq!(store.health_score().value(), 85);
    }

    #[test]
    fn seed_blood_pressure_trend_is_129() {
        let store = HealthRecordStore::new(
            seed_snapshot(Utc::now(), &ScoreRules::default()),
            ScoreRules::default(),
        );
        assert_eq!(store.trend_summary(VitalType::BloodPressure).average(), Some(129));
    }
}
