//! # vitalis-contracts
//!
//! Shared types, drafts, and contracts for the vitalis health-record store.
//!
//! Every crate in the workspace imports from here. No business logic lives in
//! this crate: only data definitions, default-fill rules for partial records,
//! the persistence endpoint table, and the error type.

pub mod change;
pub mod draft;
pub mod endpoint;
pub mod error;
pub mod medication;
pub mod profile;
pub mod report;
pub mod snapshot;
pub mod vital;

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use change::StoreChange;
    use draft::{MedicationCandidate, ReportDraft, UNTITLED_REPORT};
    use endpoint::{Endpoint, HttpMethod};
    use error::VitalisError;
    use medication::{Medication, MedicationId};
    use profile::{AllergyList, EmergencyContact, UserProfile};
    use report::{ReportId, ReportType};
    use vital::VitalId;

    fn med(inventory: u32, threshold: u32) -> Medication {
        Medication {
            id: MedicationId::new("m1"),
            name: "Metformin".to_string(),
            dosage: "500mg".to_string(),
            frequency: "Twice Daily".to_string(),
            times: vec!["09:00".to_string(), "18:00".to_string()],
            inventory,
            refill_threshold: threshold,
            instructions: Some("After meals".to_string()),
            last_taken: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    // ── AllergyList ──────────────────────────────────────────────────────────

    #[test]
    fn allergy_list_drops_duplicates_and_keeps_order() {
        let list = AllergyList::new(["Penicillin", "Peanuts", "Penicillin", "Latex"]);
        let names: Vec<&str> = list.iter().collect();
        assert_eq!(names, vec!["Penicillin", "Peanuts", "Latex"]);
    }

    #[test]
    fn allergy_list_deduplicates_on_deserialize() {
        let list: AllergyList =
            serde_json::from_str(r#"["Peanuts", "Peanuts", "Shellfish"]"#).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("Shellfish"));
    }

    #[test]
    fn profile_uses_camel_case_wire_names() {
        let profile = UserProfile {
            name: "Sarah Miller".to_string(),
            age: 72,
            blood_type: "O+".to_string(),
            allergies: AllergyList::new(["Penicillin"]),
            emergency_contact: EmergencyContact {
                name: "Tom Miller".to_string(),
                phone: "+1 (555) 123-4567".to_string(),
                relation: "Son".to_string(),
            },
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["bloodType"], "O+");
        assert_eq!(json["emergencyContact"]["relation"], "Son");
        assert_eq!(json["allergies"][0], "Penicillin");
        assert_eq!(profile.first_name(), "Sarah");
    }

    // ── Medication ───────────────────────────────────────────────────────────

    #[test]
    fn refill_due_is_inclusive_of_threshold() {
        assert!(med(10, 10).is_refill_due());
        assert!(med(3, 10).is_refill_due());
        assert!(!med(11, 10).is_refill_due());
    }

    #[test]
    fn record_dose_clamps_at_zero_and_stamps_time() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let mut m = med(1, 0);
        m.record_dose(at);
        assert_eq!(m.inventory, 0);
        m.record_dose(at);
        assert_eq!(m.inventory, 0);
        assert_eq!(m.last_taken, Some(at));
    }

    #[test]
    fn last_taken_is_omitted_until_first_dose() {
        let json = serde_json::to_value(med(5, 1)).unwrap();
        assert!(json.get("lastTaken").is_none());
        assert_eq!(json["refillThreshold"], 1);
    }

    // ── Drafts ───────────────────────────────────────────────────────────────

    #[test]
    fn empty_report_draft_gets_defaults() {
        let report = ReportDraft::default().into_report(ReportId::new("r1"), today());
        assert_eq!(report.title, UNTITLED_REPORT);
        assert_eq!(report.report_type, ReportType::Other);
        assert_eq!(report.date, "2026-10-19");
        assert_eq!(report.summary, "");
        assert!(report.image_url.is_none());
    }

    #[test]
    fn unknown_report_type_label_maps_to_other() {
        let draft = ReportDraft {
            title: Some("Scan".to_string()),
            report_type: Some("MRI".to_string()),
            ..ReportDraft::default()
        };
        let report = draft.into_report(ReportId::new("r2"), today());
        assert_eq!(report.report_type, ReportType::Other);
    }

    #[test]
    fn report_draft_merge_prefers_present_fields_of_overlay() {
        let captured = ReportDraft {
            title: Some("scan.jpg".to_string()),
            image_url: Some("data:image/jpeg;base64,AAAA".to_string()),
            ..ReportDraft::default()
        };
        let analysed = ReportDraft {
            title: Some("Chest X-Ray".to_string()),
            report_type: Some("radiology".to_string()),
            summary: Some("   ".to_string()),
            ..ReportDraft::default()
        };
        let merged = captured.merge(analysed);
        assert_eq!(merged.title.as_deref(), Some("Chest X-Ray"));
        assert_eq!(merged.summary, None);
        assert!(merged.image_url.is_some());

        let report = merged.into_report(ReportId::new("r3"), today());
        assert_eq!(report.report_type, ReportType::Radiology);
    }

    #[test]
    fn medication_candidate_requires_a_name() {
        let err = MedicationCandidate::default()
            .into_medication(MedicationId::new("x"))
            .unwrap_err();
        assert!(matches!(err, VitalisError::InvalidInput { .. }));
    }

    #[test]
    fn medication_candidate_fills_form_defaults() {
        let candidate = MedicationCandidate {
            name: Some("Aspirin".to_string()),
            dosage: Some("100mg".to_string()),
            frequency: None,
        };
        let m = candidate.into_medication(MedicationId::new("a")).unwrap();
        assert_eq!(m.frequency, "Daily");
        assert_eq!(m.times, vec!["09:00".to_string()]);
        assert_eq!(m.inventory, 30);
        assert_eq!(m.refill_threshold, 5);
    }

    // ── Endpoints ────────────────────────────────────────────────────────────

    #[test]
    fn endpoint_table_matches_rest_layout() {
        let id = MedicationId::new("42");
        assert_eq!(Endpoint::TakeDose(id.clone()).method(), HttpMethod::Post);
        assert_eq!(Endpoint::TakeDose(id.clone()).path(), "medications/42/take-dose");
        assert_eq!(Endpoint::RemoveMedication(id).method(), HttpMethod::Delete);
        assert_eq!(Endpoint::UpdateUser.method(), HttpMethod::Put);
        assert_eq!(
            Endpoint::RemoveReport(ReportId::new("7")).url("http://localhost:5000/api/"),
            "http://localhost:5000/api/reports/7"
        );
        assert_eq!(Endpoint::FetchVitals.to_string(), "GET /vitals");
    }

    #[test]
    fn endpoint_ids_stay_one_path_segment() {
        let id = MedicationId::new("rx/12 a");
        assert_eq!(
            Endpoint::TakeDose(id.clone()).path(),
            "medications/rx%2F12%20a/take-dose"
        );
        assert_eq!(Endpoint::RemoveMedication(id).path(), "medications/rx%2F12%20a");
        assert_eq!(
            Endpoint::RemoveReport(ReportId::new("lab~2024_03.v1")).path(),
            "reports/lab~2024_03.v1"
        );
    }

    #[test]
    fn id_newtypes_display_their_inner_value() {
        assert_eq!(MedicationId::new("m-1").to_string(), "m-1");
        assert_eq!(VitalId::new("v-1").to_string(), "v-1");
        assert_eq!(ReportId::new("r-1").to_string(), "r-1");
        assert_eq!(VitalId::new("v-1").as_str(), "v-1");
        assert_eq!(ReportId::new("r-1").as_str(), "r-1");
    }

    #[test]
    fn store_change_maps_to_its_endpoint() {
        let change = StoreChange::DoseTaken {
            id: MedicationId::new("2"),
            taken_at: Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap(),
            remaining: 11,
        };
        assert_eq!(change.endpoint(), Endpoint::TakeDose(MedicationId::new("2")));
        assert_eq!(change.kind(), "dose_taken");

        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["kind"], "dose_taken");
        assert_eq!(json["remaining"], 11);
    }

    // ── Error display ────────────────────────────────────────────────────────

    #[test]
    fn error_collaborator_display() {
        let err = VitalisError::Collaborator {
            reason: "Failed to fetch vitals".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("collaborator call failed"));
        assert!(msg.contains("Failed to fetch vitals"));
    }

    #[test]
    fn error_config_display() {
        let err = VitalisError::ConfigError {
            reason: "initial score 140 exceeds 100".to_string(),
        };
        assert!(err.to_string().contains("configuration error"));
    }
}
