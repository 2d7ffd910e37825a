//! Property-based tests for the store's invariants.
//!
//! Invariants tested:
//! - k doses leave inventory at max(0, original - k)
//! - `refill_due` is exactly {m | inventory <= threshold} after any mutations
//! - `vitals_of_type` returns every logged record of a type, sorted, stable
//! - the health score never decreases and never exceeds 100
//! - removing an unknown id changes nothing

use proptest::prelude::*;

use vitalis_contracts::{
    medication::{Medication, MedicationId},
    profile::{AllergyList, EmergencyContact, UserProfile},
    report::{MedicalReport, ReportId, ReportType},
    snapshot::HealthSnapshot,
    vital::{VitalId, VitalRecord, VitalStatus, VitalType},
};
use vitalis_core::{config::ScoreRules, HealthRecordStore};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn empty_store(score: u8) -> HealthRecordStore {
    HealthRecordStore::new(
        HealthSnapshot {
            user: UserProfile {
                name: "Test User".to_string(),
                age: 30,
                blood_type: "B+".to_string(),
                allergies: AllergyList::default(),
                emergency_contact: EmergencyContact {
                    name: "Contact".to_string(),
                    phone: "555-0100".to_string(),
                    relation: "Friend".to_string(),
                },
            },
            medications: vec![],
            vitals: vec![],
            reports: vec![],
            health_score: score,
        },
        ScoreRules::default(),
    )
}

fn med(id: usize, inventory: u32, threshold: u32) -> Medication {
    Medication {
        id: MedicationId::new(id.to_string()),
        name: format!("med-{id}"),
        dosage: "1 tablet".to_string(),
        frequency: "Daily".to_string(),
        times: vec!["08:00".to_string()],
        inventory,
        refill_threshold: threshold,
        instructions: None,
        last_taken: None,
    }
}

/// Map a u8 to one of the four `VitalType` variants.
fn vital_type_from_u8(n: u8) -> VitalType {
    VitalType::ALL[(n % 4) as usize]
}

/// One store mutation, generated by proptest.
#[derive(Debug, Clone)]
enum Op {
    Add { inventory: u32, threshold: u32 },
    Remove(usize),
    Dose(usize),
    Vital(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..40, 0u32..20).prop_map(|(inventory, threshold)| Op::Add { inventory, threshold }),
        (0usize..12).prop_map(Op::Remove),
        (0usize..12).prop_map(Op::Dose),
        any::<u8>().prop_map(Op::Vital),
    ]
}

// ── proptest! blocks ─────────────────────────────────────────────────────────

proptest! {
    /// After k doses, inventory is max(0, original - k).
    #[test]
    fn prop_dose_inventory_floor(original in 0u32..50, k in 0u32..80) {
        let mut store = empty_store(0);
        store.add_medication(med(1, original, 0));
        let id = MedicationId::new("1");
        for _ in 0..k {
            prop_assert!(store.take_dose(&id));
        }
        prop_assert_eq!(store.medication(&id).unwrap().inventory, original.saturating_sub(k));
    }

    /// refill_due always equals the threshold predicate, whatever happened before.
    #[test]
    fn prop_refill_due_matches_predicate(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut store = empty_store(50);
        let mut next_id = 0usize;
        for op in ops {
            match op {
                Op::Add { inventory, threshold } => {
                    store.add_medication(med(next_id, inventory, threshold));
                    next_id += 1;
                }
                Op::Remove(id) => { store.remove_medication(&MedicationId::new(id.to_string())); }
                Op::Dose(id) => { store.take_dose(&MedicationId::new(id.to_string())); }
                Op::Vital(_) => {}
            }
        }
        let expected: Vec<&MedicationId> = store
            .medications()
            .iter()
            .filter(|m| m.inventory <= m.refill_threshold)
            .map(|m| &m.id)
            .collect();
        let actual: Vec<&MedicationId> = store.refill_due().iter().map(|m| &m.id).collect();
        prop_assert_eq!(actual, expected);
    }

    /// vitals_of_type returns exactly the logged records of that type,
    /// ascending by timestamp and in log order for equal timestamps.
    #[test]
    fn prop_vitals_of_type_sorted_and_stable(
        entries in prop::collection::vec((any::<u8>(), 0i64..5), 0..30),
        selector in any::<u8>(),
    ) {
        let wanted = vital_type_from_u8(selector);
        let mut store = empty_store(0);
        for (seq, (type_seed, timestamp)) in entries.iter().enumerate() {
            store.add_vital_log(VitalRecord {
                id: VitalId::new(seq.to_string()),
                vital_type: vital_type_from_u8(*type_seed),
                value: "100".to_string(),
                unit: "unit".to_string(),
                timestamp: *timestamp,
                status: VitalStatus::Normal,
            });
        }

        let series = store.vitals_of_type(wanted);
        let logged = entries.iter().filter(|(t, _)| vital_type_from_u8(*t) == wanted).count();
        prop_assert_eq!(series.len(), logged);
        prop_assert!(series.iter().all(|v| v.vital_type == wanted));

        let keys: Vec<(i64, usize)> = series
            .iter()
            .map(|v| (v.timestamp, v.id.0.parse::<usize>().unwrap()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    /// The score never decreases and never exceeds 100.
    #[test]
    fn prop_score_monotone_and_bounded(
        start in 0u8..=100,
        ops in prop::collection::vec(op_strategy(), 0..60),
    ) {
        let mut store = empty_store(start);
        store.add_medication(med(0, 10, 2));
        let mut last = store.health_score().value();
        for (seq, op) in ops.into_iter().enumerate() {
            match op {
                Op::Vital(t) => store.add_vital_log(VitalRecord {
                    id: VitalId::new(seq.to_string()),
                    vital_type: vital_type_from_u8(t),
                    value: "70".to_string(),
                    unit: "bpm".to_string(),
                    timestamp: seq as i64,
                    status: VitalStatus::Normal,
                }),
                Op::Dose(_) => { store.take_dose(&MedicationId::new("0")); }
                _ => {}
            }
            let now = store.health_score().value();
            prop_assert!(now >= last);
            prop_assert!(now <= 100);
            last = now;
        }
    }

    /// Removing an id that is not present leaves both lists unchanged.
    #[test]
    fn prop_remove_unknown_is_no_op(n_meds in 0usize..6, n_reports in 0usize..6) {
        let mut store = empty_store(0);
        for i in 0..n_meds {
            store.add_medication(med(i, 5, 1));
        }
        for i in 0..n_reports {
            store.add_report(MedicalReport {
                id: ReportId::new(i.to_string()),
                title: format!("report-{i}"),
                report_type: ReportType::Other,
                date: "2026-01-01".to_string(),
                summary: String::new(),
                image_url: None,
            });
        }
        let before = store.snapshot();
        prop_assert!(!store.remove_medication(&MedicationId::new("absent")));
        prop_assert!(!store.remove_report(&ReportId::new("absent")));
        prop_assert_eq!(store.snapshot(), before);
    }

    /// add_report always puts the new report first.
    #[test]
    fn prop_add_report_prepends(n_existing in 0usize..8) {
        let mut store = empty_store(0);
        for i in 0..=n_existing {
            let id = ReportId::new(format!("r{i}"));
            store.add_report(MedicalReport {
                id: id.clone(),
                title: "t".to_string(),
                report_type: ReportType::LabReport,
                date: "2026-01-01".to_string(),
                summary: String::new(),
                image_url: None,
            });
            prop_assert_eq!(&store.reports()[0].id, &id);
        }
    }
}
