//! Scenario 4: Prescription Scan
//!
//! Sends a prescription photo to the model, promotes every readable
//! candidate to a full medication with default schedule and stock, and
//! drops the one the model could not name. A discontinued medication is
//! then removed and the refill banner recomputed.

use chrono::Utc;

use vitalis_contracts::{error::VitalisResult, medication::MedicationId};
use vitalis_core::{config::VitalisConfig, traits::DocumentAnalyzer};
use vitalis_extract::ModelAnalyzer;

use crate::mock_analyzer::CannedModelClient;

use super::Session;

pub fn run_scenario(config: &VitalisConfig) -> VitalisResult<()> {
    println!("=== Scenario 4: Prescription Scan ===");
    println!();

    let mut session = Session::open("medications", config, Utc::now())?;
    let analyzer = ModelAnalyzer::new(CannedModelClient::new());
    let store = &mut session.store;

    let candidates = analyzer.extract_medications(b"prescription photo");
    println!("  Model read {} line(s) from the prescription:", candidates.len());
    for candidate in candidates {
        let label = candidate.name.clone().unwrap_or_default();
        match candidate.into_medication(MedicationId::generate()) {
            Ok(med) => {
                println!(
                    "    ADDED    {:<14} {:<6} {} ({} in stock, refill at {})",
                    med.name, med.dosage, med.frequency, med.inventory, med.refill_threshold
                );
                store.add_medication(med);
            }
            Err(e) => println!("    SKIPPED  {:?}: {}", label, e),
        }
    }
    println!();

    let removed = store.remove_medication(&MedicationId::new("3"));
    println!("  Vitamin D discontinued: {}", if removed { "removed" } else { "not found" });
    println!("  Medications on file:    {}", store.medications().len());
    match store.refill_alert() {
        Some(alert) => println!("  Refill alert:           {}", alert),
        None => println!("  Refill alert:           none"),
    }
    println!();

    session.sync_and_report();
    println!("  Backend medication count: {}", session.backend.medication_count());
    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok(())
}
