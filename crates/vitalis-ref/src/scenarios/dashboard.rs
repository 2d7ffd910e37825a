//! Scenario 1: Daily Dashboard
//!
//! Loads the seed record through the persistence service, shows what the
//! home screen would show (greeting, score, refill banner, schedule, latest
//! readings), takes two doses, and prints the emergency card.

use chrono::Utc;

use vitalis_contracts::{error::VitalisResult, medication::MedicationId, vital::VitalType};
use vitalis_core::config::VitalisConfig;

use super::Session;

pub fn run_scenario(config: &VitalisConfig) -> VitalisResult<()> {
    println!("=== Scenario 1: Daily Dashboard ===");
    println!();

    let mut session = Session::open("dashboard", config, Utc::now())?;
    let store = &mut session.store;

    println!("  Hello, {}.", store.user().first_name());
    println!("  Health score:           {}/100", store.health_score());
    match store.refill_alert() {
        Some(alert) => println!("  Refill alert:           {}", alert),
        None => println!("  Refill alert:           none"),
    }
    println!();

    println!("  Today's medications:");
    for med in store.medications() {
        println!(
            "    {:<12} {:<8} at {:<6} {} left",
            med.name,
            med.dosage,
            med.next_scheduled_time().unwrap_or("--:--"),
            med.inventory
        );
    }
    println!();

    println!("  Latest readings:");
    for vital_type in VitalType::ALL {
        match store.latest_vital(vital_type) {
            Some(v) => println!("    {:<15} {} {}", vital_type, v.value, v.unit),
            None => println!("    {:<15} no readings", vital_type),
        }
    }
    println!();

    // Metformin twice, then an id that no longer exists.
    let metformin = MedicationId::new("2");
    store.take_dose(&metformin);
    store.take_dose(&metformin);
    let applied = store.take_dose(&MedicationId::new("99"));

    if let Some(med) = store.medication(&metformin) {
        println!("  {} after 2 doses: {} left", med.name, med.inventory);
    }
    println!("  Dose for unknown id:    {}", if applied { "applied" } else { "ignored" });
    println!("  Health score now:       {}/100", store.health_score());
    println!();

    let card = store.emergency_card();
    println!("  Emergency card:");
    println!("    {} ({}), blood type {}", card.name, card.age, card.blood_type);
    println!("    Allergies: {}", card.allergies.join(", "));
    println!(
        "    Contact:   {} ({}) {}",
        card.contact.name, card.contact.relation, card.contact.phone
    );
    println!();

    session.sync_and_report();
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
