//! Scenario 2: Vitals and Trends
//!
//! Logs new readings, builds the blood-pressure trend from the append-only
//! log, and asks the model for a plain-language insight over the newest
//! readings. A second analyzer with no service behind it shows the fixed
//! fallback sentence.

use chrono::{Duration, Utc};

use vitalis_contracts::{
    error::VitalisResult,
    vital::{VitalId, VitalRecord, VitalStatus, VitalType},
};
use vitalis_core::config::VitalisConfig;
use vitalis_extract::ModelAnalyzer;

use crate::mock_analyzer::CannedModelClient;

use super::Session;

fn reading(vital_type: VitalType, value: &str, timestamp: i64, status: VitalStatus) -> VitalRecord {
    VitalRecord {
        id: VitalId::generate(),
        vital_type,
        value: value.to_string(),
        unit: vital_type.default_unit().to_string(),
        timestamp,
        status,
    }
}

pub fn run_scenario(config: &VitalisConfig) -> VitalisResult<()> {
    println!("=== Scenario 2: Vitals and Trends ===");
    println!();

    let now = Utc::now();
    let mut session = Session::open("vitals", config, now)?;
    let store = &mut session.store;
    let before = store.health_score();

    // One reading backdated into the middle of the series.
    let yesterday = (now - Duration::days(1)).timestamp_millis();
    let today = now.timestamp_millis();
    store.add_vital_log(reading(VitalType::BloodPressure, "142/91", today, VitalStatus::Warning));
    store.add_vital_log(reading(VitalType::BloodPressure, "131/84", yesterday, VitalStatus::Normal));
    store.add_vital_log(reading(VitalType::HeartRate, "68", today, VitalStatus::Normal));

    println!("  Logged 3 readings:      score {} -> {}", before, store.health_score());
    println!();

    println!("  Blood pressure trend (oldest first):");
    for point in store.trend_points(VitalType::BloodPressure) {
        match point.value {
            Some(v) => println!("    {:>15}  {}", point.timestamp, v),
            None => println!("    {:>15}  (unreadable)", point.timestamp),
        }
    }
    println!("  Local insight:          {}", store.trend_summary(VitalType::BloodPressure));
    println!("  Blood sugar insight:    {}", store.trend_summary(VitalType::BloodSugar));
    println!();

    let recent = store.recent_vitals(config.insights.recent_window);
    let online = ModelAnalyzer::new(CannedModelClient::new());
    let offline = ModelAnalyzer::new(CannedModelClient::offline());
    println!("  AI insight ({} readings):", recent.len());
    println!("    {}", online.vital_insight(&recent));
    println!("  AI insight, no service:");
    println!("    {}", offline.vital_insight(&recent));
    println!();

    session.sync_and_report();
    println!("  Backend vital count:    {}", session.backend.vital_count());
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
