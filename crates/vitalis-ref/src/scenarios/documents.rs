//! Scenario 3: Medical Documents
//!
//! Captures an uploaded scan as a data URL, lets the model classify it, and
//! files the result at the top of the report list. The oldest report is
//! then deleted. The first sync attempt runs while the backend is offline,
//! so the changes stay pending until the second attempt.

use chrono::Utc;

use vitalis_contracts::{error::VitalisResult, report::ReportId};
use vitalis_core::config::VitalisConfig;
use vitalis_extract::ModelAnalyzer;

use crate::{capture::capture_and_classify, mock_analyzer::CannedModelClient};

use super::Session;

/// A few bytes standing in for a JPEG upload.
const SCAN_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];

pub fn run_scenario(config: &VitalisConfig) -> VitalisResult<()> {
    println!("=== Scenario 3: Medical Documents ===");
    println!();

    let now = Utc::now();
    let mut session = Session::open("documents", config, now)?;
    let analyzer = ModelAnalyzer::new(CannedModelClient::new());

    let draft = capture_and_classify("IMG_2041.jpg", "image/jpeg", SCAN_BYTES, &analyzer)?;
    let preview: String = draft.image_url.as_deref().unwrap_or("").chars().take(32).collect();
    println!("  Captured upload:        IMG_2041.jpg");
    println!("  Image URL:              {}...", preview);

    let store = &mut session.store;
    store.add_report_draft(draft, ReportId::generate(), now.date_naive());
    let removed = store.remove_report(&ReportId::new("1"));

    println!("  Removed oldest report:  {}", removed);
    println!("  Reports (newest first):");
    for report in store.reports() {
        println!(
            "    {}  {:<20} [{}] {}",
            report.date,
            report.title,
            report.report_type.label(),
            report.summary
        );
    }
    println!();

    session.backend.set_online(false);
    let first = session.journal.sync_pending(&session.backend);
    println!(
        "  Sync while offline:     {} applied, {} still pending",
        first.applied,
        session.journal.pending().len()
    );

    session.backend.set_online(true);
    session.sync_and_report();
    println!("  Backend report count:   {}", session.backend.report_count());
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
