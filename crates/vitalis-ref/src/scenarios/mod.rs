//! Reference runtime demo scenarios.
//!
//! Each scenario wires the real store, journal, analyzer and sync path to
//! the in-memory backend and canned model client, then walks one area of
//! the app the way a user would.

pub mod dashboard;
pub mod documents;
pub mod medications;
pub mod vitals_trend;

use chrono::{DateTime, Utc};

use vitalis_contracts::error::VitalisResult;
use vitalis_core::{config::VitalisConfig, sync, HealthRecordStore, HealthScore};
use vitalis_journal::InMemoryJournal;

use crate::{mock_backend::InMemoryBackend, mock_data::seed_snapshot};

/// Everything one scenario needs: a store hydrated from the backend, and a
/// handle on the journal the store writes to.
pub(crate) struct Session {
    pub store: HealthRecordStore,
    pub journal: InMemoryJournal,
    pub backend: InMemoryBackend,
}

impl Session {
    pub fn open(name: &str, config: &VitalisConfig, now: DateTime<Utc>) -> VitalisResult<Self> {
        let backend = InMemoryBackend::from_snapshot(seed_snapshot(now, &config.score));
        let snapshot = sync::load_snapshot(&backend, HealthScore::new(config.score.initial))?;
        let journal = InMemoryJournal::new(name);
        let store = HealthRecordStore::new(snapshot, config.score.clone())
            .with_journal(Box::new(journal.clone()));
        Ok(Self {
            store,
            journal,
            backend,
        })
    }

    /// Push pending changes, then print the sync and chain status lines.
    pub fn sync_and_report(&self) {
        let pending = self.journal.pending().len();
        let report = self.journal.sync_pending(&self.backend);
        match &report.failure {
            None => println!(
                "  Sync to backend:        {} of {} change(s) applied",
                report.applied, pending
            ),
            Some((index, reason)) => println!(
                "  Sync to backend:        stopped at change {}: {}",
                index, reason
            ),
        }
        print_integrity(&self.journal);
    }
}

fn print_integrity(journal: &InMemoryJournal) {
    let log = journal.export_log();
    println!(
        "  Journal integrity:      {} ({} change(s) in chain)",
        if journal.verify_integrity() { "VERIFIED" } else { "FAILED" },
        log.entries.len()
    );
}
