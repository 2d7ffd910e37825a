//! In-memory implementation of `ChangeJournal`.
//!
//! `InMemoryJournal` keeps its entries in a `Vec` behind `Arc<Mutex<_>>`.
//! Clones share the same chain, so one clone can be handed to the store while
//! another is kept for export and sync.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;

use vitalis_contracts::{
    change::StoreChange,
    error::{VitalisError, VitalisResult},
};
use vitalis_core::{
    sync::{self, SyncReport},
    traits::{ChangeJournal, PersistenceService},
};

use crate::{
    chain::{hash_entry, verify_chain},
    event::{JournalEntry, JournalLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

pub(crate) struct JournalState {
    /// Entries in append order.
    pub(crate) entries: Vec<JournalEntry>,

    /// Next sequence number to assign.
    pub(crate) sequence: u64,

    /// `this_hash` of the last entry, or `GENESIS_HASH`.
    pub(crate) last_hash: String,

    /// Leading entries already acknowledged by the persistence service.
    pub(crate) synced: usize,
}

// ── Public journal ────────────────────────────────────────────────────────────

/// An append-only journal backed by a SHA-256 hash chain.
///
/// Syncs from any clone are serialized: at most one replay runs at a time.
#[derive(Clone)]
pub struct InMemoryJournal {
    journal_id: String,
    pub(crate) state: Arc<Mutex<JournalState>>,
    sync_lock: Arc<Mutex<()>>,
}

impl InMemoryJournal {
    pub fn new(journal_id: impl Into<String>) -> Self {
        let state = JournalState {
            entries: Vec::new(),
            sequence: 0,
            last_hash: JournalEntry::GENESIS_HASH.to_string(),
            synced: 0,
        };
        Self {
            journal_id: journal_id.into(),
            state: Arc::new(Mutex::new(state)),
            sync_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn journal_id(&self) -> &str {
        &self.journal_id
    }

    pub fn len(&self) -> usize {
        self.state.lock().expect("journal state lock poisoned").entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export every entry written so far.
    pub fn export_log(&self) -> JournalLog {
        let state = self.state.lock().expect("journal state lock poisoned");
        let terminal_hash = state
            .entries
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        JournalLog {
            journal_id: self.journal_id.clone(),
            entries: state.entries.clone(),
            synced: state.synced,
            exported_at: Utc::now(),
            terminal_hash,
        }
    }

    /// Confirm the in-memory chain has not been altered.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("journal state lock poisoned");
        verify_chain(&state.entries)
    }

    /// Changes not yet acknowledged by the persistence service, in order.
    pub fn pending(&self) -> Vec<StoreChange> {
        self.pending_from().1
    }

    /// The index of the first unacknowledged entry, and the changes from it on.
    pub fn pending_from(&self) -> (usize, Vec<StoreChange>) {
        let state = self.state.lock().expect("journal state lock poisoned");
        let changes = state.entries[state.synced..]
            .iter()
            .map(|e| e.change.clone())
            .collect();
        (state.synced, changes)
    }

    /// Acknowledge `count` changes starting at entry `from`.
    ///
    /// `from` must be the index returned by the `pending_from` call the
    /// changes came from. If the acknowledged prefix has moved since, nothing
    /// changes and false is returned. The count is clamped to the entries
    /// that exist.
    pub fn acknowledge(&self, from: usize, count: usize) -> bool {
        let mut state = self.state.lock().expect("journal state lock poisoned");
        if state.synced != from {
            return false;
        }
        state.synced = from.saturating_add(count).min(state.entries.len());
        true
    }

    /// Replay pending changes to `backend` and acknowledge what it accepted.
    ///
    /// Stops at the first failure; the failed change stays pending for the
    /// next user-initiated attempt. Changes appended while the replay runs
    /// are left for the next sync.
    pub fn sync_pending(&self, backend: &dyn PersistenceService) -> SyncReport {
        let _guard = self.sync_lock.lock().expect("journal sync lock poisoned");
        let (from, pending) = self.pending_from();
        let report = sync::replay(&pending, backend);
        self.acknowledge(from, report.applied);
        report
    }
}

// ── ChangeJournal impl ────────────────────────────────────────────────────────

impl ChangeJournal for InMemoryJournal {
    /// Link `change` onto the chain.
    ///
    /// Fails only if the internal mutex is poisoned.
    fn append(&self, change: &StoreChange) -> VitalisResult<()> {
        let mut state = self.state.lock().map_err(|e| VitalisError::JournalWriteFailed {
            reason: format!("journal state lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;
        let recorded_at = Utc::now();

        let this_hash = hash_entry(&self.journal_id, sequence, &prev_hash, &recorded_at, change);

        state.entries.push(JournalEntry {
            sequence,
            journal_id: self.journal_id.clone(),
            change: change.clone(),
            recorded_at,
            prev_hash,
            this_hash: this_hash.clone(),
        });
        state.sequence += 1;
        state.last_hash = this_hash;

        info!(
            journal_id = %self.journal_id,
            sequence,
            kind = change.kind(),
            "change journaled"
        );

        Ok(())
    }
}
