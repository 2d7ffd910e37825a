//! Journal entry and log types.
//!
//! `JournalEntry` wraps one applied `StoreChange` with a sequence number and
//! the SHA-256 hashes that link it to its predecessor. `JournalLog` is the
//! exported copy of a whole journal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitalis_contracts::change::StoreChange;

/// A single link in the hash chain.
///
/// Changing any field, including the embedded `change`, invalidates
/// `this_hash` and every later `prev_hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The journal (one per store session) this entry belongs to.
    pub journal_id: String,

    /// The mutation the store applied.
    pub change: StoreChange,

    /// When the journal accepted the change (UTC).
    pub recorded_at: DateTime<Utc>,

    /// Hex SHA-256 of the previous entry, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// Hex SHA-256 over (journal_id, sequence, prev_hash, recorded_at, change).
    pub this_hash: String,
}

impl JournalEntry {
    /// The `prev_hash` of the first entry in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// An exported journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLog {
    pub journal_id: String,

    /// All entries in chain order.
    pub entries: Vec<JournalEntry>,

    /// How many leading entries the persistence service has acknowledged.
    pub synced: usize,

    pub exported_at: DateTime<Utc>,

    /// `this_hash` of the last entry. Empty when the journal is empty.
    pub terminal_hash: String,
}
