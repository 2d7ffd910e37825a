//! Hash-chain primitives.
//!
//! Hash input layout (bytes, in order):
//!   1. journal_id as UTF-8
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 (64 ASCII hex chars)
//!   4. recorded_at as RFC 3339 UTF-8
//!   5. compact JSON of the change

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

use vitalis_contracts::change::StoreChange;

use crate::event::JournalEntry;

/// Compute the lowercase hex SHA-256 for one entry.
///
/// # Panics
///
/// Panics if `change` cannot be serialized to JSON, which cannot happen for
/// `StoreChange`.
pub fn hash_entry(
    journal_id: &str,
    sequence: u64,
    prev_hash: &str,
    recorded_at: &DateTime<Utc>,
    change: &StoreChange,
) -> String {
    let change_json =
        serde_json::to_vec(change).expect("StoreChange must always be serializable to JSON");

    let mut hasher = Sha256::new();
    hasher.update(journal_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(
        recorded_at
            .to_rfc3339_opts(SecondsFormat::Nanos, true)
            .as_bytes(),
    );
    hasher.update(&change_json);

    hex::encode(hasher.finalize())
}

/// Check prev-hash linkage and recompute every hash.
///
/// Returns false at the first mismatch. An empty chain is valid.
pub fn verify_chain(entries: &[JournalEntry]) -> bool {
    let mut expected_prev = JournalEntry::GENESIS_HASH.to_string();

    for entry in entries {
        if entry.prev_hash != expected_prev {
            return false;
        }

        let recomputed = hash_entry(
            &entry.journal_id,
            entry.sequence,
            &entry.prev_hash,
            &entry.recorded_at,
            &entry.change,
        );
        if entry.this_hash != recomputed {
            return false;
        }

        expected_prev = entry.this_hash.clone();
    }

    true
}
