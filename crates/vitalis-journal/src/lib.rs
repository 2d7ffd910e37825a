//! # vitalis-journal
//!
//! Append-only, SHA-256 hash-chained journal of applied store changes.
//!
//! ## Overview
//!
//! The store is a local cache of the persistence service. Every mutation it
//! applies is appended here as a `JournalEntry` linked to its predecessor by
//! hash, so the change history can be replayed to the backend in order and
//! any in-memory tampering is detected by `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitalis_journal::InMemoryJournal;
//!
//! let journal = InMemoryJournal::new("session-001");
//! let mut store = HealthRecordStore::new(snapshot, rules)
//!     .with_journal(Box::new(journal.clone()));
//! store.take_dose(&id);
//!
//! assert!(journal.verify_integrity());
//! let report = journal.sync_pending(&backend);
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use event::{JournalEntry, JournalLog};
pub use memory::InMemoryJournal;

// ── Tests ─────────────────────────────────────────────────────────────────────
