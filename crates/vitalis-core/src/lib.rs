//! # vitalis-core
//!
//! The in-memory health-record store and everything derived from it.
//!
//! This crate provides:
//! - `HealthRecordStore`: the single owner of profile, medications, vitals,
//!   reports and health score
//! - Derived read-only queries (`VitalSeries`, `TrendSummary`, `RefillAlert`)
//! - The collaborator traits (`PersistenceService`, `DocumentAnalyzer`,
//!   `ChangeJournal`) and journal replay against a backend
//! - TOML configuration
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vitalis_core::{HealthRecordStore, config::VitalisConfig};
//!
//! let config = VitalisConfig::from_toml_str(text)?.with_env_overrides();
//! let mut store = HealthRecordStore::new(snapshot, config.score.clone());
//! store.take_dose(&med_id);
//! println!("{}", store.trend_summary(VitalType::BloodPressure));
//! ```

pub mod config;
pub mod query;
pub mod score;
pub mod store;
pub mod sync;
pub mod traits;

pub use score::HealthScore;
pub use store::HealthRecordStore;
