//! # vitalis-extract
//!
//! Turns untrusted AI replies into partial records, failing closed.
//!
//! - [`parse`] strips code fences, decodes JSON and validates it with the
//!   `jsonschema` crate against a per-task schema.
//! - [`analyzer::ModelAnalyzer`] implements
//!   [`vitalis_core::traits::DocumentAnalyzer`] over any
//!   [`analyzer::ModelClient`] transport.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use vitalis_extract::analyzer::ModelAnalyzer;
//!
//! let analyzer = ModelAnalyzer::new(my_client);
//! for candidate in analyzer.extract_medications(&image_bytes) {
//!     if let Ok(med) = candidate.into_medication(MedicationId::generate()) {
//!         store.add_medication(med);
//!     }
//! }
//! ```

pub mod analyzer;
pub mod parse;

pub use analyzer::{ModelAnalyzer, ModelClient, ModelRequest, ModelTask};
