//! # vitalis-ref
//!
//! Reference runtime for the vitalis health-record store.
//!
//! Wires the store, change journal, document analyzer and sync path to an
//! in-memory persistence service and a canned model client, then walks four
//! scenarios:
//!
//! 1. **Daily Dashboard**: greeting, score, refill banner, schedule, latest
//!    readings, dose taking, emergency card.
//! 2. **Vitals and Trends**: logging, trend series, local and AI insight.
//! 3. **Medical Documents**: capture, classification, filing, offline sync.
//! 4. **Prescription Scan**: candidate extraction and promotion.
//!
//! All data is fictional. No network calls are made.

pub mod capture;
pub mod mock_analyzer;
pub mod mock_backend;
pub mod mock_data;
pub mod scenarios;
