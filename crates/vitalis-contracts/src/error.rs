//! Error types for the vitalis crates.
//!
//! Store mutations never fail: a mutation that names a missing id is a no-op.
//! The variants below cover the boundary and the external collaborators.

use thiserror::Error;

/// The unified error type for the vitalis workspace.
#[derive(Debug, Error)]
pub enum VitalisError {
    /// A required field was empty or malformed at the input boundary.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The persistence service or the AI service failed or returned garbage.
    ///
    /// No structured error body is assumed; `reason` is for the operator.
    #[error("collaborator call failed: {reason}")]
    Collaborator { reason: String },

    /// The change journal could not record an applied mutation.
    #[error("journal write failed: {reason}")]
    JournalWriteFailed { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An AI extraction response did not survive parsing or validation.
    #[error("extraction failed: {reason}")]
    ExtractionFailed { reason: String },
}

/// Convenience alias used throughout the vitalis crates.
pub type VitalisResult<T> = Result<T, VitalisError>;
