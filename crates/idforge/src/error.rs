//! Error types for identifier generation and batch execution.
//!
//! Errors come in two severities. Item-level failures never surface here:
//! they are recorded on the offending [`crate::Identifier`] and the batch keeps
//! going. Everything in [`Error`] is either a refusal to start (invalid
//! settings, an illegal state transition) or a job-level fault that aborts the
//! run loop.

use crate::{JobStatus, ValidationResult};

/// A result type defaulting to the crate [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Unified error type for the generation engine.
#[derive(Clone, thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Settings failed validation; the job was never started.
    #[error("Invalid settings: {}", .0.summary())]
    InvalidSettings(ValidationResult),

    /// A single value could not be produced by a strategy.
    #[error("Generation failed: {reason}")]
    Generation { reason: String },

    /// The requested lifecycle change is not allowed from the current status.
    #[error("Cannot {action} a job that is {from}")]
    InvalidTransition {
        from: JobStatus,
        action: &'static str,
    },

    /// A fault escaped the chunk loop and aborted the whole job.
    #[error("Job aborted: {reason}")]
    JobAborted { reason: String },

    /// Serialising a batch into an external representation failed.
    #[error("Export failed: {reason}")]
    Export { reason: String },
}

impl Error {
    pub(crate) fn generation(reason: impl Into<String>) -> Self {
        Self::Generation {
            reason: reason.into(),
        }
    }

    pub(crate) fn export(reason: impl core::fmt::Display) -> Self {
        Self::Export {
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::export(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::export(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_error_names_status_and_action() {
        let err = Error::InvalidTransition {
            from: JobStatus::Completed,
            action: "pause",
        };
        assert_eq!(err.to_string(), "Cannot pause a job that is completed");
    }

    #[test]
    fn generation_error_carries_reason() {
        let err = Error::generation("alphabet is empty");
        assert!(err.to_string().contains("alphabet is empty"));
    }
}
