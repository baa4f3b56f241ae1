//! Error types for the inquiry forms

use thiserror::Error;

use crate::submit::SubmitError;
use crate::validation::ValidationErrors;

/// Inquiry forms error type
#[derive(Error, Debug)]
pub enum FormsError {
    /// Service id that is not part of the closed category set
    #[error("unknown service category: {0}")]
    UnknownCategory(String),

    /// Schema and ruleset tables disagree; a programming error, not a user error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Field id not declared by the active schema
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// One or more visible fields failed their rule
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(ValidationErrors),

    /// Action not allowed in the current wizard state
    #[error("invalid transition: {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: String,
    },

    /// A submission is already outstanding
    #[error("submission in flight")]
    SubmissionInFlight,

    /// Session already submitted; read-only until discarded
    #[error("session already submitted")]
    Finished,

    /// Submission endpoint rejected the inquiry or was unreachable
    #[error("submission failed: {0}")]
    Submission(#[from] SubmitError),
}

/// Result type for the inquiry forms
pub type Result<T> = std::result::Result<T, FormsError>;
