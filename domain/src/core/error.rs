//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    #[error("Invalid timestamp '{value}': {reason}")]
    InvalidTimestamp { value: String, reason: String },

    #[error("Malformed record: missing field '{0}'")]
    MissingField(String),
}

impl DomainError {
    /// Check if this error came from a malformed input record
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidTimestamp { .. } | DomainError::MissingField(_)
        )
    }
}
