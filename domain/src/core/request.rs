//! Request value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A learner's request to the assistant (Value Object)
///
/// Always non-empty after trimming. Validation happens at the CLI/session
/// boundary, before anything is dispatched to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    content: String,
}

impl Request {
    /// Create a request, rejecting empty or whitespace-only text
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidRequest(
                "request text cannot be empty".to_string(),
            ));
        }
        Ok(Self { content })
    }

    /// Get the request text
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner text
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<&str> for Request {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Request::try_new(s)
    }
}
