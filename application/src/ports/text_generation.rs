//! Text generation port
//!
//! Defines the interface to the service that turns a prompt into free-form
//! text. Implementations live in the infrastructure layer.

use async_trait::async_trait;
use atlas_domain::Message;
use thiserror::Error;

/// Errors that can occur during a text-generation call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Timeout")]
    Timeout,

    #[error("Empty response")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Text-generation service
///
/// One handle is constructed at process start and shared by the coordinator
/// and every agent, so implementations must tolerate concurrent calls.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply to `messages`; `temperature` overrides the default
    async fn generate(
        &self,
        messages: &[Message],
        temperature: Option<f32>,
    ) -> Result<String, GenerationError>;

    /// Check the service answers a tiny prompt
    async fn check_auth(&self) -> bool {
        self.generate(&[Message::user("Test")], Some(0.1))
            .await
            .is_ok()
    }
}
