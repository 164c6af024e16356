//! Infrastructure layer for atlas
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod context;
pub mod llm;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentsConfig, FileConfig, FileLlmConfig,
    FileLoggingConfig, FileOutputConfig, FileRoutingConfig, FileWorkflowConfig,
};
pub use context::JsonContextProvider;
pub use llm::{LlmSetupError, OpenAiTextGenerator};
pub use logging::JsonlConversationLogger;
