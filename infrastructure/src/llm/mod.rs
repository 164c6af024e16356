//! Text-generation adapters

mod openai;

pub use openai::{LlmSetupError, OpenAiTextGenerator};
