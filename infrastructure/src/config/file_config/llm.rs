//! Text-generation backend configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Base URL of the API (the `/chat/completions` path is appended)
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Temperature used when a caller does not pass one
    pub temperature: f32,
    /// Per-call timeout. `None` waits for the server.
    pub timeout_seconds: Option<u64>,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: 1024,
            temperature: 0.5,
            timeout_seconds: None,
            api_key_env: "OPENAI_KEY".to_string(),
        }
    }
}
