//! OpenAI-compatible chat completion adapter
//!
//! Works with any server exposing `POST {base_url}/chat/completions`.
//! One instance is shared by the coordinator and every agent; the inner
//! `reqwest::Client` pools connections across concurrent calls.

use crate::config::FileLlmConfig;
use async_trait::async_trait;
use atlas_application::ports::text_generation::{GenerationError, TextGenerator};
use atlas_domain::Message;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors building the generator at process start
#[derive(Error, Debug)]
pub enum LlmSetupError {
    #[error("API key not found: set the {env} environment variable")]
    MissingApiKey { env: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`TextGenerator`] backed by an OpenAI-compatible HTTP API
pub struct OpenAiTextGenerator {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    default_temperature: f32,
}

impl OpenAiTextGenerator {
    /// Build from the `[llm]` section, reading the key from `api_key_env`
    pub fn from_config(config: &FileLlmConfig) -> Result<Self, LlmSetupError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmSetupError::MissingApiKey {
                env: config.api_key_env.clone(),
            })?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(
        config: &FileLlmConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmSetupError> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        let generator = Self {
            http: builder.build()?,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            default_temperature: config.temperature,
        };
        info!(model = %generator.model, endpoint = %generator.endpoint, "Text generator initialized");
        Ok(generator)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, messages: &'a [Message], temperature: Option<f32>) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            max_tokens: self.max_tokens,
            temperature: temperature.unwrap_or(self.default_temperature),
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout
    } else if e.is_connect() {
        GenerationError::ConnectionError(e.to_string())
    } else {
        GenerationError::Other(e.to_string())
    }
}

/// Pull the first choice's text out of a chat completion body
fn extract_content(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GenerationError::EmptyResponse)
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate(
        &self,
        messages: &[Message],
        temperature: Option<f32>,
    ) -> Result<String, GenerationError> {
        debug!(messages = messages.len(), ?temperature, "Sending chat completion");

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(messages, temperature))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(GenerationError::RequestFailed {
                status: status.as_u16(),
                message: body,
            });
        }

        extract_content(&body)
    }
}
