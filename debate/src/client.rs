//! Reasoning-client boundary — structured generation against a hosted
//! language-model endpoint.
//!
//! The protocol core depends only on the [`ReasoningClient`] trait: prompt
//! in, parsed JSON out, or a [`GenerationError`] propagated unchanged. No
//! retry or backoff lives here; the HTTP client's timeout is the only
//! failure budget.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Errors from the reasoning collaborator. Propagated unchanged by the
/// core — never retried, never suppressed.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("API error ({status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("response contained no content")]
    MissingContent,

    #[error("model output is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("API key not configured ({0})")]
    MissingApiKey(String),
}

/// A hosted text-generation endpoint that returns structured JSON.
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    /// Generate a JSON-shaped response for `prompt`, bounded by
    /// `max_output_tokens`.
    async fn generate_structured(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<Value, GenerationError>;
}

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const GROQ_API_KEY_VAR: &str = "GROQ_API_KEY";

/// Configuration for the Groq-backed client.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// Chat-completions endpoint URL.
    pub api_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_url: GROQ_API_URL.to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.3,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Groq chat-completions client with JSON-mode responses.
pub struct GroqClient {
    config: GroqConfig,
    api_key: String,
    http: reqwest::Client,
}

impl GroqClient {
    /// Build a client with the key from `GROQ_API_KEY`.
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = std::env::var(GROQ_API_KEY_VAR)
            .map_err(|_| GenerationError::MissingApiKey(GROQ_API_KEY_VAR.to_string()))?;
        Self::new(api_key, GroqConfig::default())
    }

    /// Build a client with an explicit key and config.
    pub fn new(api_key: String, config: GroqConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;
        Ok(Self {
            config,
            api_key,
            http,
        })
    }

    /// The configured model identifier.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl ReasoningClient for GroqClient {
    async fn generate_structured(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<Value, GenerationError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: max_output_tokens,
            temperature: self.config.temperature,
            response_format: ResponseFormat {
                format: "json_object".to_string(),
            },
        };

        debug!(
            model = %self.config.model,
            max_tokens = max_output_tokens,
            prompt_chars = prompt.len(),
            "dispatching generation request"
        );

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::ApiError { status, body });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(GenerationError::MissingContent)?;

        let value: Value = serde_json::from_str(&content)?;
        Ok(value)
    }
}
