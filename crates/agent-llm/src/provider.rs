use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    /// Missing or placeholder credential, detected before any request.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Blocked by safety filters: {0}")]
    SafetyBlocked(String),

    #[error("Empty response: {0}")]
    EmptyResponse(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LLMError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message sent to a provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-request knobs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatOptions {
    /// Sampling temperature. Providers fall back to their own default when `None`.
    pub temperature: Option<f32>,
    /// Model override. If `None`, the provider's default model is used.
    pub model: Option<String>,
}

impl ChatOptions {
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            model: None,
        }
    }
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send an ordered list of messages and return the single text reply.
    ///
    /// The reply is already normalized: trimmed and never empty.
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String>;

    /// Short provider name used in logs ("perplexity", "gemini").
    fn name(&self) -> &str;
}
