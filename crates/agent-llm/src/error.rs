//! Failure classification for LLM calls.
//!
//! Providers turn HTTP failures into [`LLMError`] variants; callers use
//! [`FailureKind`] and [`LLMError::user_message`] to pick what the user sees.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub use crate::provider::LLMError;

/// Placeholder values shipped in sample `.env` files. They count as missing.
pub const PLACEHOLDER_KEYS: &[&str] = &["your-openai-api-key-here", "your-gemini-api-key-here"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Configuration,
    Auth,
    Quota,
    RateLimit,
    SafetyBlocked,
    Generic,
}

impl LLMError {
    pub fn kind(&self) -> FailureKind {
        match self {
            LLMError::Config(_) => FailureKind::Configuration,
            LLMError::Auth(_) => FailureKind::Auth,
            LLMError::Quota(_) => FailureKind::Quota,
            LLMError::RateLimit(_) => FailureKind::RateLimit,
            LLMError::SafetyBlocked(_) => FailureKind::SafetyBlocked,
            LLMError::EmptyResponse(_)
            | LLMError::Api(_)
            | LLMError::Http(_)
            | LLMError::Json(_) => FailureKind::Generic,
        }
    }

    /// Plain-language hint for the chat panel.
    pub fn user_message(&self) -> String {
        match self.kind() {
            FailureKind::Configuration | FailureKind::Auth => {
                "Please make sure your API key is configured correctly.".to_string()
            }
            FailureKind::Quota | FailureKind::RateLimit => {
                "API quota exceeded. Please try again later or check your API key limits."
                    .to_string()
            }
            FailureKind::SafetyBlocked => {
                "The content was blocked by safety filters. Try rephrasing your question."
                    .to_string()
            }
            FailureKind::Generic => format!("Error: {self}"),
        }
    }
}

/// Reject empty and placeholder keys before any request goes out.
pub fn ensure_api_key(api_key: &str, provider_label: &str) -> Result<(), LLMError> {
    let key = api_key.trim();
    if key.is_empty() || PLACEHOLDER_KEYS.contains(&key) {
        return Err(LLMError::Config(format!(
            "{provider_label} API key not configured"
        )));
    }
    Ok(())
}

/// Pull `error.message` out of a JSON error body, if there is one.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|e| e.get("message").or(Some(e)))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}

/// Map a non-2xx response onto the error taxonomy.
///
/// `detail` is the provider's message when the body carried one, else the
/// status reason.
pub fn classify_http_failure(status: StatusCode, detail: &str, provider_label: &str) -> LLMError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("blocked") || lower.contains("safety") {
        return LLMError::SafetyBlocked(detail.to_string());
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            if lower.contains("quota") {
                LLMError::Quota(format!(
                    "{provider_label} API quota exceeded. Please check your usage and billing settings."
                ))
            } else {
                LLMError::RateLimit(
                    "Rate limit exceeded. Please wait a moment and try again.".to_string(),
                )
            }
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LLMError::Auth(format!(
            "Invalid {provider_label} API key. Please check your configuration."
        )),
        _ if lower.contains("api key") => LLMError::Auth(format!(
            "{provider_label} rejected the API key: {detail}"
        )),
        _ if lower.contains("quota") => LLMError::Quota(format!(
            "{provider_label} API quota exceeded: {detail}"
        )),
        _ => LLMError::Api(format!("{provider_label} API request failed: {detail}")),
    }
}
