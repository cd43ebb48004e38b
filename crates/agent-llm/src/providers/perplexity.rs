//! Perplexity provider (OpenAI-compatible chat completions, non-streaming).

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::common::{failure_from_response, non_empty, normalize_content};
use crate::error::ensure_api_key;
use crate::provider::{ChatMessage, ChatOptions, LLMError, LLMProvider, Result};

const LABEL: &str = "Perplexity";
const DEFAULT_TEMPERATURE: f32 = 0.4;

pub struct PerplexityProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl PerplexityProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.perplexity.ai".to_string(),
            model: "sonar".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_body(&self, messages: &[ChatMessage], options: &ChatOptions) -> Value {
        json!({
            "model": options.model.as_deref().unwrap_or(&self.model),
            "temperature": options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            "messages": messages,
        })
    }
}

#[async_trait]
impl LLMProvider for PerplexityProvider {
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String> {
        ensure_api_key(&self.api_key, LABEL)?;

        let body = self.build_body(messages, options);
        log::debug!(
            "Perplexity request: model={} messages={}",
            body["model"],
            messages.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(match failure_from_response(response, LABEL).await {
                LLMError::Quota(_) => LLMError::Quota(
                    "Perplexity API quota exceeded. Please check your usage at https://www.perplexity.ai/settings/api"
                        .to_string(),
                ),
                other => other,
            });
        }

        let data: Value = response.json().await?;
        let content = &data["choices"][0]["message"]["content"];
        non_empty(normalize_content(content), LABEL)
    }

    fn name(&self) -> &str {
        "perplexity"
    }
}
