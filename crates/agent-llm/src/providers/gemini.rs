//! Google Gemini provider (`generateContent`, non-streaming).

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::common::{failure_from_response, non_empty, normalize_content};
use crate::error::ensure_api_key;
use crate::provider::{ChatMessage, ChatOptions, ChatRole, LLMError, LLMProvider, Result};

const LABEL: &str = "Gemini";

/// Google Gemini API provider.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
        }
    }

    /// Set a custom base URL (e.g., for proxies or a local mock).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// System messages become `systemInstruction`; the rest map onto
    /// `contents` with Gemini's `user`/`model` roles.
    fn build_body(messages: &[ChatMessage], options: &ChatOptions) -> Value {
        let system = messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let contents: Vec<Value> = messages
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .map(|m| {
                let role = match m.role {
                    ChatRole::Assistant => "model",
                    _ => "user",
                };
                json!({ "role": role, "parts": [{ "text": m.content }] })
            })
            .collect();

        let mut body = json!({ "contents": contents });
        if !system.is_empty() {
            body["systemInstruction"] = json!({ "parts": [{ "text": system }] });
        }
        if let Some(temperature) = options.temperature {
            body["generationConfig"] = json!({ "temperature": temperature });
        }
        body
    }

    fn extract_text(data: &Value) -> Result<String> {
        if let Some(reason) = data["promptFeedback"]["blockReason"].as_str() {
            return Err(LLMError::SafetyBlocked(format!(
                "Prompt blocked by Gemini: {reason}"
            )));
        }

        let candidate = &data["candidates"][0];
        if candidate["finishReason"].as_str() == Some("SAFETY") {
            return Err(LLMError::SafetyBlocked(
                "Response blocked by Gemini safety settings".to_string(),
            ));
        }

        let text = normalize_content(&candidate["content"]["parts"]);
        non_empty(text, LABEL)
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String> {
        ensure_api_key(&self.api_key, LABEL)?;

        let model = options.model.as_deref().unwrap_or(&self.model);
        if options.model.is_some() {
            log::debug!(
                "Gemini provider using override model '{}' (default: '{}')",
                model,
                self.model
            );
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::build_body(messages, options))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(failure_from_response(response, LABEL).await);
        }

        let data: Value = response.json().await?;
        Self::extract_text(&data)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reply(text: &str) -> Value {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn test_new_provider() {
        let provider = GeminiProvider::new("test_key");
        assert_eq!(provider.api_key, "test_key");
        assert_eq!(
            provider.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(provider.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_body_splits_system_instruction() {
        let messages = vec![
            ChatMessage::system("be terse"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ];
        let body = GeminiProvider::build_body(&messages, &ChatOptions::with_temperature(0.2));

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be terse");
        assert_eq!(body["contents"].as_array().unwrap().len(), 2);
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert!((body["generationConfig"]["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_body_without_system_or_temperature() {
        let body = GeminiProvider::build_body(&[ChatMessage::user("hi")], &ChatOptions::default());
        assert!(body.get("systemInstruction").is_none());
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_extract_joins_parts() {
        let data = json!({
            "candidates": [{"content": {"parts": [{"text": "a"}, {"text": "b "}]}}]
        });
        assert_eq!(GeminiProvider::extract_text(&data).unwrap(), "ab");
    }

    #[test]
    fn test_extract_blocked_prompt() {
        let data = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = GeminiProvider::extract_text(&data).unwrap_err();
        assert_eq!(err.kind(), FailureKind::SafetyBlocked);
    }

    #[test]
    fn test_extract_safety_finish_reason() {
        let data = json!({"candidates": [{"finishReason": "SAFETY"}]});
        let err = GeminiProvider::extract_text(&data).unwrap_err();
        assert_eq!(err.kind(), FailureKind::SafetyBlocked);
    }

    #[tokio::test]
    async fn test_successful_chat() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "gm-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("\nHere you go\n")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("gm-key").with_base_url(server.uri());
        let text = provider
            .chat(&[ChatMessage::user("write code")], &ChatOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "Here you go");
    }

    #[tokio::test]
    async fn test_model_override_changes_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("k").with_base_url(server.uri());
        let options = ChatOptions {
            temperature: None,
            model: Some("gemini-2.5-pro".into()),
        };
        assert_eq!(
            provider.chat(&[ChatMessage::user("x")], &options).await.unwrap(),
            "ok"
        );
    }

    #[tokio::test]
    async fn test_invalid_key_is_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("bad").with_base_url(server.uri());
        let err = provider
            .chat(&[ChatMessage::user("x")], &ChatOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Auth);
    }

    #[tokio::test]
    async fn test_resource_exhausted_is_quota() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"code": 429, "message": "You exceeded your current quota", "status": "RESOURCE_EXHAUSTED"}
            })))
            .mount(&server)
            .await;

        let provider = GeminiProvider::new("k").with_base_url(server.uri());
        let err = provider
            .chat(&[ChatMessage::user("x")], &ChatOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Quota);
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration() {
        let provider = GeminiProvider::new("your-gemini-api-key-here");
        let err = provider
            .chat(&[ChatMessage::user("x")], &ChatOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Configuration);
        assert!(err.to_string().contains("Gemini API key not configured"));
    }
}
