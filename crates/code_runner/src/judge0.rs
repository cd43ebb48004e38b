//! Judge0 CE client.

use ide_core::ExecutionConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::ExecutionError;

const DEMO_KEY: &str = "demo-key";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SubmissionStatus {
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

/// The subset of a Judge0 submission the IDE reads.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SubmissionResult {
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    pub status: SubmissionStatus,
}

pub struct Judge0Client {
    client: Client,
    base_url: String,
    api_key: String,
    host: String,
}

impl Judge0Client {
    pub fn new(config: &ExecutionConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEMO_KEY.to_string());

        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            host: config.host.clone(),
        }
    }

    /// Submit and wait for the result (`wait=true`, plain-text fields).
    pub async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionResult, ExecutionError> {
        log::debug!(
            "Judge0 submission: language_id={} source={} bytes stdin={} bytes",
            request.language_id,
            request.source_code.len(),
            request.stdin.len()
        );

        let response = self
            .client
            .post(format!("{}/submissions", self.base_url))
            .query(&[("base64_encoded", "false"), ("wait", "true")])
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", &self.host)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Judge0 submission failed: HTTP {}", status);
            return Err(ExecutionError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_falls_back_to_demo_key() {
        let client = Judge0Client::new(&ExecutionConfig::default());
        assert_eq!(client.api_key, "demo-key");
        assert_eq!(client.host, "judge0-ce.p.rapidapi.com");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ExecutionConfig {
            base_url: "http://localhost:2358/".into(),
            api_key: Some("k".into()),
            ..Default::default()
        };
        let client = Judge0Client::new(&config);
        assert_eq!(client.base_url, "http://localhost:2358");
        assert_eq!(client.api_key, "k");
    }

    #[test]
    fn test_result_tolerates_nulls() {
        let result: SubmissionResult = serde_json::from_str(
            r#"{"stdout":null,"stderr":null,"compile_output":null,"time":"0.01","status":{"id":3,"description":"Accepted"}}"#,
        )
        .unwrap();
        assert_eq!(result.status.id, 3);
        assert!(result.stdout.is_none());
    }
}
