use std::time::Instant;

use ide_core::{ExecutionConfig, Language};

use crate::error::ExecutionError;
use crate::judge0::{Judge0Client, SubmissionRequest};
use crate::outcome::{ExecutionOutcome, ExecutionReport};

pub struct ExecutionRunner {
    client: Judge0Client,
}

impl ExecutionRunner {
    pub fn new(config: &ExecutionConfig) -> Self {
        Self {
            client: Judge0Client::new(config),
        }
    }

    pub async fn run(
        &self,
        language: Language,
        source: &str,
        stdin: &str,
    ) -> Result<ExecutionReport, ExecutionError> {
        let started = Instant::now();

        if language.is_previewed_locally() {
            let outcome = ExecutionOutcome::HtmlPreview {
                source: source.to_string(),
            };
            return Ok(ExecutionReport::new(outcome, elapsed_ms(started)));
        }

        let language_id = language
            .judge0_id()
            .ok_or(ExecutionError::UnsupportedLanguage(language))?;

        let request = SubmissionRequest {
            source_code: source.to_string(),
            language_id,
            stdin: stdin.to_string(),
        };
        let result = self.client.submit(&request).await?;
        let elapsed = elapsed_ms(started);

        log::info!(
            "Judge0 run for {} finished with status {} ({}) in {} ms",
            language,
            result.status.id,
            result.status.description,
            elapsed
        );
        Ok(ExecutionReport::new(
            ExecutionOutcome::from_submission(result),
            elapsed,
        ))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner_for(server: &MockServer) -> ExecutionRunner {
        ExecutionRunner::new(&ExecutionConfig {
            base_url: server.uri(),
            api_key: Some("rapid-key".into()),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_html_never_hits_network() {
        let server = MockServer::start().await;
        let report = runner_for(&server)
            .run(Language::Html, "<p>hi</p>", "")
            .await
            .unwrap();

        assert_eq!(report.output, "HTML Preview:\n\n<p>hi</p>");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submission_shape_and_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submissions"))
            .and(query_param("base64_encoded", "false"))
            .and(query_param("wait", "true"))
            .and(header("X-RapidAPI-Key", "rapid-key"))
            .and(header("X-RapidAPI-Host", "judge0-ce.p.rapidapi.com"))
            .and(body_json(json!({
                "source_code": "print(input())",
                "language_id": 71,
                "stdin": "hello"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "stdout": "hello\n",
                "stderr": null,
                "compile_output": null,
                "status": {"id": 3, "description": "Accepted"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let report = runner_for(&server)
            .run(Language::Python, "print(input())", "hello")
            .await
            .unwrap();

        assert_eq!(report.output, "hello\n");
        assert_eq!(report.error, None);
        assert!(matches!(report.outcome, ExecutionOutcome::Accepted { .. }));
    }

    #[tokio::test]
    async fn test_runtime_error_is_not_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submissions"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "stdout": "",
                "stderr": "ZeroDivisionError: division by zero",
                "status": {"id": 11, "description": "Runtime Error (NZEC)"}
            })))
            .mount(&server)
            .await;

        let report = runner_for(&server)
            .run(Language::Python, "1/0", "")
            .await
            .unwrap();
        assert_eq!(
            report.error.as_deref(),
            Some("ZeroDivisionError: division by zero")
        );
    }

    #[tokio::test]
    async fn test_non_2xx_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = runner_for(&server)
            .run(Language::Rust, "fn main() {}", "")
            .await
            .unwrap_err();

        assert!(matches!(err, ExecutionError::Api { status: 403, .. }));
        assert!(err.user_message().contains("Judge0 API key"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = runner_for(&server)
            .run(Language::Go, "package main", "")
            .await
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Json(_)));
    }
}
