//! Helpers shared by the HTTP providers.

use reqwest::Response;
use serde_json::Value;

use crate::error::{classify_http_failure, extract_error_message};
use crate::provider::{LLMError, Result};

/// Flatten a reply `content` field into trimmed text.
///
/// Accepts a plain string or an array of parts (`"text"` strings or
/// `{ "text": ... }` objects). Anything else collapses to its string form.
pub(crate) fn normalize_content(content: &Value) -> String {
    match content {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Array(parts) => parts
            .iter()
            .map(|part| match part {
                Value::String(s) => s.as_str(),
                Value::Object(obj) => obj.get("text").and_then(Value::as_str).unwrap_or(""),
                _ => "",
            })
            .collect::<String>()
            .trim()
            .to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// Read a failed response and classify it.
pub(crate) async fn failure_from_response(response: Response, provider_label: &str) -> LLMError {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return LLMError::Http(e),
    };
    log::debug!("{} HTTP {}: {}", provider_label, status, body);

    let detail = extract_error_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string())
    });
    classify_http_failure(status, &detail, provider_label)
}

/// Reject an empty normalized reply.
pub(crate) fn non_empty(text: String, provider_label: &str) -> Result<String> {
    if text.is_empty() {
        return Err(LLMError::EmptyResponse(format!(
            "{provider_label} API returned an empty response"
        )));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_string_content() {
        assert_eq!(normalize_content(&json!("  hello \n")), "hello");
    }

    #[test]
    fn test_normalize_array_content() {
        let content = json!([{"type": "text", "text": "Hello, "}, "world", null, {"x": 1}]);
        assert_eq!(normalize_content(&content), "Hello, world");
    }

    #[test]
    fn test_normalize_null_is_empty() {
        assert_eq!(normalize_content(&Value::Null), "");
    }

    #[test]
    fn test_non_empty_rejects_blank() {
        let err = non_empty(String::new(), "Perplexity").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Empty response: Perplexity API returned an empty response"
        );
    }
}
