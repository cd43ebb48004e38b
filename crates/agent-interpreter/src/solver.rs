//! Error solver: analyze, auto-fix and debug flows.
//!
//! Unlike chat turns these never go through the sentinel protocol. The model
//! is asked for raw code and any fences it adds anyway are stripped.

use std::sync::Arc;

use agent_llm::{ChatMessage, ChatOptions, LLMError, LLMProvider};
use ide_core::SessionContext;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{InterpreterError, Result};

const DEBUG_TEMPERATURE: f32 = 0.15;

static FENCE_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```\w*\n?").expect("static fence marker pattern"));

/// Remove every fence marker (with its optional annotation) and trim.
pub fn strip_code_fences(text: &str) -> String {
    FENCE_MARKER_RE.replace_all(text, "").trim().to_string()
}

pub struct ErrorSolver {
    /// Used by analyze and auto-fix.
    assistant: Arc<dyn LLMProvider>,
    /// Used by debug.
    debugger: Arc<dyn LLMProvider>,
}

impl ErrorSolver {
    pub fn new(assistant: Arc<dyn LLMProvider>, debugger: Arc<dyn LLMProvider>) -> Self {
        Self {
            assistant,
            debugger,
        }
    }

    fn require_error<'a>(context: &'a SessionContext, action: &'static str) -> Result<&'a str> {
        context
            .last_error
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or(InterpreterError::NoError(action))
    }

    /// Ask for an explanation, a solution, fixed code and prevention tips.
    pub async fn analyze(&self, context: &SessionContext) -> Result<String> {
        let error = Self::require_error(context, "analyze")?;
        let tag = context.language.tag();

        let prompt = format!(
            "You are an expert {tag} programmer and debugging assistant. Analyze this error and provide a solution.

Language: {tag}

Code:
```{tag}
{code}
```

Error Message:
{error}

Please provide:
1. **Error Explanation**: What caused this error?
2. **Solution**: How to fix it?
3. **Fixed Code**: Provide the corrected version of the code (if applicable)
4. **Prevention Tips**: How to avoid this error in the future?

Format your response clearly with sections.",
            code = context.source_code,
        );

        log::info!("Analyzing {} error with {}", tag, self.assistant.name());
        let analysis = self
            .assistant
            .chat(&[ChatMessage::user(prompt)], &ChatOptions::default())
            .await?;
        Ok(analysis)
    }

    /// Ask for the fixed code only. Returns the replacement source.
    pub async fn auto_fix(&self, context: &SessionContext) -> Result<String> {
        let error = Self::require_error(context, "fix")?;
        let tag = context.language.tag();

        let prompt = format!(
            "You are an expert {tag} programmer. Fix this code that has an error.

Language: {tag}

Current Code:
```{tag}
{code}
```

Error Message:
{error}

IMPORTANT: Respond ONLY with the fixed code. Do not include any explanations, markdown formatting, or code block markers. Just provide the raw corrected code that can be directly used.",
            code = context.source_code,
        );

        let reply = self
            .assistant
            .chat(&[ChatMessage::user(prompt)], &ChatOptions::default())
            .await?;
        Self::fixed_code(&reply, self.assistant.name())
    }

    /// Like [`Self::auto_fix`] but with a system role and a low temperature.
    pub async fn debug(&self, context: &SessionContext) -> Result<String> {
        let error = Self::require_error(context, "debug")?;
        let tag = context.language.tag();

        let system = format!(
            "You are an expert {tag} programmer. When asked to fix code, reply with the fully corrected source ready to paste into the editor."
        );
        let prompt = format!(
            "Current Code:
```{tag}
{code}
```

Error Message:
{error}

Respond ONLY with the fixed code. Do not include explanations, markdown, or code fences, just the raw corrected code.",
            code = context.source_code,
        );

        let reply = self
            .debugger
            .chat(
                &[ChatMessage::system(system), ChatMessage::user(prompt)],
                &ChatOptions::with_temperature(DEBUG_TEMPERATURE),
            )
            .await?;
        Self::fixed_code(&reply, self.debugger.name())
    }

    fn fixed_code(reply: &str, provider: &str) -> Result<String> {
        let code = strip_code_fences(reply);
        if code.is_empty() {
            return Err(LLMError::EmptyResponse(format!("{provider} returned no code")).into());
        }
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```python\nprint(1)\n```"), "print(1)");
        assert_eq!(strip_code_fences("  x = 1  "), "x = 1");
        assert_eq!(
            strip_code_fences("```\na\n```\n```js\nb\n```"),
            "a\nb"
        );
    }

    #[test]
    fn test_fixed_code_rejects_empty() {
        let err = ErrorSolver::fixed_code("```\n```", "gemini").unwrap_err();
        assert!(matches!(err, InterpreterError::LLM(LLMError::EmptyResponse(_))));
    }
}
