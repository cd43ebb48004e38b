use ide_core::Language;
use thiserror::Error;

/// Shown to the user for any transport failure.
pub const TRANSPORT_FAILURE_MESSAGE: &str =
    "An error occurred while executing the code. Make sure you have set up the Judge0 API key.";

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Language {0} cannot be executed remotely")]
    UnsupportedLanguage(Language),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Judge0 returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExecutionError {
    /// Message for the output console. Distinct from program errors.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExecutionError::UnsupportedLanguage(_) => "This language cannot be executed.",
            _ => TRANSPORT_FAILURE_MESSAGE,
        }
    }
}
