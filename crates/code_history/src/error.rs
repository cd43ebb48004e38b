use ide_core::Notification;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Please sign in to save your code.")]
    NotSignedIn,

    #[error("Write some code first.")]
    NothingToSave,

    #[error("Code history is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Supabase returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HistoryError>;

impl HistoryError {
    pub fn notification(&self) -> Notification {
        match self {
            HistoryError::NotSignedIn => Notification::destructive("Sign in required", self.to_string()),
            HistoryError::NothingToSave => Notification::destructive("Nothing to save", self.to_string()),
            _ => Notification::destructive("Error", self.to_string()),
        }
    }
}
