use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use agent_interpreter::InterpreterError;
use code_history::HistoryError;
use code_runner::ExecutionError;
use ide_core::{Notification, UnknownLanguage};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Session '{0}' not found")]
    SessionNotFound(Uuid),

    #[error("History entry '{0}' not found")]
    EntryNotFound(String),

    #[error("A bearer access token is required")]
    MissingToken,

    #[error(transparent)]
    UnknownLanguage(#[from] UnknownLanguage),

    #[error(transparent)]
    Interpreter(#[from] InterpreterError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    History(#[from] HistoryError),

    /// A solver flow failed; the notification title names the flow.
    #[error("{title}: {source}")]
    Solver {
        title: &'static str,
        #[source]
        source: InterpreterError,
    },
}

impl AppError {
    pub fn solver(title: &'static str, source: InterpreterError) -> Self {
        AppError::Solver { title, source }
    }

    /// Toast shown alongside the error body.
    pub fn notification(&self) -> Option<Notification> {
        match self {
            AppError::Interpreter(InterpreterError::NoError(_)) => {
                Some(Notification::info("No Error", self.to_string()))
            }
            AppError::Interpreter(InterpreterError::LLM(e)) => {
                Some(Notification::destructive("Error", e.user_message()))
            }
            AppError::Solver { source, .. } if matches!(source, InterpreterError::NoError(_)) => {
                Some(Notification::info("No Error", source.to_string()))
            }
            AppError::Solver { title, source } => {
                let description = match source {
                    InterpreterError::LLM(e) => e.user_message(),
                    other => other.to_string(),
                };
                Some(Notification::destructive(*title, description))
            }
            AppError::Execution(e) => Some(Notification::destructive("Error", e.user_message())),
            AppError::History(e) => Some(e.notification()),
            AppError::MissingToken => Some(HistoryError::NotSignedIn.notification()),
            _ => None,
        }
    }
}

#[derive(Serialize)]
struct JsonError {
    message: String,
    r#type: String,
}

#[derive(Serialize)]
struct JsonErrorWrapper {
    error: JsonError,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<Notification>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::SessionNotFound(_) | AppError::EntryNotFound(_) => StatusCode::NOT_FOUND,
            AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::UnknownLanguage(_) => StatusCode::BAD_REQUEST,
            AppError::Interpreter(e) | AppError::Solver { source: e, .. } => match e {
                InterpreterError::EmptyUtterance | InterpreterError::NoError(_) => {
                    StatusCode::BAD_REQUEST
                }
                InterpreterError::LLM(_) => StatusCode::BAD_GATEWAY,
            },
            AppError::Execution(ExecutionError::UnsupportedLanguage(_)) => StatusCode::BAD_REQUEST,
            AppError::Execution(_) => StatusCode::BAD_GATEWAY,
            AppError::History(e) => match e {
                HistoryError::NotSignedIn => StatusCode::UNAUTHORIZED,
                HistoryError::NothingToSave => StatusCode::BAD_REQUEST,
                HistoryError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                HistoryError::Http(_) | HistoryError::Api { .. } | HistoryError::Json(_) => {
                    StatusCode::BAD_GATEWAY
                }
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_response = JsonErrorWrapper {
            error: JsonError {
                message: self.to_string(),
                r#type: "api_error".to_string(),
            },
            notification: self.notification(),
        };
        HttpResponse::build(status_code).json(error_response)
    }
}
