use ide_core::Notification;
use serde::Serialize;

use crate::judge0::SubmissionResult;

const STATUS_ACCEPTED: u32 = 3;
const STATUS_COMPILATION_ERROR: u32 = 6;

pub const NO_OUTPUT_MESSAGE: &str = "Program executed successfully with no output.";
pub const COMPILATION_FALLBACK: &str = "Compilation error occurred.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Accepted { stdout: String },
    CompilationError { message: String },
    RuntimeError { stderr: String },
    /// Any other verdict (time limit, internal error, ...) without stderr.
    Other { stdout: String, status: String },
    HtmlPreview { source: String },
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl ExecutionOutcome {
    pub fn from_submission(result: SubmissionResult) -> Self {
        match result.status.id {
            STATUS_ACCEPTED => ExecutionOutcome::Accepted {
                stdout: non_empty(result.stdout).unwrap_or_else(|| NO_OUTPUT_MESSAGE.to_string()),
            },
            STATUS_COMPILATION_ERROR => ExecutionOutcome::CompilationError {
                message: non_empty(result.compile_output)
                    .unwrap_or_else(|| COMPILATION_FALLBACK.to_string()),
            },
            _ => match non_empty(result.stderr) {
                Some(stderr) => ExecutionOutcome::RuntimeError { stderr },
                None => ExecutionOutcome::Other {
                    stdout: result.stdout.unwrap_or_default(),
                    status: result.status.description,
                },
            },
        }
    }

    /// Text for the output pane.
    pub fn output(&self) -> String {
        match self {
            ExecutionOutcome::Accepted { stdout } | ExecutionOutcome::Other { stdout, .. } => {
                stdout.clone()
            }
            ExecutionOutcome::HtmlPreview { source } => format!("HTML Preview:\n\n{source}"),
            ExecutionOutcome::CompilationError { .. } | ExecutionOutcome::RuntimeError { .. } => {
                String::new()
            }
        }
    }

    /// Text for the error pane, if any.
    pub fn error(&self) -> Option<String> {
        match self {
            ExecutionOutcome::CompilationError { message } => Some(message.clone()),
            ExecutionOutcome::RuntimeError { stderr } => Some(stderr.clone()),
            ExecutionOutcome::Other { status, .. } if status != "Accepted" => {
                Some(format!("Status: {status}"))
            }
            _ => None,
        }
    }

    pub fn notification(&self) -> Option<Notification> {
        match self {
            ExecutionOutcome::Accepted { .. } => Some(Notification::success(
                "Success",
                "Code executed successfully!",
            )),
            ExecutionOutcome::CompilationError { .. } => Some(Notification::destructive(
                "Compilation Error",
                "Your code has compilation errors.",
            )),
            ExecutionOutcome::RuntimeError { .. } => Some(Notification::destructive(
                "Runtime Error",
                "An error occurred during execution.",
            )),
            ExecutionOutcome::HtmlPreview { .. } => Some(Notification::info(
                "HTML Ready",
                "HTML preview is displayed below. Open in browser to see rendered output.",
            )),
            ExecutionOutcome::Other { .. } => None,
        }
    }
}

/// One finished run, with wall time measured around the remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionReport {
    pub outcome: ExecutionOutcome,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub execution_time_ms: u64,
}

impl ExecutionReport {
    pub fn new(outcome: ExecutionOutcome, execution_time_ms: u64) -> Self {
        Self {
            output: outcome.output(),
            error: outcome.error(),
            outcome,
            execution_time_ms,
        }
    }
}
