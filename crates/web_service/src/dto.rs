//! Request bodies and response payloads of the `/v1` API.

use agent_interpreter::TurnOutcome;
use code_history::CodeHistoryEntry;
use code_runner::ExecutionReport;
use ide_core::{AgentMode, ConversationTurn, Language, Notification};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::editor::EditorState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub mode: Option<AgentMode>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCodeRequest {
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStdinRequest {
    pub stdin: String,
}

/// The language arrives as a raw tag so an unknown one is a typed 400.
#[derive(Debug, Deserialize)]
pub struct ChangeLanguageRequest {
    pub language: String,
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: AgentMode,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatView {
    pub mode: AgentMode,
    pub messages: Vec<ConversationTurn>,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub editor: EditorState,
    pub chat: ChatView,
}

#[derive(Debug, Serialize)]
pub struct EditorResponse {
    pub editor: EditorState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

#[derive(Debug, Serialize)]
pub struct RunResponse {
    #[serde(flatten)]
    pub report: ExecutionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

#[derive(Debug, Serialize)]
pub struct ChatTurnResponse {
    #[serde(flatten)]
    pub turn: TurnOutcome,
    /// Editor contents after the turn, present when code was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub notification: Notification,
}

#[derive(Debug, Serialize)]
pub struct HistoryEntryResponse {
    pub entry: CodeHistoryEntry,
    pub notification: Notification,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub id: String,
    pub notification: Notification,
}
