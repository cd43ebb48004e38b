use serde::Serialize;

use crate::classify::ReplyOutcome;

/// Events that drive [`super::TurnMachine`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnEvent {
    UtteranceSubmitted,
    PromptComposed,
    ReplyReceived,
    ModelFailed { error: String },
    ReplyClassified { outcome: ReplyOutcome },
    /// Terminal work of the turn (apply, display, error entry) is done.
    TurnSettled,
}

impl TurnEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TurnEvent::UtteranceSubmitted => "utterance_submitted",
            TurnEvent::PromptComposed => "prompt_composed",
            TurnEvent::ReplyReceived => "reply_received",
            TurnEvent::ModelFailed { .. } => "model_failed",
            TurnEvent::ReplyClassified { .. } => "reply_classified",
            TurnEvent::TurnSettled => "turn_settled",
        }
    }
}
