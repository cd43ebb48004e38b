use serde::Serialize;

/// Lifecycle of one chat turn.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    /// No turn in flight.
    Idle,
    /// Building the prompt from the editor snapshot.
    Composing,
    /// Waiting on the model. The only suspension point.
    AwaitingModel,
    /// Reply received, being classified.
    Classifying,
    /// Extracted code is being handed to the editor.
    Applying,
    /// Reply shown as information only.
    Informational,
    /// The sentinel was present but no code block was recoverable.
    ExtractionFailed,
    /// The model call failed.
    Failed {
        error_message: String,
        failed_at: String,
    },
}

impl TurnState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TurnState::Idle)
    }
}
