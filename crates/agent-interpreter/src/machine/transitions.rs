use serde::Serialize;
use thiserror::Error;

use super::events::TurnEvent;
use super::states::TurnState;
use crate::classify::ReplyOutcome;

const MAX_HISTORY: usize = 50;

#[derive(Error, Debug, Clone)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} with event {event}")]
    InvalidTransition { from: TurnState, event: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct StateTransition {
    pub from: TurnState,
    pub to: TurnState,
    pub event: TurnEvent,
    /// False when the event was not valid in `from`.
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct TurnMachine {
    current_state: TurnState,
    history: Vec<StateTransition>,
}

impl Default for TurnMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnMachine {
    pub fn new() -> Self {
        Self {
            current_state: TurnState::Idle,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> &TurnState {
        &self.current_state
    }

    pub fn history(&self) -> &[StateTransition] {
        &self.history
    }

    /// Apply `event`. Events that are not valid in the current state leave it
    /// unchanged and are still recorded.
    pub fn handle_event(&mut self, event: TurnEvent) -> StateTransition {
        let old_state = self.current_state.clone();
        let new_state = match Self::next_state(&old_state, &event) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("{}", e);
                old_state.clone()
            }
        };
        let changed = old_state != new_state;

        self.current_state = new_state.clone();

        let transition = StateTransition {
            from: old_state,
            to: new_state,
            event,
            changed,
        };

        self.history.push(transition.clone());
        if self.history.len() > MAX_HISTORY {
            self.history.remove(0);
        }

        transition
    }

    /// Compute the next state for `event` in `state`.
    pub fn next_state(state: &TurnState, event: &TurnEvent) -> Result<TurnState, TransitionError> {
        use TurnEvent::*;
        use TurnState::*;

        let next = match (state, event) {
            (Idle, UtteranceSubmitted) => Composing,
            (Composing, PromptComposed) => AwaitingModel,

            (AwaitingModel, ReplyReceived) => Classifying,
            (AwaitingModel, ModelFailed { error }) => Failed {
                error_message: error.clone(),
                failed_at: chrono::Utc::now().to_rfc3339(),
            },

            (Classifying, ReplyClassified { outcome }) => match outcome {
                ReplyOutcome::Action { .. } => Applying,
                ReplyOutcome::NoCodeRecoverable => ExtractionFailed,
                ReplyOutcome::Informational | ReplyOutcome::NotApplicable => Informational,
            },

            (Applying | Informational | ExtractionFailed | Failed { .. }, TurnSettled) => Idle,

            _ => {
                return Err(TransitionError::InvalidTransition {
                    from: state.clone(),
                    event: event.name().to_string(),
                })
            }
        };
        Ok(next)
    }
}
