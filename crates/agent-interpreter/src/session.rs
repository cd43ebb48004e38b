//! Chat session: the conversation, the active mode and the turn lifecycle.
//!
//! A turn is split around the model call. [`ChatSession::begin_turn`] records
//! the user turn and composes the prompt; the caller awaits the provider
//! without holding the session; [`ChatSession::complete_turn`] interprets the
//! reply, runs the apply gate and appends the assistant turn. Turns are
//! appended in the order they complete.

use agent_llm::{ChatMessage, ChatOptions, FailureKind, LLMError, LLMProvider};
use ide_core::{AgentMode, ConversationTurn, Language, Notification, Role, SessionContext};
use serde::Serialize;

use crate::apply::{apply_reply, EditorSink};
use crate::classify::{classify_reply, ReplyOutcome};
use crate::error::{InterpreterError, Result};
use crate::machine::{StateTransition, TurnEvent, TurnMachine};
use crate::prompt::compose_prompt;

const ERROR_PREFIX: &str = "Sorry, I encountered an error. ";

/// A turn whose prompt has been sent but whose reply has not been applied.
#[derive(Debug)]
pub struct PendingTurn {
    pub seq: u64,
    /// Mode at the moment the turn was begun. Classification uses this.
    pub mode: AgentMode,
    pub language: Language,
    pub messages: Vec<ChatMessage>,
    machine: TurnMachine,
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    pub seq: u64,
    /// Assistant turn appended to the conversation.
    pub reply: ConversationTurn,
    pub outcome: Option<ReplyOutcome>,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    pub transitions: Vec<StateTransition>,
}

#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    mode: AgentMode,
    turns: Vec<ConversationTurn>,
    next_seq: u64,
    last_completed_seq: Option<u64>,
}

impl ChatSession {
    pub fn new(mode: AgentMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> AgentMode {
        self.mode
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Show the greeting if the conversation is empty.
    pub fn open(&mut self) {
        if self.turns.is_empty() {
            self.turns.push(ConversationTurn::assistant(self.mode.greeting()));
        }
    }

    /// Switch mode. Before the first user turn the greeting is replaced by
    /// the new mode's greeting; past turns are never reclassified.
    pub fn set_mode(&mut self, mode: AgentMode) {
        if mode == self.mode {
            return;
        }
        log::info!("Chat mode {} -> {}", self.mode, mode);
        self.mode = mode;

        let has_user_turn = self.turns.iter().any(|t| t.role == Role::User);
        if !has_user_turn {
            self.turns.clear();
            self.turns.push(ConversationTurn::assistant(mode.greeting()));
        }
    }

    pub fn reset(&mut self) {
        self.turns.clear();
    }

    pub fn begin_turn(&mut self, utterance: &str, context: &SessionContext) -> Result<PendingTurn> {
        if utterance.trim().is_empty() {
            return Err(InterpreterError::EmptyUtterance);
        }

        let mut machine = TurnMachine::new();
        machine.handle_event(TurnEvent::UtteranceSubmitted);

        self.turns.push(ConversationTurn::user(utterance));
        let prompt = compose_prompt(self.mode, context, utterance);
        machine.handle_event(TurnEvent::PromptComposed);

        self.next_seq += 1;
        log::debug!(
            "Turn {} composed in {} mode for {}",
            self.next_seq,
            self.mode,
            context.language
        );

        Ok(PendingTurn {
            seq: self.next_seq,
            mode: self.mode,
            language: context.language,
            messages: prompt.to_messages(),
            machine,
        })
    }

    pub fn complete_turn<E>(
        &mut self,
        pending: PendingTurn,
        reply: std::result::Result<String, LLMError>,
        editor: &mut E,
    ) -> TurnOutcome
    where
        E: EditorSink + ?Sized,
    {
        let PendingTurn {
            seq,
            mode,
            language,
            mut machine,
            ..
        } = pending;

        if self.last_completed_seq.is_some_and(|last| last > seq) {
            log::warn!(
                "Turn {} completed after turn {}; appending in completion order",
                seq,
                self.last_completed_seq.unwrap_or_default()
            );
        }
        self.last_completed_seq = Some(self.last_completed_seq.map_or(seq, |last| last.max(seq)));

        let outcome = match reply {
            Ok(text) => {
                machine.handle_event(TurnEvent::ReplyReceived);
                let interpreted = classify_reply(mode, &text);
                let reply_outcome = interpreted.outcome();
                machine.handle_event(TurnEvent::ReplyClassified {
                    outcome: reply_outcome.clone(),
                });

                let decision = apply_reply(&interpreted, language, editor);
                let turn = ConversationTurn::assistant(interpreted.display_text);
                self.turns.push(turn.clone());

                TurnOutcome {
                    seq,
                    reply: turn,
                    outcome: Some(reply_outcome),
                    applied: decision.applied,
                    notification: decision.notification,
                    failure: None,
                    transitions: Vec::new(),
                }
            }
            Err(e) => {
                log::error!("LLM call for turn {} failed: {}", seq, e);
                machine.handle_event(TurnEvent::ModelFailed {
                    error: e.to_string(),
                });

                let message = format!("{ERROR_PREFIX}{}", e.user_message());
                let turn = ConversationTurn::assistant(message.clone());
                self.turns.push(turn.clone());

                TurnOutcome {
                    seq,
                    reply: turn,
                    outcome: None,
                    applied: false,
                    notification: Some(Notification::destructive("Error", message)),
                    failure: Some(e.kind()),
                    transitions: Vec::new(),
                }
            }
        };

        machine.handle_event(TurnEvent::TurnSettled);
        TurnOutcome {
            transitions: machine.history().to_vec(),
            ..outcome
        }
    }

    /// Run one whole turn against `provider`.
    ///
    /// Holds `&mut self` across the model call, so it suits single-owner use.
    /// Shared sessions should use `begin_turn` / `complete_turn` directly.
    pub async fn send<E>(
        &mut self,
        provider: &dyn LLMProvider,
        utterance: &str,
        context: &SessionContext,
        editor: &mut E,
    ) -> Result<TurnOutcome>
    where
        E: EditorSink + ?Sized,
    {
        let pending = self.begin_turn(utterance, context)?;
        let reply = provider.chat(&pending.messages, &ChatOptions::default()).await;
        Ok(self.complete_turn(pending, reply, editor))
    }
}
