//! Apply Gate.

use ide_core::{Language, Notification};

use crate::classify::{InterpretedReply, ReplyOutcome};

/// Receives the full replacement source chosen by the gate.
///
/// Treated as synchronous and infallible.
pub trait EditorSink {
    fn replace_source(&mut self, code: String);
}

impl<F: FnMut(String)> EditorSink for F {
    fn replace_source(&mut self, code: String) {
        self(code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyDecision {
    pub applied: bool,
    pub notification: Option<Notification>,
}

/// Apply an interpreted reply to the editor.
///
/// The sink is called exactly once for an action and never otherwise.
pub fn apply_reply<E>(reply: &InterpretedReply, language: Language, editor: &mut E) -> ApplyDecision
where
    E: EditorSink + ?Sized,
{
    match reply.outcome() {
        ReplyOutcome::Action { code } => {
            log::info!("Applying agent code ({} bytes) to {} editor", code.len(), language);
            editor.replace_source(code);
            ApplyDecision {
                applied: true,
                notification: Some(Notification::success(
                    "Code Updated!",
                    format!("Agent has modified your {} code.", language.display_name()),
                )),
            }
        }
        ReplyOutcome::NoCodeRecoverable => ApplyDecision {
            applied: false,
            notification: Some(Notification::destructive(
                "No code applied",
                "The agent signaled an action but no code was recoverable.",
            )),
        },
        ReplyOutcome::NotApplicable | ReplyOutcome::Informational => ApplyDecision {
            applied: false,
            notification: None,
        },
    }
}
