//! Response Classifier.
//!
//! Decides whether a reply is an action or information and produces the
//! text shown in the conversation. Deterministic and free of I/O.

use ide_core::AgentMode;
use serde::Serialize;

use crate::extract::extract_code;
use crate::prompt::SENTINEL;

/// Result of looking for replacement code in an agent-mode reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Name of the strategy that located the block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<&'static str>,
}

impl ExtractionResult {
    fn not_found() -> Self {
        Self {
            found: false,
            code: None,
            strategy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyOutcome {
    /// Ask mode: extraction is never attempted.
    NotApplicable,
    /// Agent mode without the sentinel.
    Informational,
    /// Agent mode, sentinel present, code recovered.
    Action { code: String },
    /// Agent mode, sentinel present, but no fenced block could be located.
    NoCodeRecoverable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretedReply {
    pub mode: AgentMode,
    /// Reply with every sentinel removed, trimmed.
    pub display_text: String,
    pub sentinel_present: bool,
    /// `None` in ask mode.
    pub extraction: Option<ExtractionResult>,
}

impl InterpretedReply {
    pub fn outcome(&self) -> ReplyOutcome {
        match (&self.extraction, self.sentinel_present) {
            (None, _) => ReplyOutcome::NotApplicable,
            (Some(_), false) => ReplyOutcome::Informational,
            (Some(ExtractionResult { code: Some(code), .. }), true) => {
                ReplyOutcome::Action { code: code.clone() }
            }
            (Some(_), true) => ReplyOutcome::NoCodeRecoverable,
        }
    }

    pub fn found(&self) -> bool {
        self.extraction.as_ref().is_some_and(|e| e.found)
    }
}

fn strip_sentinel(reply: &str) -> String {
    reply.replace(SENTINEL, "").trim().to_string()
}

/// Classify `reply` under `mode`.
///
/// Only agent mode produces an [`ExtractionResult`], and only a reply that
/// carries the sentinel is searched for code. Fenced code in a reply without
/// the sentinel is informational.
pub fn classify_reply(mode: AgentMode, reply: &str) -> InterpretedReply {
    let display_text = strip_sentinel(reply);

    if !mode.is_agent() {
        return InterpretedReply {
            mode,
            display_text,
            sentinel_present: false,
            extraction: None,
        };
    }

    let sentinel_present = reply.contains(SENTINEL);
    let extraction = if sentinel_present {
        match extract_code(reply) {
            Some(extracted) => ExtractionResult {
                found: true,
                code: Some(extracted.code),
                strategy: Some(extracted.strategy),
            },
            None => {
                log::warn!("Agent reply carried the action sentinel but no code block was located");
                ExtractionResult::not_found()
            }
        }
    } else {
        ExtractionResult::not_found()
    };

    InterpretedReply {
        mode,
        display_text,
        sentinel_present,
        extraction: Some(extraction),
    }
}
