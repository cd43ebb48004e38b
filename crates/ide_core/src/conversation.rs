//! Conversation types for the AI chat panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Who authored a turn in the chat panel.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the append-only conversation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Operating mode of the chat panel.
///
/// `Ask` only ever produces information. `Agent` lets replies that carry the
/// action sentinel replace the editor's source.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    #[default]
    Ask,
    Agent,
}

impl AgentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentMode::Ask => "ask",
            AgentMode::Agent => "agent",
        }
    }

    pub fn is_agent(&self) -> bool {
        matches!(self, AgentMode::Agent)
    }

    /// The assistant message shown when the panel opens on an empty conversation.
    pub fn greeting(&self) -> &'static str {
        match self {
            AgentMode::Agent => {
                "Hi! I'm your AI Agent. I can directly control your code editor to:\n\n\
                 • Write complete code solutions\n\
                 • Fix errors automatically\n\
                 • Modify and improve your code\n\
                 • Run debugging operations\n\n\
                 Just tell me what you need and I'll take care of it!"
            }
            AgentMode::Ask => {
                "Hi! I'm your AI coding assistant. I can help you with:\n\n\
                 • Debugging errors\n\
                 • Code explanations\n\
                 • Code optimization\n\
                 • Best practices\n\
                 • Algorithm suggestions\n\n\
                 How can I help you today?"
            }
        }
    }
}

impl fmt::Display for AgentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ask" => Ok(AgentMode::Ask),
            "agent" => Ok(AgentMode::Agent),
            other => Err(format!("Unknown mode: {other}")),
        }
    }
}
