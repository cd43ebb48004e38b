//! Prompt Composer.
//!
//! Builds the system and task instructions for one chat turn. Pure: the same
//! inputs always produce the same prompt.

use agent_llm::ChatMessage;
use ide_core::{AgentMode, SessionContext};

/// Marker the model puts on its own line before a code-replacement reply.
pub const SENTINEL: &str = "AGENT_ACTION:";

const AGENT_SYSTEM: &str = "You are an AI coding agent that can directly write and modify code. \
You have access to the user's code editor.

If the user asks you to write, modify, or fix code:
1. Start your response with \"AGENT_ACTION:\" on its own line
2. Follow with the complete replacement source (never a fragment or a diff) wrapped in triple backticks annotated with the language tag
3. After the code, briefly explain what you did

If the user just wants information or an explanation, respond normally without AGENT_ACTION.";

const ASK_SYSTEM: &str = "You are an expert programming assistant. \
Provide helpful, concise, and accurate programming advice.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub system: String,
    pub task: String,
}

impl ComposedPrompt {
    /// System instruction first, then the task as the user turn.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system.clone()),
            ChatMessage::user(self.task.clone()),
        ]
    }
}

pub fn compose_prompt(mode: AgentMode, context: &SessionContext, utterance: &str) -> ComposedPrompt {
    let tag = context.language.tag();

    let mut task = format!(
        "Language: {tag}\nCurrent Code:\n```{tag}\n{}\n```\n",
        context.source_code
    );
    if let Some(error) = context.last_error.as_deref() {
        task.push_str(&format!("\nCurrent Error:\n{error}\n"));
    }

    let (system, label) = match mode {
        AgentMode::Agent => (AGENT_SYSTEM, "User Request"),
        AgentMode::Ask => (ASK_SYSTEM, "User Question"),
    };
    task.push_str(&format!("\n{label}: {utterance}"));

    ComposedPrompt {
        system: system.to_string(),
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::ChatRole;
    use ide_core::Language;

    fn context(error: Option<&str>) -> SessionContext {
        let ctx = SessionContext::new("print('hi')\n  # keep me", Language::Python);
        match error {
            Some(error) => ctx.with_error(error),
            None => ctx,
        }
    }

    #[test]
    fn test_agent_prompt_carries_sentinel_contract() {
        let prompt = compose_prompt(AgentMode::Agent, &context(None), "add a loop");
        assert!(prompt.system.contains(SENTINEL));
        assert!(prompt.system.contains("triple backticks"));
        assert!(prompt.system.contains("complete replacement source"));
        assert!(prompt.task.ends_with("User Request: add a loop"));
    }

    #[test]
    fn test_ask_prompt_never_mentions_sentinel_or_fences() {
        let prompt = compose_prompt(AgentMode::Ask, &context(Some("boom")), "why?");
        assert!(!prompt.system.contains(SENTINEL));
        assert!(!prompt.system.contains("backtick"));
        assert!(prompt.task.ends_with("User Question: why?"));
    }

    #[test]
    fn test_task_embeds_source_language_and_error() {
        let prompt = compose_prompt(
            AgentMode::Agent,
            &context(Some("NameError: x")),
            "  fix it  ",
        );
        assert!(prompt.task.contains("Language: python"));
        assert!(prompt.task.contains("```python\nprint('hi')\n  # keep me\n```"));
        assert!(prompt.task.contains("Current Error:\nNameError: x"));
        assert!(prompt.task.ends_with("User Request:   fix it  "));
    }

    #[test]
    fn test_task_omits_error_section_when_absent() {
        let prompt = compose_prompt(AgentMode::Agent, &context(None), "x");
        assert!(!prompt.task.contains("Current Error"));
    }

    #[test]
    fn test_composition_is_pure() {
        let ctx = context(Some("e"));
        assert_eq!(
            compose_prompt(AgentMode::Agent, &ctx, "u"),
            compose_prompt(AgentMode::Agent, &ctx, "u")
        );
    }

    #[test]
    fn test_messages_order() {
        let messages = compose_prompt(AgentMode::Ask, &context(None), "q").to_messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
    }
}
