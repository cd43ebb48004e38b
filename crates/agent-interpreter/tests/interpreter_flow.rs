use std::sync::{Arc, Mutex};

use agent_interpreter::{ChatSession, ErrorSolver, InterpreterError, ReplyOutcome};
use agent_llm::{ChatMessage, ChatOptions, ChatRole, LLMError, LLMProvider, Result};
use async_trait::async_trait;
use ide_core::{AgentMode, Language, SessionContext};

/// Replays canned replies and records what it was sent.
struct ScriptedProvider {
    replies: Mutex<Vec<Result<String>>>,
    seen: Mutex<Vec<(Vec<ChatMessage>, ChatOptions)>>,
}

impl ScriptedProvider {
    fn new(replies: Vec<Result<String>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<(Vec<ChatMessage>, ChatOptions)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn chat(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<String> {
        self.seen
            .lock()
            .unwrap()
            .push((messages.to_vec(), options.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(LLMError::Api("script exhausted".into())))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn python(code: &str, error: Option<&str>) -> SessionContext {
    let ctx = SessionContext::new(code, Language::Python);
    match error {
        Some(e) => ctx.with_error(e),
        None => ctx,
    }
}

#[tokio::test]
async fn test_agent_turn_rewrites_editor() {
    let provider = ScriptedProvider::new(vec![Ok(
        "AGENT_ACTION:\n```python\nfor i in range(3):\n    print(i)\n```\nAdded a loop.".into(),
    )]);
    let mut session = ChatSession::new(AgentMode::Agent);
    session.open();

    let mut code = "print('hi')".to_string();
    let outcome = session
        .send(
            provider.as_ref(),
            "add a loop",
            &python(&code.clone(), None),
            &mut |new: String| code = new,
        )
        .await
        .unwrap();

    assert!(outcome.applied);
    assert_eq!(code, "for i in range(3):\n    print(i)");
    assert_eq!(session.turns().len(), 3);
    assert!(!session.turns()[2].content.contains("AGENT_ACTION:"));

    let seen = provider.seen();
    assert_eq!(seen[0].0[0].role, ChatRole::System);
    assert!(seen[0].0[0].content.contains("AGENT_ACTION:"));
}

#[tokio::test]
async fn test_ask_turn_never_touches_editor() {
    let provider = ScriptedProvider::new(vec![Ok("```js\nconsole.log(1)\n```".into())]);
    let mut session = ChatSession::new(AgentMode::Ask);

    let mut calls = 0;
    let outcome = session
        .send(
            provider.as_ref(),
            "how do I log?",
            &python("", None),
            &mut |_: String| calls += 1,
        )
        .await
        .unwrap();

    assert_eq!(calls, 0);
    assert_eq!(outcome.outcome, Some(ReplyOutcome::NotApplicable));
    assert!(outcome.notification.is_none());
    assert_eq!(outcome.reply.content, "```js\nconsole.log(1)\n```");
}

#[tokio::test]
async fn test_configuration_failure_becomes_assistant_entry() {
    let provider = ScriptedProvider::new(vec![Err(LLMError::Config(
        "Gemini API key not configured".into(),
    ))]);
    let mut session = ChatSession::new(AgentMode::Agent);

    let outcome = session
        .send(provider.as_ref(), "hi", &python("x", None), &mut |_: String| {})
        .await
        .unwrap();

    assert!(!outcome.applied);
    assert!(outcome
        .reply
        .content
        .starts_with("Sorry, I encountered an error. Please make sure your API key"));
}

#[tokio::test]
async fn test_solver_requires_error() {
    let provider = ScriptedProvider::new(vec![]);
    let solver = ErrorSolver::new(provider.clone(), provider.clone());

    let err = solver.analyze(&python("x", None)).await.unwrap_err();
    assert!(matches!(err, InterpreterError::NoError("analyze")));
    assert_eq!(err.to_string(), "There's no error to analyze.");
    assert!(provider.seen().is_empty());
}

#[tokio::test]
async fn test_auto_fix_strips_fences() {
    let provider = ScriptedProvider::new(vec![Ok("```python\nprint(x)\n```".into())]);
    let solver = ErrorSolver::new(provider.clone(), provider.clone());

    let fixed = solver
        .auto_fix(&python("print(x", Some("SyntaxError")))
        .await
        .unwrap();
    assert_eq!(fixed, "print(x)");

    let (messages, _) = &provider.seen()[0];
    assert!(messages[0].content.contains("Respond ONLY with the fixed code"));
    assert!(messages[0].content.contains("SyntaxError"));
}

#[tokio::test]
async fn test_debug_uses_system_role_and_low_temperature() {
    let assistant = ScriptedProvider::new(vec![]);
    let debugger = ScriptedProvider::new(vec![Ok("print(1)".into())]);
    let solver = ErrorSolver::new(assistant.clone(), debugger.clone());

    let fixed = solver
        .debug(&python("print(1", Some("SyntaxError: '(' was never closed")))
        .await
        .unwrap();
    assert_eq!(fixed, "print(1)");
    assert!(assistant.seen().is_empty());

    let (messages, options) = &debugger.seen()[0];
    assert_eq!(messages[0].role, ChatRole::System);
    assert!(messages[0].content.contains("expert python programmer"));
    assert_eq!(options.temperature, Some(0.15));
}

#[tokio::test]
async fn test_analyze_returns_model_text() {
    let provider = ScriptedProvider::new(vec![Ok("1. **Error Explanation**: ...".into())]);
    let solver = ErrorSolver::new(provider.clone(), provider.clone());

    let analysis = solver
        .analyze(&python("1/0", Some("ZeroDivisionError")))
        .await
        .unwrap();
    assert!(analysis.starts_with("1. **Error Explanation**"));
    assert!(provider.seen()[0].0[0].content.contains("Prevention Tips"));
}
