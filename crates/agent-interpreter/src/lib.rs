//! agent-interpreter - turns free-text model replies into editor actions
//!
//! The pipeline is Prompt Composer -> (LLM call) -> Response Classifier &
//! Extractor -> Apply Gate. [`ChatSession`] drives it one turn at a time and
//! [`ErrorSolver`] covers the analyze / auto-fix / debug flows.

pub mod apply;
pub mod classify;
pub mod error;
pub mod extract;
pub mod machine;
pub mod prompt;
pub mod session;
pub mod solver;

pub use apply::{apply_reply, ApplyDecision, EditorSink};
pub use classify::{classify_reply, ExtractionResult, InterpretedReply, ReplyOutcome};
pub use error::InterpreterError;
pub use extract::{extract_code, ExtractionStrategy, STRATEGIES};
pub use machine::{StateTransition, TransitionError, TurnEvent, TurnMachine, TurnState};
pub use prompt::{compose_prompt, ComposedPrompt, SENTINEL};
pub use session::{ChatSession, PendingTurn, TurnOutcome};
pub use solver::{strip_code_fences, ErrorSolver};
