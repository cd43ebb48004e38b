use agent_llm::LLMError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterpreterError {
    #[error("Message is empty")]
    EmptyUtterance,

    /// Solver flows need an error to work on.
    #[error("There's no error to {0}.")]
    NoError(&'static str),

    #[error(transparent)]
    LLM(#[from] LLMError),
}

pub type Result<T> = std::result::Result<T, InterpreterError>;
