pub mod error;
pub mod provider;
pub mod provider_factory;
pub mod providers;

pub use error::FailureKind;
pub use provider::{ChatMessage, ChatOptions, ChatRole, LLMError, LLMProvider, Result};
pub use provider_factory::{create_provider, validate_provider_config, AVAILABLE_PROVIDERS};
pub use providers::{GeminiProvider, PerplexityProvider};
