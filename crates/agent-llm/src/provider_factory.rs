//! Provider Factory
//!
//! Creates LLM providers from configuration.

use std::sync::Arc;

use ide_core::{Config, ProviderConfig};

use crate::error::ensure_api_key;
use crate::provider::{LLMError, LLMProvider};
use crate::providers::{GeminiProvider, PerplexityProvider};

/// Available provider types
pub const AVAILABLE_PROVIDERS: &[&str] = &["perplexity", "gemini"];

fn apply_overrides<P>(
    provider: P,
    provider_config: Option<&ProviderConfig>,
    with_base_url: fn(P, String) -> P,
    with_model: fn(P, String) -> P,
) -> P {
    let mut provider = provider;
    if let Some(cfg) = provider_config {
        if let Some(base_url) = cfg.base_url.as_ref().filter(|u| !u.is_empty()) {
            provider = with_base_url(provider, base_url.clone());
        }
        if let Some(model) = cfg.model.as_ref().filter(|m| !m.is_empty()) {
            provider = with_model(provider, model.clone());
        }
    }
    provider
}

/// Create the provider called `name`.
///
/// A missing or placeholder key does not fail here: the provider is built and
/// reports a configuration error on its first call, so the chat panel can show
/// the hint instead of the server refusing to start.
pub fn create_provider(name: &str, config: &Config) -> Result<Arc<dyn LLMProvider>, LLMError> {
    match name {
        "perplexity" => {
            let cfg = config.providers.perplexity.as_ref();
            let key = cfg.map(|c| c.api_key.clone()).unwrap_or_default();
            let provider = apply_overrides(
                PerplexityProvider::new(key),
                cfg,
                |p, url| p.with_base_url(url),
                |p, model| p.with_model(model),
            );
            Ok(Arc::new(provider))
        }

        "gemini" => {
            let cfg = config.providers.gemini.as_ref();
            let key = cfg.map(|c| c.api_key.clone()).unwrap_or_default();
            let provider = apply_overrides(
                GeminiProvider::new(key),
                cfg,
                |p, url| p.with_base_url(url),
                |p, model| p.with_model(model),
            );
            Ok(Arc::new(provider))
        }

        _ => Err(LLMError::Config(format!(
            "Unknown provider: {}. Available providers: {}",
            name,
            AVAILABLE_PROVIDERS.join(", ")
        ))),
    }
}

/// Validate provider configuration without creating the provider
pub fn validate_provider_config(name: &str, config: &Config) -> Result<(), LLMError> {
    let (cfg, label) = match name {
        "perplexity" => (config.providers.perplexity.as_ref(), "Perplexity"),
        "gemini" => (config.providers.gemini.as_ref(), "Gemini"),
        _ => return Err(LLMError::Config(format!("Unknown provider: {}", name))),
    };

    let cfg = cfg.ok_or_else(|| LLMError::Config(format!("{label} configuration required")))?;
    ensure_api_key(&cfg.api_key, label)
}
