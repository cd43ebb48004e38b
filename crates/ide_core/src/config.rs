use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::config_json_path;

const CONFIG_FILE_PATH: &str = "config.toml";

pub const DEFAULT_JUDGE0_BASE_URL: &str = "https://judge0-ce.p.rapidapi.com";
pub const DEFAULT_JUDGE0_HOST: &str = "judge0-ce.p.rapidapi.com";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Credentials and endpoint overrides for one LLM provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub perplexity: Option<ProviderConfig>,
    #[serde(default)]
    pub gemini: Option<ProviderConfig>,
}

/// Judge0 endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionConfig {
    #[serde(default = "default_judge0_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_judge0_host")]
    pub host: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            base_url: default_judge0_base_url(),
            api_key: None,
            host: default_judge0_host(),
        }
    }
}

/// Supabase project settings for code history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
}

impl HistoryConfig {
    pub fn is_configured(&self) -> bool {
        matches!((&self.url, &self.anon_key), (Some(url), Some(key)) if !url.is_empty() && !key.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Provider used by the chat panel.
    #[serde(default = "default_chat_provider")]
    pub chat_provider: String,
    /// Provider used by analyze / auto-fix / debug.
    #[serde(default = "default_debug_provider")]
    pub debug_provider: String,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_chat_provider() -> String {
    "gemini".to_string()
}

fn default_debug_provider() -> String {
    "perplexity".to_string()
}

fn default_judge0_base_url() -> String {
    DEFAULT_JUDGE0_BASE_URL.to_string()
}

fn default_judge0_host() -> String {
    DEFAULT_JUDGE0_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat_provider: default_chat_provider(),
            debug_provider: default_debug_provider(),
            providers: ProvidersConfig::default(),
            execution: ExecutionConfig::default(),
            history: HistoryConfig::default(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load from ~/.omniglot/config.json, else ./config.toml, then apply
    /// environment overrides. Unreadable files fall back to defaults.
    pub fn new() -> Self {
        let mut config = Config::default();

        let json_path = config_json_path();
        let toml_path = Path::new(CONFIG_FILE_PATH);
        for path in [json_path.as_path(), toml_path] {
            if !path.exists() {
                continue;
            }
            match Config::load_from(path) {
                Ok(file_config) => {
                    log::info!("Loaded config from {}", path.display());
                    config = file_config;
                    break;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Parse a config file; `.toml` files are read as TOML, everything else as JSON.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let parsed = if is_toml {
            toml::from_str::<Config>(&content).map_err(|e| e.to_string())
        } else {
            serde_json::from_str::<Config>(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Apply environment overrides through `lookup` (usually `std::env::var`).
    ///
    /// The `VITE_*` names are accepted as fallbacks so an existing frontend
    /// `.env` keeps working.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|key| lookup(key));

        if let Some(key) = first(&["OPENAI_API_KEY", "VITE_OPENAI_API_KEY"]) {
            self.providers.perplexity.get_or_insert_with(Default::default).api_key = key;
        }
        if let Some(model) = first(&["OPENAI_MODEL", "VITE_OPENAI_MODEL"]) {
            self.providers.perplexity.get_or_insert_with(Default::default).model = Some(model);
        }
        if let Some(key) = first(&["GEMINI_API_KEY", "VITE_GEMINI_API_KEY"]) {
            self.providers.gemini.get_or_insert_with(Default::default).api_key = key;
        }
        if let Some(model) = first(&["GEMINI_MODEL"]) {
            self.providers.gemini.get_or_insert_with(Default::default).model = Some(model);
        }
        if let Some(key) = first(&["JUDGE0_API_KEY", "VITE_JUDGE0_API_KEY"]) {
            self.execution.api_key = Some(key);
        }
        if let Some(url) = first(&["JUDGE0_BASE_URL"]) {
            self.execution.base_url = url;
        }
        if let Some(url) = first(&["SUPABASE_URL", "VITE_SUPABASE_URL"]) {
            self.history.url = Some(url);
        }
        if let Some(key) = first(&["SUPABASE_ANON_KEY", "VITE_SUPABASE_PUBLISHABLE_KEY"]) {
            self.history.anon_key = Some(key);
        }
        if let Some(provider) = first(&["CHAT_PROVIDER"]) {
            self.chat_provider = provider;
        }
        if let Some(provider) = first(&["DEBUG_PROVIDER"]) {
            self.debug_provider = provider;
        }
        if let Some(port) = first(&["APP_PORT"]).and_then(|p| p.trim().parse::<u16>().ok()) {
            self.port = port;
        }
    }
}
