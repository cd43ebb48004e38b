//! ide_core - Core types shared by the Omniglot IDE backend
//!
//! This crate provides the foundational types used across the workspace:
//! - `language` - Language tags, Judge0 ids and default snippets
//! - `conversation` - Chat roles, turns and the agent mode
//! - `session` - The read-only editor snapshot handed to the interpreter
//! - `notification` - Toast payloads shown by the UI
//! - `config` - File + environment configuration
//! - `format` - Cosmetic, best-effort code formatting

pub mod config;
pub mod conversation;
pub mod format;
pub mod language;
pub mod notification;
pub mod paths;
pub mod session;

// Re-export commonly used types
pub use config::{Config, ConfigError, ExecutionConfig, HistoryConfig, ProviderConfig};
pub use conversation::{AgentMode, ConversationTurn, Role};
pub use format::format_code;
pub use language::{Language, UnknownLanguage};
pub use notification::{Notification, NotificationLevel};
pub use session::SessionContext;
