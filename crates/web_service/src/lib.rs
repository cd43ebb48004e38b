//! web_service - HTTP API of the Omniglot IDE backend
//!
//! Every browser tab owns an [`state::IdeSession`]: an editor mirror, a chat
//! session and an auto-saver. Controllers under [`controllers`] expose them
//! below `/v1`.

pub mod controllers;
pub mod dto;
pub mod editor;
pub mod error;
pub mod middleware;
pub mod server;
pub mod state;

pub use editor::EditorState;
pub use error::AppError;
pub use server::{app_config, run, AppState};
pub use state::{IdeSession, SessionRegistry};
