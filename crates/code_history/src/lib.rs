//! code_history - saved snippets per user
//!
//! Storage and auth are delegated to Supabase. This crate only shapes the
//! requests, enforces the save rules and runs the background auto-saver.

pub mod autosave;
pub mod error;
pub mod models;
pub mod save;
pub mod store;
pub mod supabase;

pub use autosave::{AutoSaver, AUTO_SAVE_DELAY};
pub use error::HistoryError;
pub use models::{AuthUser, CodeHistoryEntry, NewCodeHistoryEntry};
pub use save::{save_snapshot, MIN_MANUAL_SAVE_LEN};
pub use store::CodeHistoryStore;
pub use supabase::SupabaseStore;
