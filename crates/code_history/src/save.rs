use ide_core::Language;

use crate::error::{HistoryError, Result};
use crate::models::{CodeHistoryEntry, NewCodeHistoryEntry};
use crate::store::CodeHistoryStore;

/// Shortest snippet a manual save accepts.
pub const MIN_MANUAL_SAVE_LEN: usize = 10;

/// Manual save: the user must be signed in and the code must not be trivial.
pub async fn save_snapshot(
    store: &dyn CodeHistoryStore,
    access_token: Option<&str>,
    language: Language,
    code: &str,
) -> Result<CodeHistoryEntry> {
    let token = access_token.ok_or(HistoryError::NotSignedIn)?;
    let user = store
        .current_user(token)
        .await?
        .ok_or(HistoryError::NotSignedIn)?;

    if code.chars().count() < MIN_MANUAL_SAVE_LEN {
        return Err(HistoryError::NothingToSave);
    }

    let entry = store
        .insert(
            token,
            &NewCodeHistoryEntry {
                user_id: user.id,
                language: language.tag().to_string(),
                code: code.to_string(),
            },
        )
        .await?;
    log::info!("Saved {} snippet {} to history", language, entry.id);
    Ok(entry)
}
