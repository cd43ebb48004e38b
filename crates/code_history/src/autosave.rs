//! Debounced background saving.
//!
//! Every edit reschedules a single pending save. When the delay elapses
//! without another edit the snapshot is written if a user is signed in, the
//! code is long enough and it differs from what was last saved. Failures are
//! logged and otherwise ignored.

use std::sync::Arc;
use std::time::Duration;

use ide_core::Language;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::models::NewCodeHistoryEntry;
use crate::store::CodeHistoryStore;

pub const AUTO_SAVE_DELAY: Duration = Duration::from_secs(10);

/// Auto-save needs strictly more than this many characters.
const MIN_AUTO_SAVE_LEN: usize = 10;

pub struct AutoSaver {
    store: Arc<dyn CodeHistoryStore>,
    delay: Duration,
    last_saved: Arc<Mutex<Option<String>>>,
    pending: Option<JoinHandle<()>>,
}

impl AutoSaver {
    pub fn new(store: Arc<dyn CodeHistoryStore>) -> Self {
        Self::with_delay(store, AUTO_SAVE_DELAY)
    }

    pub fn with_delay(store: Arc<dyn CodeHistoryStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            last_saved: Arc::new(Mutex::new(None)),
            pending: None,
        }
    }

    /// Record code saved by another path (manual save) so it is not saved twice.
    pub async fn mark_saved(&self, code: &str) {
        *self.last_saved.lock().await = Some(code.to_string());
    }

    pub async fn last_saved(&self) -> Option<String> {
        self.last_saved.lock().await.clone()
    }

    /// Cancel any pending save and schedule a new one.
    pub fn schedule(&mut self, access_token: Option<String>, language: Language, code: String) {
        self.cancel();

        let Some(token) = access_token else {
            return;
        };

        let store = Arc::clone(&self.store);
        let last_saved = Arc::clone(&self.last_saved);
        let delay = self.delay;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            save_if_changed(store.as_ref(), &last_saved, &token, language, code).await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for AutoSaver {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn save_if_changed(
    store: &dyn CodeHistoryStore,
    last_saved: &Mutex<Option<String>>,
    token: &str,
    language: Language,
    code: String,
) {
    if code.chars().count() <= MIN_AUTO_SAVE_LEN {
        return;
    }
    if last_saved.lock().await.as_deref() == Some(code.as_str()) {
        return;
    }

    let user = match store.current_user(token).await {
        Ok(Some(user)) => user,
        Ok(None) => return,
        Err(e) => {
            log::error!("Failed to save code: {}", e);
            return;
        }
    };

    let entry = NewCodeHistoryEntry {
        user_id: user.id,
        language: language.tag().to_string(),
        code,
    };
    match store.insert(token, &entry).await {
        Ok(saved) => {
            log::info!("Code saved to history ({})", saved.id);
            *last_saved.lock().await = Some(entry.code);
        }
        Err(e) => log::error!("Failed to save code: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{HistoryError, Result};
    use crate::models::{AuthUser, CodeHistoryEntry};
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct MemoryStore {
        inserted: StdMutex<Vec<NewCodeHistoryEntry>>,
        fail_inserts: bool,
    }

    #[async_trait]
    impl CodeHistoryStore for MemoryStore {
        async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
            Ok((access_token == "valid").then(|| AuthUser {
                id: "user-1".into(),
                email: None,
            }))
        }

        async fn insert(&self, _token: &str, entry: &NewCodeHistoryEntry) -> Result<CodeHistoryEntry> {
            if self.fail_inserts {
                return Err(HistoryError::Api {
                    status: 500,
                    message: "down".into(),
                });
            }
            let mut inserted = self.inserted.lock().unwrap();
            inserted.push(entry.clone());
            Ok(CodeHistoryEntry {
                id: format!("h{}", inserted.len()),
                user_id: entry.user_id.clone(),
                language: entry.language.clone(),
                code: entry.code.clone(),
                created_at: chrono::Utc::now(),
                title: None,
            })
        }

        async fn list(&self, _token: &str, _user_id: &str) -> Result<Vec<CodeHistoryEntry>> {
            Ok(Vec::new())
        }

        async fn get(&self, _token: &str, _id: &str) -> Result<Option<CodeHistoryEntry>> {
            Ok(None)
        }

        async fn delete(&self, _token: &str, _id: &str) -> Result<()> {
            Ok(())
        }
    }

    impl MemoryStore {
        fn codes(&self) -> Vec<String> {
            self.inserted
                .lock()
                .unwrap()
                .iter()
                .map(|e| e.code.clone())
                .collect()
        }
    }

    const CODE: &str = "print('hello world')";

    async fn settle() {
        tokio::time::sleep(AUTO_SAVE_DELAY + Duration::from_millis(1)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_saves_after_quiet_period() {
        let store = Arc::new(MemoryStore::default());
        let mut saver = AutoSaver::new(store.clone());

        saver.schedule(Some("valid".into()), Language::Python, CODE.into());
        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(store.codes().is_empty());

        settle().await;
        assert_eq!(store.codes(), vec![CODE.to_string()]);
        assert_eq!(saver.last_saved().await.as_deref(), Some(CODE));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_debounces() {
        let store = Arc::new(MemoryStore::default());
        let mut saver = AutoSaver::new(store.clone());

        saver.schedule(Some("valid".into()), Language::Python, "print('one....')".into());
        tokio::time::sleep(Duration::from_secs(5)).await;
        saver.schedule(Some("valid".into()), Language::Python, "print('two....')".into());

        settle().await;
        assert_eq!(store.codes(), vec!["print('two....')".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_skips_short_unchanged_and_signed_out() {
        let store = Arc::new(MemoryStore::default());
        let mut saver = AutoSaver::new(store.clone());

        saver.schedule(Some("valid".into()), Language::Python, "0123456789".into());
        settle().await;

        saver.schedule(None, Language::Python, CODE.into());
        settle().await;

        saver.schedule(Some("expired".into()), Language::Python, CODE.into());
        settle().await;

        saver.mark_saved(CODE).await;
        saver.schedule(Some("valid".into()), Language::Python, CODE.into());
        settle().await;

        assert!(store.codes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_swallowed() {
        let store = Arc::new(MemoryStore {
            fail_inserts: true,
            ..Default::default()
        });
        let mut saver = AutoSaver::new(store.clone());

        saver.schedule(Some("valid".into()), Language::Python, CODE.into());
        settle().await;
        assert_eq!(saver.last_saved().await, None);
    }

    #[tokio::test]
    async fn test_manual_save_rules() {
        use crate::save::save_snapshot;

        let store = MemoryStore::default();

        let err = save_snapshot(&store, None, Language::Python, CODE).await.unwrap_err();
        assert!(matches!(err, HistoryError::NotSignedIn));
        assert_eq!(err.notification().title, "Sign in required");

        let err = save_snapshot(&store, Some("expired"), Language::Python, CODE)
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::NotSignedIn));

        let err = save_snapshot(&store, Some("valid"), Language::Python, "x = 1")
            .await
            .unwrap_err();
        assert!(matches!(err, HistoryError::NothingToSave));
        assert_eq!(err.notification().title, "Nothing to save");

        let entry = save_snapshot(&store, Some("valid"), Language::Go, "0123456789")
            .await
            .unwrap();
        assert_eq!(entry.language, "go");
        assert_eq!(store.codes(), vec!["0123456789".to_string()]);
    }
}
