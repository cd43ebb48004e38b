//! Shared application state and the per-session registry.

use std::collections::HashMap;
use std::sync::Arc;

use agent_interpreter::{ChatSession, ErrorSolver};
use agent_llm::{create_provider, validate_provider_config, LLMError, LLMProvider};
use code_history::{AutoSaver, CodeHistoryStore, SupabaseStore};
use code_runner::ExecutionRunner;
use ide_core::{AgentMode, Config, Language};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::editor::EditorState;
use crate::error::{AppError, Result};

/// One browser tab: its editor, its chat panel and its auto-saver.
///
/// Lock order is `editor` before `chat`. Neither lock is held across an
/// awaited collaborator call.
pub struct IdeSession {
    pub id: Uuid,
    pub editor: Mutex<EditorState>,
    pub chat: Mutex<ChatSession>,
    autosaver: Mutex<Option<AutoSaver>>,
    access_token: Mutex<Option<String>>,
}

impl IdeSession {
    pub fn new(
        language: Language,
        mode: AgentMode,
        history: Option<Arc<dyn CodeHistoryStore>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            editor: Mutex::new(EditorState::new(language)),
            chat: Mutex::new(ChatSession::new(mode)),
            autosaver: Mutex::new(history.map(AutoSaver::new)),
            access_token: Mutex::new(None),
        }
    }

    /// Remember the latest access token the client presented. Auto-saves
    /// run on the user's behalf with it.
    pub async fn remember_token(&self, token: Option<&str>) {
        if let Some(token) = token {
            *self.access_token.lock().await = Some(token.to_string());
        }
    }

    /// Debounced save of the editor's current code.
    pub async fn schedule_autosave(&self, editor: &EditorState) {
        let token = self.access_token.lock().await.clone();
        if let Some(autosaver) = self.autosaver.lock().await.as_mut() {
            autosaver.schedule(token, editor.language, editor.code.clone());
        }
    }

    /// Replace the editor with a stored snapshot and schedule its auto-save.
    pub async fn load_code(&self, language: Language, code: String) -> EditorState {
        let mut editor = self.editor.lock().await;
        editor.load(language, code);
        self.schedule_autosave(&editor).await;
        editor.clone()
    }

    pub async fn mark_saved(&self, code: &str) {
        if let Some(autosaver) = self.autosaver.lock().await.as_ref() {
            autosaver.mark_saved(code).await;
        }
    }
}

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Arc<IdeSession>>>,
}

impl SessionRegistry {
    pub async fn insert(&self, session: IdeSession) -> Arc<IdeSession> {
        let session = Arc::new(session);
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::clone(&session));
        log::info!("Created IDE session {}", session.id);
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<IdeSession>> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::SessionNotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

}

pub struct AppState {
    pub chat_provider: Arc<dyn LLMProvider>,
    pub solver: ErrorSolver,
    pub runner: ExecutionRunner,
    pub history: Option<Arc<dyn CodeHistoryStore>>,
    pub sessions: SessionRegistry,
}

impl AppState {
    /// Wire every collaborator from configuration.
    ///
    /// Missing LLM keys are not fatal here; they surface per request as
    /// configuration errors. An unknown provider name is.
    pub fn from_config(config: &Config) -> std::result::Result<Self, LLMError> {
        for name in [&config.chat_provider, &config.debug_provider] {
            if let Err(e) = validate_provider_config(name, config) {
                log::warn!("Provider '{}' is not ready: {}", name, e);
            }
        }

        let chat_provider = create_provider(&config.chat_provider, config)?;
        let debug_provider = create_provider(&config.debug_provider, config)?;

        let history: Option<Arc<dyn CodeHistoryStore>> = match SupabaseStore::from_config(&config.history) {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                log::warn!("Code history disabled: {}", e);
                None
            }
        };

        Ok(Self {
            solver: ErrorSolver::new(Arc::clone(&chat_provider), debug_provider),
            chat_provider,
            runner: ExecutionRunner::new(&config.execution),
            history,
            sessions: SessionRegistry::default(),
        })
    }

    pub fn history_store(&self) -> Result<&Arc<dyn CodeHistoryStore>> {
        self.history
            .as_ref()
            .ok_or(AppError::History(code_history::HistoryError::NotConfigured))
    }

    pub async fn create_session(&self, language: Language, mode: AgentMode) -> Arc<IdeSession> {
        self.sessions
            .insert(IdeSession::new(language, mode, self.history.clone()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use code_history::error::Result as HistoryResult;
    use code_history::{AuthUser, CodeHistoryEntry, NewCodeHistoryEntry, AUTO_SAVE_DELAY};
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    #[derive(Default)]
    struct MemoryStore {
        inserted: StdMutex<Vec<NewCodeHistoryEntry>>,
    }

    #[async_trait]
    impl CodeHistoryStore for MemoryStore {
        async fn current_user(&self, _token: &str) -> HistoryResult<Option<AuthUser>> {
            Ok(Some(AuthUser {
                id: "user-1".into(),
                email: None,
            }))
        }

        async fn insert(
            &self,
            _token: &str,
            entry: &NewCodeHistoryEntry,
        ) -> HistoryResult<CodeHistoryEntry> {
            self.inserted.lock().unwrap().push(entry.clone());
            Ok(CodeHistoryEntry {
                id: "h1".into(),
                user_id: entry.user_id.clone(),
                language: entry.language.clone(),
                code: entry.code.clone(),
                created_at: chrono::Utc::now(),
                title: None,
            })
        }

        async fn list(&self, _token: &str, _user_id: &str) -> HistoryResult<Vec<CodeHistoryEntry>> {
            Ok(Vec::new())
        }

        async fn get(&self, _token: &str, _id: &str) -> HistoryResult<Option<CodeHistoryEntry>> {
            Ok(None)
        }

        async fn delete(&self, _token: &str, _id: &str) -> HistoryResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_registry_lookup() {
        let registry = SessionRegistry::default();
        assert_eq!(registry.len().await, 0);

        let session = registry
            .insert(IdeSession::new(Language::Go, AgentMode::Agent, None))
            .await;
        assert_eq!(registry.len().await, 1);

        let found = registry.get(session.id).await.unwrap();
        assert_eq!(found.editor.lock().await.language, Language::Go);
        assert_eq!(found.chat.lock().await.mode(), AgentMode::Agent);

        let missing = registry.get(Uuid::nil()).await;
        assert!(matches!(missing, Err(AppError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_autosave_without_history_is_noop() {
        let session = IdeSession::new(Language::Python, AgentMode::Ask, None);
        session.remember_token(Some("tok")).await;
        let editor = session.editor.lock().await.clone();
        session.schedule_autosave(&editor).await;
        session.mark_saved(&editor.code).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_loaded_snapshot_is_autosaved() {
        let store = Arc::new(MemoryStore::default());
        let history: Arc<dyn CodeHistoryStore> = store.clone();
        let session = IdeSession::new(Language::Python, AgentMode::Agent, Some(history));
        session.remember_token(Some("tok")).await;

        let editor = session
            .load_code(Language::Javascript, "console.log('restored')".into())
            .await;
        assert_eq!(editor.language, Language::Javascript);
        assert_eq!(editor.code, "console.log('restored')");

        tokio::time::sleep(AUTO_SAVE_DELAY + Duration::from_millis(1)).await;
        tokio::task::yield_now().await;

        let inserted = store.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].language, Language::Javascript.tag());
        assert_eq!(inserted[0].code, "console.log('restored')");
    }
}
