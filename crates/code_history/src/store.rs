use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AuthUser, CodeHistoryEntry, NewCodeHistoryEntry};

/// Persistence seam for code history.
///
/// Every call carries the user's access token; row access is enforced by
/// the backend.
#[async_trait]
pub trait CodeHistoryStore: Send + Sync {
    /// The user the token belongs to, or `None` when it is not valid.
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>>;

    async fn insert(&self, access_token: &str, entry: &NewCodeHistoryEntry) -> Result<CodeHistoryEntry>;

    /// Newest first, at most 50 rows.
    async fn list(&self, access_token: &str, user_id: &str) -> Result<Vec<CodeHistoryEntry>>;

    async fn get(&self, access_token: &str, id: &str) -> Result<Option<CodeHistoryEntry>>;

    async fn delete(&self, access_token: &str, id: &str) -> Result<()>;
}
