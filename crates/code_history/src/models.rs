use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `code_history` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeHistoryEntry {
    pub id: String,
    pub user_id: String,
    /// Stored as the raw tag; rows written by other clients may carry tags
    /// this server does not know.
    pub language: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewCodeHistoryEntry {
    pub user_id: String,
    pub language: String,
    pub code: String,
}

/// The signed-in user as reported by Supabase auth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}
