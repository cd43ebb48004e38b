//! Supabase implementation of [`CodeHistoryStore`] over the auth and
//! PostgREST endpoints.

use async_trait::async_trait;
use ide_core::HistoryConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::error::{HistoryError, Result};
use crate::models::{AuthUser, CodeHistoryEntry, NewCodeHistoryEntry};
use crate::store::CodeHistoryStore;

const TABLE: &str = "code_history";
const LIST_LIMIT: &str = "50";

pub struct SupabaseStore {
    client: Client,
    url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Result<Self> {
        match (&config.url, &config.anon_key) {
            (Some(url), Some(key)) if config.is_configured() => Ok(Self::new(url, key)),
            _ => Err(HistoryError::NotConfigured),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, TABLE)
    }

    fn authorized(&self, builder: RequestBuilder, access_token: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {access_token}"))
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("msg"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or(body);
        Err(HistoryError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl CodeHistoryStore for SupabaseStore {
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>> {
        let response = self
            .authorized(
                self.client.get(format!("{}/auth/v1/user", self.url)),
                access_token,
            )
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }
        let response = Self::check(response).await?;
        Ok(Some(response.json().await?))
    }

    async fn insert(&self, access_token: &str, entry: &NewCodeHistoryEntry) -> Result<CodeHistoryEntry> {
        let response = self
            .authorized(self.client.post(self.table_url()), access_token)
            .header("Prefer", "return=representation")
            .json(entry)
            .send()
            .await?;
        let response = Self::check(response).await?;

        let mut rows: Vec<CodeHistoryEntry> = response.json().await?;
        rows.pop().ok_or_else(|| HistoryError::Api {
            status: 201,
            message: "insert returned no row".to_string(),
        })
    }

    async fn list(&self, access_token: &str, user_id: &str) -> Result<Vec<CodeHistoryEntry>> {
        let user_filter = format!("eq.{user_id}");
        let response = self
            .authorized(self.client.get(self.table_url()), access_token)
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "created_at.desc"),
                ("limit", LIST_LIMIT),
            ])
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn get(&self, access_token: &str, id: &str) -> Result<Option<CodeHistoryEntry>> {
        let id_filter = format!("eq.{id}");
        let response = self
            .authorized(self.client.get(self.table_url()), access_token)
            .query(&[("select", "*"), ("id", id_filter.as_str())])
            .send()
            .await?;
        let response = Self::check(response).await?;

        let rows: Vec<CodeHistoryEntry> = response.json().await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, access_token: &str, id: &str) -> Result<()> {
        let id_filter = format!("eq.{id}");
        let response = self
            .authorized(self.client.delete(self.table_url()), access_token)
            .query(&[("id", id_filter.as_str())])
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
