//! Supabase 后端（PostgREST）
//!
//! 通过 Supabase 的 REST 接口访问 users / tasks 表，
//! 语义与 Postgres 后端保持一致。

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

use super::store::Store;
use crate::app::tasks::model::Task;
use crate::app::users::model::User;
use crate::core::error::AppError;

pub struct SupabaseStore {
    client: Client,
    rest_url: String,
}

impl SupabaseStore {
    pub fn new(supabase_url: &str, anon_key: &str) -> Result<Self, AppError> {
        let key = HeaderValue::from_str(anon_key)
            .map_err(|e| AppError::Supabase(format!("Invalid anon key: {}", e)))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", anon_key))
            .map_err(|e| AppError::Supabase(format!("Invalid anon key: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    /// 非 2xx 响应转成错误，否则解析 JSON 行集
    async fn expect_rows<T: DeserializeOwned>(resp: Response) -> Result<T, AppError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Supabase(format!(
                "Supabase request failed ({}): {}",
                status, body
            )));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait]
impl Store for SupabaseStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let resp = self
            .client
            .get(self.table_url("users"))
            .query(&[
                ("select", "*".to_string()),
                ("email", format!("eq.{}", email)),
            ])
            .send()
            .await?;

        let rows: Vec<User> = Self::expect_rows(resp).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert_user(&self, email: &str) -> Result<User, AppError> {
        let resp = self
            .client
            .post(self.table_url("users"))
            .header("Prefer", "return=representation")
            .json(&json!({ "email": email }))
            .send()
            .await?;

        // 唯一键冲突说明并发请求已建好该用户，改查已有行
        if resp.status() == StatusCode::CONFLICT {
            return self
                .find_user_by_email(email)
                .await?
                .ok_or_else(|| AppError::Internal("Failed to create user".to_string()));
        }

        let rows: Vec<User> = Self::expect_rows(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Internal("Failed to create user".to_string()))
    }

    async fn tasks_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        let resp = self
            .client
            .get(self.table_url("tasks"))
            .query(&[
                ("select", "*".to_string()),
                ("user_id", format!("eq.{}", user_id)),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await?;

        Self::expect_rows(resp).await
    }

    async fn insert_task(
        &self,
        user_id: Uuid,
        text: &str,
        priority: i32,
    ) -> Result<Task, AppError> {
        let resp = self
            .client
            .post(self.table_url("tasks"))
            .header("Prefer", "return=representation")
            .json(&json!({
                "user_id": user_id,
                "text": text,
                "priority": priority,
            }))
            .send()
            .await?;

        let rows: Vec<Task> = Self::expect_rows(resp).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Internal("Failed to create task".to_string()))
    }

    async fn update_task(
        &self,
        id: Uuid,
        text: Option<&str>,
        priority: Option<i32>,
    ) -> Result<Option<Task>, AppError> {
        let mut patch = serde_json::Map::new();
        if let Some(text) = text {
            patch.insert("text".to_string(), json!(text));
        }
        if let Some(priority) = priority {
            patch.insert("priority".to_string(), json!(priority));
        }

        let resp = self
            .client
            .patch(self.table_url("tasks"))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await?;

        let rows: Vec<Task> = Self::expect_rows(resp).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        let resp = self
            .client
            .delete(self.table_url("tasks"))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .send()
            .await?;

        let rows: Vec<Task> = Self::expect_rows(resp).await?;
        Ok(!rows.is_empty())
    }

    async fn ping(&self) -> Result<(), AppError> {
        let resp = self
            .client
            .get(self.table_url("users"))
            .query(&[("select", "id".to_string()), ("limit", "1".to_string())])
            .send()
            .await?;

        let _: Vec<serde_json::Value> = Self::expect_rows(resp).await?;
        Ok(())
    }
}
