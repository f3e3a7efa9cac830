//! REST API 客户端

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

use crate::app::tasks::model::{Task, TaskUpdates};
use crate::app::users::model::User;
use crate::core::response::{ErrorResponse, MessageResponse};

/// 客户端侧错误
#[derive(Debug)]
pub enum ApiError {
    Http(reqwest::Error),
    /// 服务端返回的 {error} 体
    Server { status: u16, message: String },
    /// 尚未登录就发起需要用户的操作
    NotSignedIn,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "http error: {}", e),
            ApiError::Server { status, message } => {
                write!(f, "server error ({}): {}", status, message)
            }
            ApiError::NotSignedIn => write!(f, "no current user"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Http(err)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let message = match resp.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    /// GET /api/users?email= — 查找或创建用户
    pub async fn get_or_create_user(&self, email: &str) -> Result<User, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/users"))
            .query(&[("email", email)])
            .send()
            .await?;
        Self::check(resp).await
    }

    /// GET /api/tasks?userId=
    pub async fn tasks_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/tasks"))
            .query(&[("userId", user_id.to_string())])
            .send()
            .await?;
        Self::check(resp).await
    }

    /// POST /api/tasks
    pub async fn add_task(
        &self,
        user_id: Uuid,
        text: &str,
        priority: i32,
    ) -> Result<Task, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/tasks"))
            .json(&json!({
                "userId": user_id,
                "text": text,
                "priority": priority,
            }))
            .send()
            .await?;
        Self::check(resp).await
    }

    /// PUT /api/tasks
    pub async fn update_task(&self, id: Uuid, updates: &TaskUpdates) -> Result<Task, ApiError> {
        let resp = self
            .client
            .put(self.url("/api/tasks"))
            .json(&json!({
                "id": id,
                "updates": updates,
            }))
            .send()
            .await?;
        Self::check(resp).await
    }

    /// DELETE /api/tasks?id=
    pub async fn delete_task(&self, id: Uuid) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.url("/api/tasks"))
            .query(&[("id", id.to_string())])
            .send()
            .await?;
        let _: MessageResponse = Self::check(resp).await?;
        Ok(())
    }
}
