//! 任务数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    /// 1（无所谓）到 5（绝对要避免）
    pub priority: i32,
    pub created_at: DateTime<Utc>,
}

/// 优先级的展示文案
pub fn priority_label(priority: i32) -> &'static str {
    match priority {
        1 => "Meh",
        2 => "Rather not",
        3 => "Don't want to",
        4 => "Really don't want to",
        5 => "Absolutely must avoid",
        _ => "Unknown",
    }
}

/// POST /api/tasks 请求体
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
    pub text: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Priority must be between 1 and 5"))]
    pub priority: Option<i32>,
}

/// PUT /api/tasks 请求体
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: Option<Uuid>,
    pub updates: Option<TaskUpdates>,
}

/// 任务的部分更新字段
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 5, message = "Priority must be between 1 and 5"))]
    pub priority: Option<i32>,
}

/// GET /api/tasks 查询参数
#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
}

/// DELETE /api/tasks 查询参数
#[derive(Debug, Deserialize)]
pub struct DeleteTaskQuery {
    pub id: Option<Uuid>,
}
