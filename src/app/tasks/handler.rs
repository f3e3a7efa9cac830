//! 任务处理器

use axum::{
    extract::{Query, State},
    response::Json,
};
use validator::Validate;

use super::model::{CreateTaskRequest, DeleteTaskQuery, Task, TaskQuery, UpdateTaskRequest};
use crate::app::AppState;
use crate::core::error::AppError;
use crate::core::response::MessageResponse;

/// GET /api/tasks?userId=
pub async fn get_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<Vec<Task>>, AppError> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::Validation("User ID is required".to_string()))?;

    let tasks = state.task_service.get_tasks_for_user(user_id).await?;
    Ok(Json(tasks))
}

/// POST /api/tasks {userId, text, priority}
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let required =
        || AppError::Validation("User ID, text, and priority are required".to_string());

    let user_id = payload.user_id.ok_or_else(required)?;
    let text = payload
        .text
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(required)?;
    let priority = payload.priority.ok_or_else(required)?;

    payload.validate()?;

    let task = state.task_service.add_task(user_id, text, priority).await?;
    Ok(Json(task))
}

/// PUT /api/tasks {id, updates: {text?, priority?}}
pub async fn update_task(
    State(state): State<AppState>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    let required = || AppError::Validation("Task ID and updates are required".to_string());

    let id = payload.id.ok_or_else(required)?;
    let updates = payload.updates.ok_or_else(required)?;
    updates.validate()?;

    let task = state.task_service.update_task(id, &updates).await?;
    Ok(Json(task))
}

/// DELETE /api/tasks?id=
pub async fn delete_task(
    State(state): State<AppState>,
    Query(query): Query<DeleteTaskQuery>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = query
        .id
        .ok_or_else(|| AppError::Validation("Task ID is required".to_string()))?;

    state.task_service.delete_task(id).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}
