//! 用户处理器

use axum::{
    extract::{Query, State},
    response::Json,
};

use super::model::{CreateUserRequest, User, UserQuery};
use crate::app::AppState;
use crate::core::error::AppError;

/// GET /api/users?email= — 查找用户，不存在则创建
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<User>, AppError> {
    let email = query
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("Email is required".to_string()))?;

    let user = state.user_service.get_or_create_user(email).await?;
    Ok(Json(user))
}

/// POST /api/users {email}
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<User>, AppError> {
    let email = payload
        .email
        .as_deref()
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::Validation("Email is required".to_string()))?;

    let user = state.user_service.get_or_create_user(email).await?;
    Ok(Json(user))
}
