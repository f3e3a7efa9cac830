//! 应用模块：状态与路由

pub mod tasks;
pub mod users;

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::error::AppError;
use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::store::Store;
use tasks::service::TaskService;
use users::service::UserService;

/// 共享应用状态
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub task_service: TaskService,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            user_service: UserService::new(store.clone()),
            task_service: TaskService::new(store.clone()),
            store,
        }
    }
}

/// 组装 API 路由
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/users",
            get(users::handler::get_user).post(users::handler::create_user),
        )
        .route(
            "/api/tasks",
            get(tasks::handler::get_tasks)
                .post(tasks::handler::create_task)
                .put(tasks::handler::update_task)
                .delete(tasks::handler::delete_task),
        )
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}

/// 健康检查
async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    state.store.ping().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": chrono::Utc::now()
    })))
}
