//! 任务业务服务

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::model::{Task, TaskUpdates};
use crate::core::error::AppError;
use crate::infrastructure::store::Store;

#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
}

impl TaskService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// 用户的全部任务，最新的在前
    pub async fn get_tasks_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        self.store.tasks_for_user(user_id).await
    }

    pub async fn add_task(
        &self,
        user_id: Uuid,
        text: &str,
        priority: i32,
    ) -> Result<Task, AppError> {
        let task = self.store.insert_task(user_id, text, priority).await?;
        info!("Created task {} for user {}", task.id, user_id);
        Ok(task)
    }

    /// 部分更新，只写入给定的字段
    pub async fn update_task(&self, id: Uuid, updates: &TaskUpdates) -> Result<Task, AppError> {
        if updates.text.is_none() && updates.priority.is_none() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }

        let task = self
            .store
            .update_task(id, updates.text.as_deref(), updates.priority)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task with ID {} not found", id)))?;

        info!("Updated task {}", task.id);
        Ok(task)
    }

    pub async fn delete_task(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_task(id).await? {
            return Err(AppError::NotFound(format!("Task with ID {} not found", id)));
        }

        info!("Deleted task {}", id);
        Ok(())
    }
}
