//! 内存后端
//!
//! 本地开发与测试用，语义对齐关系型后端：
//! 邮箱唯一、任务按创建时间倒序、部分更新。

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use uuid::Uuid;

use super::store::Store;
use crate::app::tasks::model::Task;
use crate::app::users::model::User;
use crate::core::error::AppError;

#[derive(Default)]
struct MemoryInner {
    users: Vec<User>,
    // 插入顺序即创建顺序
    tasks: Vec<Task>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryInner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::Internal("Memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, email: &str) -> Result<User, AppError> {
        let mut inner = self.lock()?;

        // 锁内检查即并发收敛
        if let Some(user) = inner.users.iter().find(|u| u.email == email) {
            return Ok(user.clone());
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn tasks_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        let inner = self.lock()?;
        Ok(inner
            .tasks
            .iter()
            .rev()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_task(
        &self,
        user_id: Uuid,
        text: &str,
        priority: i32,
    ) -> Result<Task, AppError> {
        let mut inner = self.lock()?;

        if !inner.users.iter().any(|u| u.id == user_id) {
            return Err(AppError::Internal(format!(
                "User {} does not exist",
                user_id
            )));
        }

        let task = Task {
            id: Uuid::new_v4(),
            user_id,
            text: text.to_string(),
            priority,
            created_at: Utc::now(),
        };
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        id: Uuid,
        text: Option<&str>,
        priority: Option<i32>,
    ) -> Result<Option<Task>, AppError> {
        let mut inner = self.lock()?;

        let Some(task) = inner.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(text) = text {
            task.text = text.to_string();
        }
        if let Some(priority) = priority {
            task.priority = priority;
        }

        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.lock()?;

        match inner.tasks.iter().position(|t| t.id == id) {
            Some(index) => {
                inner.tasks.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_user_converges_on_same_row() {
        let store = MemoryStore::new();

        let first = store.insert_user("a@b.com").await.unwrap();
        let second = store.insert_user("a@b.com").await.unwrap();

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn tasks_come_back_newest_first() {
        let store = MemoryStore::new();
        let user = store.insert_user("a@b.com").await.unwrap();

        store.insert_task(user.id, "first", 1).await.unwrap();
        store.insert_task(user.id, "second", 2).await.unwrap();

        let tasks = store.tasks_for_user(user.id).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "second");
        assert_eq!(tasks[1].text, "first");
    }

    #[tokio::test]
    async fn partial_update_touches_only_given_fields() {
        let store = MemoryStore::new();
        let user = store.insert_user("a@b.com").await.unwrap();
        let task = store.insert_task(user.id, "doom-scroll", 5).await.unwrap();

        let updated = store
            .update_task(task.id, None, Some(2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "doom-scroll");
        assert_eq!(updated.priority, 2);

        let updated = store
            .update_task(task.id, Some("argue online"), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.text, "argue online");
        assert_eq!(updated.priority, 2);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let store = MemoryStore::new();

        let updated = store
            .update_task(Uuid::new_v4(), Some("x"), None)
            .await
            .unwrap();
        assert!(updated.is_none());

        let deleted = store.delete_task(Uuid::new_v4()).await.unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn insert_task_requires_existing_user() {
        let store = MemoryStore::new();

        let result = store.insert_task(Uuid::new_v4(), "x", 1).await;
        assert!(result.is_err());
    }
}
