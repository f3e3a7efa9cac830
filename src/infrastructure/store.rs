//! 持久化客户端接口
//!
//! 三个后端（Postgres、Supabase、内存）共用一个 trait，
//! 服务层只面向 trait 编程。

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::config::{AppConfig, StoreBackend};
use super::database::PgStore;
use super::memory::MemoryStore;
use super::supabase::SupabaseStore;
use crate::app::tasks::model::Task;
use crate::app::users::model::User;
use crate::core::error::AppError;

#[async_trait]
pub trait Store: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 插入用户。实现必须对并发的同邮箱插入收敛到同一行。
    async fn insert_user(&self, email: &str) -> Result<User, AppError>;

    /// 用户的全部任务，created_at 倒序
    async fn tasks_for_user(&self, user_id: Uuid) -> Result<Vec<Task>, AppError>;

    async fn insert_task(&self, user_id: Uuid, text: &str, priority: i32)
        -> Result<Task, AppError>;

    /// 部分更新，只写入给定的字段；无匹配行时返回 None
    async fn update_task(
        &self,
        id: Uuid,
        text: Option<&str>,
        priority: Option<i32>,
    ) -> Result<Option<Task>, AppError>;

    /// 按 id 删除；无匹配行时返回 false
    async fn delete_task(&self, id: Uuid) -> Result<bool, AppError>;

    /// 健康检查探活
    async fn ping(&self) -> Result<(), AppError>;
}

/// 按配置连接对应的后端
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn Store>, AppError> {
    match config.backend {
        StoreBackend::Postgres => {
            let store = PgStore::connect(&config.database_url).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Supabase => {
            let store = SupabaseStore::new(&config.supabase_url, &config.supabase_anon_key)?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
