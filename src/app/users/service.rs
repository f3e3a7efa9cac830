//! 用户业务服务

use std::sync::Arc;
use tracing::info;

use super::model::User;
use crate::core::error::AppError;
use crate::infrastructure::store::Store;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn Store>,
}

impl UserService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// 按邮箱查找用户，不存在则创建。
    /// 同一邮箱重复调用总是拿到同一行。
    pub async fn get_or_create_user(&self, email: &str) -> Result<User, AppError> {
        if let Some(user) = self.store.find_user_by_email(email).await? {
            return Ok(user);
        }

        let user = self.store.insert_user(email).await?;
        info!("Created user: {} ({})", user.email, user.id);
        Ok(user)
    }
}
