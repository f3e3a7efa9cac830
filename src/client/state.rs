//! 客户端应用状态
//!
//! 服务端数据的内存镜像：任务列表加上瞬时 UI 字段
//! （排序选项、方向、加载标记、当前用户）。
//! 每次变更先打到服务端，成功后再修补本地列表。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::api::{ApiClient, ApiError};
use crate::app::tasks::model::{Task, TaskUpdates};
use crate::app::users::model::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    Priority,
    Date,
    Alphabetical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// 按排序设置导出一份排好序的视图。
/// 稳定排序：同序元素保持原有相对顺序。
pub fn sort_items(items: &[Task], sort_by: SortOption, direction: SortDirection) -> Vec<Task> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = match sort_by {
            SortOption::Priority => a.priority.cmp(&b.priority),
            SortOption::Date => a.created_at.cmp(&b.created_at),
            SortOption::Alphabetical => a.text.cmp(&b.text),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

pub struct NotToDoApp {
    client: ApiClient,
    pub current_user: Option<User>,
    pub items: Vec<Task>,
    pub sort_by: SortOption,
    pub sort_direction: SortDirection,
    pub loading: bool,
}

impl NotToDoApp {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            current_user: None,
            items: Vec::new(),
            sort_by: SortOption::Priority,
            sort_direction: SortDirection::Desc,
            loading: false,
        }
    }

    /// 以邮箱登录：查找/创建用户并拉取其任务
    pub async fn sign_in(&mut self, email: &str) -> Result<User, ApiError> {
        self.loading = true;
        let result = self.load_user(email).await;
        self.loading = false;
        result
    }

    async fn load_user(&mut self, email: &str) -> Result<User, ApiError> {
        let user = self.client.get_or_create_user(email).await?;
        self.items = self.client.tasks_for_user(user.id).await?;
        self.current_user = Some(user.clone());
        Ok(user)
    }

    fn current_user_id(&self) -> Result<Uuid, ApiError> {
        self.current_user
            .as_ref()
            .map(|u| u.id)
            .ok_or(ApiError::NotSignedIn)
    }

    /// 重新拉取当前用户的任务
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let user_id = self.current_user_id()?;
        self.items = self.client.tasks_for_user(user_id).await?;
        Ok(())
    }

    /// 新增条目，服务端成功后插到列表头部（与服务端倒序一致）
    pub async fn add_item(&mut self, text: &str, priority: i32) -> Result<Task, ApiError> {
        let user_id = self.current_user_id()?;
        let task = self.client.add_task(user_id, text, priority).await?;
        self.items.insert(0, task.clone());
        Ok(task)
    }

    pub async fn update_item(
        &mut self,
        id: Uuid,
        updates: &TaskUpdates,
    ) -> Result<Task, ApiError> {
        let task = self.client.update_task(id, updates).await?;
        if let Some(slot) = self.items.iter_mut().find(|t| t.id == id) {
            *slot = task.clone();
        }
        Ok(task)
    }

    pub async fn delete_item(&mut self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete_task(id).await?;
        self.items.retain(|t| t.id != id);
        Ok(())
    }

    pub fn set_sort(&mut self, sort_by: SortOption, sort_direction: SortDirection) {
        self.sort_by = sort_by;
        self.sort_direction = sort_direction;
    }

    /// 当前排序设置下的任务视图
    pub fn sorted_items(&self) -> Vec<Task> {
        sort_items(&self.items, self.sort_by, self.sort_direction)
    }
}
