use crate::error::CoreError;
use crate::models::{
    Category, NewCategoryData, NewTaskData, Task, UpdateCategoryData, UpdateTaskData,
};
use async_trait::async_trait;
use serde::Deserialize;

pub mod categories;
pub mod tasks;

pub use categories::StoreCategoryRepository;
pub use tasks::StoreTaskRepository;

/// Domain operations on tasks
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Every task, newest-created first.
    async fn get_all(&self) -> Result<Vec<Task>, CoreError>;
    async fn get_by_id(&self, id: i64) -> Result<Task, CoreError>;
    async fn create(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn update(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete(&self, id: i64) -> Result<(), CoreError>;
    async fn get_by_category(&self, category_id: i64) -> Result<Vec<Task>, CoreError>;
    async fn get_by_status(&self, completed: bool) -> Result<Vec<Task>, CoreError>;
    /// Removes every completed task and returns how many were removed.
    async fn delete_completed(&self) -> Result<u64, CoreError>;
}

/// Domain operations on categories. Every category returned carries a
/// `task_count` computed at call time.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Category>, CoreError>;
    async fn get_by_id(&self, id: i64) -> Result<Category, CoreError>;
    async fn create(&self, data: NewCategoryData) -> Result<Category, CoreError>;
    async fn update(&self, id: i64, data: UpdateCategoryData) -> Result<Category, CoreError>;
    async fn delete(&self, id: i64) -> Result<(), CoreError>;
}

/// What happens to tasks that still reference a category being deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryDeletePolicy {
    /// Refuse to delete while any task references the category.
    #[default]
    Block,
    /// Clear `category_id` on referencing tasks, then delete.
    Detach,
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}
