//! Record stores: the persistence backends behind the repositories.
//!
//! A store only persists rows. It assigns ids on insert (`max(id) + 1`, starting
//! at 1) and applies already-resolved changes; every domain rule lives in
//! [`crate::repository`].

use crate::db::DbPool;
use crate::error::StoreError;
use crate::models::{
    Category, CategoryChanges, NewCategoryRecord, NewTaskRecord, Task, TaskChanges,
};
use crate::query::TaskQuery;
use async_trait::async_trait;

pub mod categories;
pub mod memory;
pub mod query_builder;
pub mod tasks;

pub use memory::MemoryStore;

/// Row-level operations on the task collection.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, StoreError>;
    async fn get_task(&self, id: i64) -> Result<Option<Task>, StoreError>;
    async fn insert_task(&self, record: NewTaskRecord) -> Result<Task, StoreError>;
    /// Returns `None` when no task has `id`.
    async fn update_task(&self, id: i64, changes: TaskChanges) -> Result<Option<Task>, StoreError>;
    /// Removes every listed id in one operation and returns how many existed.
    async fn delete_tasks(&self, ids: &[i64]) -> Result<u64, StoreError>;
}

/// Row-level operations on the category collection.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;
    async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError>;
    async fn insert_category(&self, record: NewCategoryRecord) -> Result<Category, StoreError>;
    async fn update_category(
        &self,
        id: i64,
        changes: CategoryChanges,
    ) -> Result<Option<Category>, StoreError>;
    async fn delete_categories(&self, ids: &[i64]) -> Result<u64, StoreError>;
}

/// SQLite implementation of both stores.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
