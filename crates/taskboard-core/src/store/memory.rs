use crate::error::StoreError;
use crate::models::{
    Category, CategoryChanges, NewCategoryRecord, NewTaskRecord, Task, TaskChanges,
};
use crate::query::TaskQuery;
use crate::store::{CategoryStore, TaskStore};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

/// In-process store. Every call first waits for the configured latency, which
/// stands in for a network round trip. [`MemoryStore::set_available`] switches
/// the store into a failing mode to exercise error paths.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    latency: Duration,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            latency,
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    async fn round_trip(&self) -> Result<(), StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        }
    }
}

fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, StoreError> {
        self.round_trip().await?;
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect();
        query.sort(&mut tasks);
        Ok(tasks)
    }

    async fn get_task(&self, id: i64) -> Result<Option<Task>, StoreError> {
        self.round_trip().await?;
        let tables = self.tables.read().await;
        Ok(tables.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn insert_task(&self, record: NewTaskRecord) -> Result<Task, StoreError> {
        self.round_trip().await?;
        let mut tables = self.tables.write().await;
        let task = Task {
            id: next_id(tables.tasks.iter().map(|t| t.id)),
            title: record.title,
            description: record.description,
            priority: record.priority,
            due_date: record.due_date,
            category_id: record.category_id,
            completed: false,
            created_at: record.created_at,
            completed_at: None,
        };
        tables.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: i64, changes: TaskChanges) -> Result<Option<Task>, StoreError> {
        self.round_trip().await?;
        let mut tables = self.tables.write().await;
        Ok(tables.tasks.iter_mut().find(|t| t.id == id).map(|task| {
            changes.apply(task);
            task.clone()
        }))
    }

    async fn delete_tasks(&self, ids: &[i64]) -> Result<u64, StoreError> {
        self.round_trip().await?;
        let mut tables = self.tables.write().await;
        let before = tables.tasks.len();
        tables.tasks.retain(|t| !ids.contains(&t.id));
        Ok((before - tables.tasks.len()) as u64)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.round_trip().await?;
        let tables = self.tables.read().await;
        let mut categories = tables.categories.clone();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        self.round_trip().await?;
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn insert_category(&self, record: NewCategoryRecord) -> Result<Category, StoreError> {
        self.round_trip().await?;
        let mut tables = self.tables.write().await;
        let category = Category {
            id: next_id(tables.categories.iter().map(|c| c.id)),
            name: record.name,
            color: record.color,
            task_count: 0,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: i64,
        changes: CategoryChanges,
    ) -> Result<Option<Category>, StoreError> {
        self.round_trip().await?;
        let mut tables = self.tables.write().await;
        Ok(tables.categories.iter_mut().find(|c| c.id == id).map(|category| {
            changes.apply(category);
            category.clone()
        }))
    }

    async fn delete_categories(&self, ids: &[i64]) -> Result<u64, StoreError> {
        self.round_trip().await?;
        let mut tables = self.tables.write().await;
        let before = tables.categories.len();
        tables.categories.retain(|c| !ids.contains(&c.id));
        Ok((before - tables.categories.len()) as u64)
    }
}
