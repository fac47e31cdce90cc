use crate::error::CoreError;
use crate::models::{
    Completion, NewTaskData, NewTaskRecord, Task, TaskChanges, UpdateTaskData,
};
use crate::query::{Filter, TaskQuery};
use crate::repository::required;
use crate::store::TaskStore;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Task repository backed by any [`TaskStore`].
pub struct StoreTaskRepository<S> {
    store: Arc<S>,
}

impl<S: TaskStore> StoreTaskRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn list(&self, query: TaskQuery) -> Result<Vec<Task>, CoreError> {
        self.store
            .list_tasks(&query)
            .await
            .map_err(|e| CoreError::load("tasks", e))
    }

    /// Resolves a patch against the stored task. Completion is only stamped on a
    /// false -> true transition; an explicit `false` always clears the stamp.
    fn resolve_changes(current: &Task, data: UpdateTaskData) -> Result<TaskChanges, CoreError> {
        let title = data
            .title
            .as_deref()
            .map(|t| required("title", t))
            .transpose()?;

        let completion = match data.completed {
            Some(true) if !current.completed => Some(Completion {
                completed: true,
                completed_at: Some(Utc::now()),
            }),
            Some(true) => Some(Completion {
                completed: true,
                completed_at: current.completed_at.or_else(|| Some(Utc::now())),
            }),
            Some(false) => Some(Completion {
                completed: false,
                completed_at: None,
            }),
            None => None,
        };

        Ok(TaskChanges {
            title,
            description: data.description,
            priority: data.priority,
            due_date: data.due_date,
            category_id: data.category_id,
            completion,
        })
    }
}

#[async_trait]
impl<S: TaskStore> super::TaskRepository for StoreTaskRepository<S> {
    #[tracing::instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Task>, CoreError> {
        self.list(TaskQuery::all()).await
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Task, CoreError> {
        self.store
            .get_task(id)
            .await
            .map_err(|e| CoreError::load(&format!("task {}", id), e))?
            .ok_or_else(|| CoreError::NotFound(format!("task {}", id)))
    }

    #[tracing::instrument(skip(self, data), fields(title = %data.title))]
    async fn create(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let record = NewTaskRecord {
            title: required("title", &data.title)?,
            description: data.description.unwrap_or_default(),
            priority: data.priority.unwrap_or_default(),
            due_date: data.due_date,
            category_id: data.category_id,
            created_at: Utc::now(),
        };

        let task = self
            .store
            .insert_task(record)
            .await
            .map_err(|e| CoreError::store("create task", e))?;
        tracing::debug!(id = task.id, "task created");
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError> {
        let current = self.get_by_id(id).await?;
        let changes = Self::resolve_changes(&current, data)?;

        self.store
            .update_task(id, changes)
            .await
            .map_err(|e| CoreError::store(&format!("update task {}", id), e))?
            .ok_or_else(|| CoreError::NotFound(format!("task {}", id)))
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), CoreError> {
        let removed = self
            .store
            .delete_tasks(&[id])
            .await
            .map_err(|e| CoreError::store(&format!("delete task {}", id), e))?;

        if removed == 0 {
            return Err(CoreError::NotFound(format!("task {}", id)));
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_category(&self, category_id: i64) -> Result<Vec<Task>, CoreError> {
        self.list(TaskQuery::all().filter(Filter::Category(Some(category_id))))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_status(&self, completed: bool) -> Result<Vec<Task>, CoreError> {
        self.list(TaskQuery::all().filter(Filter::Completed(completed)))
            .await
    }

    #[tracing::instrument(skip(self))]
    async fn delete_completed(&self) -> Result<u64, CoreError> {
        let ids: Vec<i64> = self
            .get_by_status(true)
            .await?
            .into_iter()
            .map(|t| t.id)
            .collect();

        if ids.is_empty() {
            return Ok(0);
        }

        let removed = self
            .store
            .delete_tasks(&ids)
            .await
            .map_err(|e| CoreError::store("delete completed tasks", e))?;
        tracing::debug!(removed, "completed tasks cleared");
        Ok(removed)
    }
}
