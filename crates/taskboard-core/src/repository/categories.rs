use crate::error::CoreError;
use crate::models::{
    Category, CategoryChanges, NewCategoryData, NewCategoryRecord, Task, UpdateCategoryData,
    UpdateTaskData, DEFAULT_CATEGORY_COLOR,
};
use crate::repository::{required, CategoryDeletePolicy, TaskRepository};
use crate::store::CategoryStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Category repository backed by any [`CategoryStore`]. Task counts are joined
/// in from the task repository on every read and never stored.
pub struct StoreCategoryRepository<S, T: ?Sized> {
    store: Arc<S>,
    tasks: Arc<T>,
    delete_policy: CategoryDeletePolicy,
}

impl<S: CategoryStore, T: TaskRepository + ?Sized> StoreCategoryRepository<S, T> {
    pub fn new(store: Arc<S>, tasks: Arc<T>) -> Self {
        Self {
            store,
            tasks,
            delete_policy: CategoryDeletePolicy::default(),
        }
    }

    pub fn with_delete_policy(mut self, policy: CategoryDeletePolicy) -> Self {
        self.delete_policy = policy;
        self
    }

    async fn counts(&self) -> Result<HashMap<i64, i64>, CoreError> {
        let tasks = self.tasks.get_all().await?;
        Ok(count_by_category(&tasks))
    }

    async fn find(&self, id: i64) -> Result<Category, CoreError> {
        self.store
            .get_category(id)
            .await
            .map_err(|e| CoreError::load(&format!("category {}", id), e))?
            .ok_or_else(|| CoreError::NotFound(format!("category {}", id)))
    }

    async fn with_count(&self, mut category: Category) -> Result<Category, CoreError> {
        category.task_count = self.tasks.get_by_category(category.id).await?.len() as i64;
        Ok(category)
    }
}

pub(crate) fn count_by_category(tasks: &[Task]) -> HashMap<i64, i64> {
    let mut counts = HashMap::new();
    for category_id in tasks.iter().filter_map(|t| t.category_id) {
        *counts.entry(category_id).or_insert(0) += 1;
    }
    counts
}

#[async_trait]
impl<S: CategoryStore, T: TaskRepository + ?Sized> super::CategoryRepository
    for StoreCategoryRepository<S, T>
{
    #[tracing::instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<Category>, CoreError> {
        let mut categories = self
            .store
            .list_categories()
            .await
            .map_err(|e| CoreError::load("categories", e))?;

        let counts = self.counts().await?;
        for category in &mut categories {
            category.task_count = counts.get(&category.id).copied().unwrap_or(0);
        }
        Ok(categories)
    }

    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: i64) -> Result<Category, CoreError> {
        let category = self.find(id).await?;
        self.with_count(category).await
    }

    #[tracing::instrument(skip(self, data), fields(name = %data.name))]
    async fn create(&self, data: NewCategoryData) -> Result<Category, CoreError> {
        let record = NewCategoryRecord {
            name: required("name", &data.name)?,
            color: color_or_default(data.color.as_deref().unwrap_or_default()),
        };

        let mut category = self
            .store
            .insert_category(record)
            .await
            .map_err(|e| CoreError::store("create category", e))?;
        category.task_count = 0;
        tracing::debug!(id = category.id, "category created");
        Ok(category)
    }

    #[tracing::instrument(skip(self))]
    async fn update(&self, id: i64, data: UpdateCategoryData) -> Result<Category, CoreError> {
        let changes = CategoryChanges {
            name: data
                .name
                .as_deref()
                .map(|n| required("name", n))
                .transpose()?,
            color: data.color.as_deref().map(color_or_default),
        };

        let category = self
            .store
            .update_category(id, changes)
            .await
            .map_err(|e| CoreError::store(&format!("update category {}", id), e))?
            .ok_or_else(|| CoreError::NotFound(format!("category {}", id)))?;
        self.with_count(category).await
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<(), CoreError> {
        let category = self.find(id).await?;
        let referencing = self.tasks.get_by_category(id).await?;

        if !referencing.is_empty() {
            match self.delete_policy {
                CategoryDeletePolicy::Block => {
                    return Err(CoreError::CategoryInUse {
                        name: category.name,
                        count: referencing.len(),
                    });
                }
                CategoryDeletePolicy::Detach => {
                    for task in &referencing {
                        let patch = UpdateTaskData {
                            category_id: Some(None),
                            ..Default::default()
                        };
                        self.tasks.update(task.id, patch).await?;
                    }
                    tracing::debug!(
                        id,
                        detached = referencing.len(),
                        "tasks detached from category"
                    );
                }
            }
        }

        let removed = self
            .store
            .delete_categories(&[id])
            .await
            .map_err(|e| CoreError::store(&format!("delete category {}", id), e))?;

        if removed == 0 {
            return Err(CoreError::NotFound(format!("category {}", id)));
        }
        Ok(())
    }
}

/// Blank colors fall back to the default on both create and update.
fn color_or_default(color: &str) -> String {
    match color.trim() {
        "" => DEFAULT_CATEGORY_COLOR.to_string(),
        trimmed => trimmed.to_string(),
    }
}
