use crate::error::CoreError;
use crate::models::{Category, NewCategoryData, UpdateCategoryData};
use crate::repository::CategoryRepository;
use crate::state::LoadState;
use std::sync::Arc;

/// Cached category list mirroring a [`CategoryRepository`].
///
/// Task counts are only as fresh as the last load; callers that change tasks
/// refetch this cache to pick up new counts.
pub struct CategoryState<R: ?Sized> {
    repo: Arc<R>,
    categories: Vec<Category>,
    state: LoadState,
}

impl<R: CategoryRepository + ?Sized> CategoryState<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            categories: Vec::new(),
            state: LoadState::Loading,
        }
    }

    pub async fn mount(repo: Arc<R>) -> Self {
        let mut state = Self::new(repo);
        state.refetch().await;
        state
    }

    #[tracing::instrument(skip(self))]
    pub async fn refetch(&mut self) {
        self.state = LoadState::Loading;
        match self.repo.get_all().await {
            Ok(categories) => {
                self.categories = categories;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "category load failed");
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub async fn add(&mut self, data: NewCategoryData) -> Result<Category, CoreError> {
        let category = self.repo.create(data).await?;
        tracing::debug!(id = category.id, "category added to cache");
        self.categories.push(category.clone());
        Ok(category)
    }

    pub async fn update(
        &mut self,
        id: i64,
        data: UpdateCategoryData,
    ) -> Result<Category, CoreError> {
        let category = self.repo.update(id, data).await?;
        if let Some(slot) = self.categories.iter_mut().find(|c| c.id == id) {
            *slot = category.clone();
        }
        Ok(category)
    }

    pub async fn remove(&mut self, id: i64) -> Result<(), CoreError> {
        self.repo.delete(id).await?;
        self.categories.retain(|c| c.id != id);
        Ok(())
    }
}
