use crate::error::CoreError;
use crate::models::{NewTaskData, Task, UpdateTaskData};
use crate::repository::TaskRepository;
use crate::state::LoadState;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Which slice of the task list is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TaskView {
    #[default]
    All,
    Active,
    Completed,
    Category(i64),
}

impl TaskView {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskView::All => true,
            TaskView::Active => !task.completed,
            TaskView::Completed => task.completed,
            TaskView::Category(id) => task.category_id == Some(*id),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid view: {0} (expected all, active, completed or a category id)")]
pub struct ParseTaskViewError(String);

impl FromStr for TaskView {
    type Err = ParseTaskViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TaskView::All),
            "active" => Ok(TaskView::Active),
            "completed" => Ok(TaskView::Completed),
            other => other
                .parse::<i64>()
                .map(TaskView::Category)
                .map_err(|_| ParseTaskViewError(s.to_string())),
        }
    }
}

impl TryFrom<String> for TaskView {
    type Error = ParseTaskViewError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TaskView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskView::All => write!(f, "all"),
            TaskView::Active => write!(f, "active"),
            TaskView::Completed => write!(f, "completed"),
            TaskView::Category(id) => write!(f, "{}", id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

impl TaskSummary {
    /// Completed share in whole percent; 0 for an empty list.
    pub fn percent_complete(&self) -> u8 {
        if self.total == 0 {
            0
        } else {
            ((self.completed * 100) / self.total) as u8
        }
    }
}

/// Cached task list mirroring a [`TaskRepository`].
pub struct TaskState<R: ?Sized> {
    repo: Arc<R>,
    tasks: Vec<Task>,
    state: LoadState,
}

impl<R: TaskRepository + ?Sized> TaskState<R> {
    /// Creates the cache in the `Loading` state without touching the repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
            state: LoadState::Loading,
        }
    }

    /// Creates the cache and performs the initial load.
    pub async fn mount(repo: Arc<R>) -> Self {
        let mut state = Self::new(repo);
        state.refetch().await;
        state
    }

    /// Loads every task again. A failure keeps the previous items and records
    /// the message in [`TaskState::error`].
    #[tracing::instrument(skip(self))]
    pub async fn refetch(&mut self) {
        self.state = LoadState::Loading;
        match self.repo.get_all().await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::warn!(error = %e, "task load failed");
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
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

    pub fn filtered(&self, view: TaskView) -> Vec<&Task> {
        self.tasks.iter().filter(|t| view.matches(t)).collect()
    }

    pub fn summary(&self) -> TaskSummary {
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        TaskSummary {
            total: self.tasks.len(),
            completed,
            active: self.tasks.len() - completed,
        }
    }

    pub async fn add(&mut self, data: NewTaskData) -> Result<Task, CoreError> {
        let task = self.repo.create(data).await?;
        tracing::debug!(id = task.id, "task added to cache");
        self.tasks.push(task.clone());
        Ok(task)
    }

    pub async fn update(&mut self, id: i64, data: UpdateTaskData) -> Result<Task, CoreError> {
        let task = self.repo.update(id, data).await?;
        self.replace(task.clone());
        Ok(task)
    }

    pub async fn remove(&mut self, id: i64) -> Result<(), CoreError> {
        self.repo.delete(id).await?;
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }

    /// Flips `completed` for a cached task. Returns `Ok(None)` without calling
    /// the repository when the id is not in the cache.
    pub async fn toggle_complete(&mut self, id: i64) -> Result<Option<Task>, CoreError> {
        let Some(current) = self.get(id) else {
            return Ok(None);
        };
        let patch = UpdateTaskData::completed(!current.completed);
        self.update(id, patch).await.map(Some)
    }

    /// Deletes every completed task and returns the repository's count.
    pub async fn clear_completed(&mut self) -> Result<u64, CoreError> {
        let removed = self.repo.delete_completed().await?;
        self.tasks.retain(|t| !t.completed);
        Ok(removed)
    }

    fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::StoreTaskRepository;
    use crate::store::MemoryStore;

    async fn mounted() -> (Arc<MemoryStore>, TaskState<StoreTaskRepository<MemoryStore>>) {
        let store = Arc::new(MemoryStore::new());
        let repo = Arc::new(StoreTaskRepository::new(store.clone()));
        (store, TaskState::mount(repo).await)
    }

    #[test]
    fn test_view_parsing() {
        assert_eq!("all".parse::<TaskView>(), Ok(TaskView::All));
        assert_eq!("Active".parse::<TaskView>(), Ok(TaskView::Active));
        assert_eq!("completed".parse::<TaskView>(), Ok(TaskView::Completed));
        assert_eq!("7".parse::<TaskView>(), Ok(TaskView::Category(7)));
        assert!("someday".parse::<TaskView>().is_err());
        assert_eq!(TaskView::Category(7).to_string(), "7");
    }

    #[tokio::test]
    async fn test_new_cache_starts_loading() {
        let repo = Arc::new(StoreTaskRepository::new(Arc::new(MemoryStore::new())));
        let state = TaskState::new(repo);
        assert!(state.is_loading());
        assert!(state.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_mount_loads_ready() {
        let (_, state) = mounted().await;
        assert_eq!(state.load_state(), &LoadState::Ready);
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_add_appends_after_confirmation() {
        let (_, mut state) = mounted().await;
        let first = state.add(NewTaskData::titled("first")).await.unwrap();
        let second = state.add(NewTaskData::titled("second")).await.unwrap();

        let ids: Vec<_> = state.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        let rejected = state.add(NewTaskData::titled("")).await;
        assert!(matches!(rejected, Err(CoreError::Validation(_))));
        assert_eq!(state.tasks().len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_complete_round_trip() {
        let (_, mut state) = mounted().await;
        let task = state.add(NewTaskData::titled("Buy milk")).await.unwrap();

        let done = state.toggle_complete(task.id).await.unwrap().unwrap();
        assert!(done.completed);
        assert!(state.get(task.id).unwrap().completed_at.is_some());

        let reopened = state.toggle_complete(task.id).await.unwrap().unwrap();
        assert!(!reopened.completed);
        assert!(state.get(task.id).unwrap().completed_at.is_none());

        assert!(state.toggle_complete(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_cache_untouched() {
        let (store, mut state) = mounted().await;
        let task = state.add(NewTaskData::titled("keep me")).await.unwrap();

        store.set_available(false);
        assert!(state.toggle_complete(task.id).await.is_err());
        assert!(state.remove(task.id).await.is_err());
        assert!(state.add(NewTaskData::titled("lost")).await.is_err());

        assert_eq!(state.tasks().len(), 1);
        assert!(!state.get(task.id).unwrap().completed);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_loaded_tasks() {
        let (store, mut state) = mounted().await;
        state.add(NewTaskData::titled("first")).await.unwrap();
        state.add(NewTaskData::titled("second")).await.unwrap();
        let before = state.tasks().to_vec();

        store.set_available(false);
        state.refetch().await;

        assert_eq!(state.tasks(), before.as_slice());
        assert!(state.error().is_some());
        assert!(matches!(state.load_state(), LoadState::Failed(_)));
    }

    #[tokio::test]
    async fn test_refetch_after_failed_load() {
        let store = Arc::new(MemoryStore::new());
        store.set_available(false);
        let repo = Arc::new(StoreTaskRepository::new(store.clone()));
        let mut state = TaskState::mount(repo).await;

        assert!(state.error().is_some());
        assert!(!state.is_loading());

        store.set_available(true);
        state.refetch().await;
        assert_eq!(state.load_state(), &LoadState::Ready);
    }

    #[tokio::test]
    async fn test_clear_completed_and_views() {
        let (_, mut state) = mounted().await;
        for i in 0..5 {
            let task = state
                .add(NewTaskData {
                    title: format!("t{i}"),
                    category_id: if i < 2 { Some(1) } else { None },
                    ..Default::default()
                })
                .await
                .unwrap();
            if i % 2 == 0 {
                state.toggle_complete(task.id).await.unwrap();
            }
        }

        assert_eq!(state.filtered(TaskView::Completed).len(), 3);
        assert_eq!(state.filtered(TaskView::Active).len(), 2);
        assert_eq!(state.filtered(TaskView::Category(1)).len(), 2);
        assert_eq!(
            state.summary(),
            TaskSummary {
                total: 5,
                completed: 3,
                active: 2
            }
        );
        assert_eq!(state.summary().percent_complete(), 60);

        assert_eq!(state.clear_completed().await.unwrap(), 3);
        assert_eq!(state.tasks().len(), 2);
        assert!(state.tasks().iter().all(|t| !t.completed));
        assert_eq!(state.clear_completed().await.unwrap(), 0);
    }
}
