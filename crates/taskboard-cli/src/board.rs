use anyhow::{bail, Result};
use std::sync::Arc;
use std::time::Duration;
use taskboard_core::db::{self, DbPool};
use taskboard_core::repository::{
    CategoryRepository, StoreCategoryRepository, StoreTaskRepository, TaskRepository,
};
use taskboard_core::state::{CategoryState, TaskState};
use taskboard_core::store::{CategoryStore, MemoryStore, SqliteStore, TaskStore};

use crate::config::{Config, StoreKind};

/// Both collection caches for one CLI run.
pub struct Board {
    pub tasks: TaskState<dyn TaskRepository>,
    pub categories: CategoryState<dyn CategoryRepository>,
    pool: Option<DbPool>,
}

impl Board {
    /// Opens the configured store and mounts both caches.
    pub async fn open(config: &Config) -> Result<Self> {
        let (tasks, categories, pool) = match config.store {
            StoreKind::Sqlite => {
                let pool = db::establish_connection(&config.database_path).await?;
                let (tasks, categories) =
                    repositories(Arc::new(SqliteStore::new(pool.clone())), config);
                (tasks, categories, Some(pool))
            }
            StoreKind::Memory => {
                let store = MemoryStore::with_latency(Duration::from_millis(config.latency_ms));
                let (tasks, categories) = repositories(Arc::new(store), config);
                (tasks, categories, None)
            }
        };

        Ok(Self {
            tasks: TaskState::mount(tasks).await,
            categories: CategoryState::mount(categories).await,
            pool,
        })
    }

    /// Fails when either initial load did not succeed.
    pub fn ensure_loaded(&self) -> Result<()> {
        if let Some(message) = self.tasks.error().or_else(|| self.categories.error()) {
            bail!("{}", message);
        }
        Ok(())
    }

    /// Picks up fresh category counts after tasks changed.
    pub async fn tasks_changed(&mut self) {
        self.categories.refetch().await;
    }

    /// Closes the database pool so every connection shuts down cleanly before
    /// the process exits.
    pub async fn close(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
        }
    }
}

fn repositories<S>(
    store: Arc<S>,
    config: &Config,
) -> (Arc<dyn TaskRepository>, Arc<dyn CategoryRepository>)
where
    S: TaskStore + CategoryStore + 'static,
{
    let tasks = Arc::new(StoreTaskRepository::new(store.clone()));
    let categories = Arc::new(
        StoreCategoryRepository::new(store, tasks.clone())
            .with_delete_policy(config.category_delete),
    );
    (tasks, categories)
}
