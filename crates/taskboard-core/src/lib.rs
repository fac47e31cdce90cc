//! # Taskboard Core Library
//!
//! The data layer of a small task manager: tasks with priorities, due dates and
//! categories, and categories with live task counts.
//!
//! ## Layers
//!
//! - [`store`]: record stores (SQLite and in-memory) with row-level CRUD
//! - [`repository`]: domain operations, validation, completion bookkeeping and
//!   derived category counts
//! - [`state`]: client-side caches that load once and change only after the
//!   repository confirms a mutation
//! - [`db`]: database connection and migration management
//! - [`models`]: core data structures and transfer objects
//! - [`query`]: filter predicates and sort order for task listings
//! - [`error`]: store and domain error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use taskboard_core::{
//!     db, models::NewTaskData,
//!     repository::{StoreCategoryRepository, StoreTaskRepository},
//!     state::{CategoryState, TaskState},
//!     store::SqliteStore,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::establish_connection("tasks.db").await?;
//!     let store = Arc::new(SqliteStore::new(pool));
//!
//!     let task_repo = Arc::new(StoreTaskRepository::new(store.clone()));
//!     let category_repo = Arc::new(StoreCategoryRepository::new(store, task_repo.clone()));
//!
//!     let mut tasks = TaskState::mount(task_repo).await;
//!     let mut categories = CategoryState::mount(category_repo).await;
//!
//!     let task = tasks.add(NewTaskData::titled("Buy milk")).await?;
//!     tasks.toggle_complete(task.id).await?;
//!     categories.refetch().await;
//!
//!     println!("{} task(s), {} done", tasks.summary().total, tasks.summary().completed);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod query;
pub mod repository;
pub mod state;
pub mod store;
