//! Client-side view state: one cache per collection, loaded once on mount and
//! mutated only after the repository confirms a change.
//!
//! Mutating methods take `&mut self`, so a cache never has two calls in flight.

pub mod categories;
pub mod tasks;

pub use categories::CategoryState;
pub use tasks::{TaskState, TaskSummary, TaskView};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
