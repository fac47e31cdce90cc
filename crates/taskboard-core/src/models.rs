use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color given to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#5B47E0";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub category_id: Option<i64>,
    pub completed: bool,
    /// Set once on creation.
    pub created_at: DateTime<Utc>,
    /// `Some` exactly when `completed` is true.
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// True when the task has a due date strictly before `today` and is still open.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub color: String,
    /// Number of tasks referencing this category, computed on every read.
    #[sqlx(skip)]
    #[serde(default)]
    pub task_count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
    pub category_id: Option<i64>,
}

impl NewTaskData {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub category_id: Option<Option<i64>>,
    pub completed: Option<bool>,
}

impl UpdateTaskData {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.category_id.is_none()
            && self.completed.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewCategoryData {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryData {
    pub name: Option<String>,
    pub color: Option<String>,
}

// ============================================================================
// Store-level records
// ============================================================================

/// A fully resolved task row, ready to be inserted. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewTaskRecord {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Column changes applied by a partial task update. Completion bookkeeping has
/// already been resolved: `completed` and `completed_at` are always set together.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<NaiveDate>>,
    pub category_id: Option<Option<i64>>,
    pub completion: Option<Completion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.category_id.is_none()
            && self.completion.is_none()
    }

    /// Applies the changes to an in-memory task.
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(category_id) = self.category_id {
            task.category_id = category_id;
        }
        if let Some(completion) = self.completion {
            task.completed = completion.completed;
            task.completed_at = completion.completed_at;
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewCategoryRecord {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl CategoryChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }

    pub fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
    }
}
