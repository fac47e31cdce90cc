use crate::models::Task;

/// A predicate over task rows. Filters in a [`TaskQuery`] are combined with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Tasks whose category matches; `None` selects uncategorized tasks.
    Category(Option<i64>),
    Completed(bool),
}

impl Filter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::Category(category_id) => task.category_id == *category_id,
            Filter::Completed(completed) => task.completed == *completed,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub filters: Vec<Filter>,
}

impl TaskQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.filters.iter().all(|f| f.matches(task))
    }

    /// Sorts `tasks` newest first, ties broken by descending id.
    pub fn sort(&self, tasks: &mut [Task]) {
        tasks.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)))
    }
}
