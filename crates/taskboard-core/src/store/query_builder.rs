use crate::models::TaskChanges;
use crate::query::{Filter, TaskQuery};
use sqlx::{QueryBuilder, Sqlite};

pub(crate) const TASK_COLUMNS: &str =
    "id, title, description, priority, due_date, category_id, completed, created_at, completed_at";

/// Utility functions for turning task queries and changes into SQL
pub struct SqlQueryBuilder;

impl SqlQueryBuilder {
    /// Build a full `SELECT` for a [`TaskQuery`]
    pub fn select_tasks(query: &TaskQuery) -> QueryBuilder<'static, Sqlite> {
        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT ");
        qb.push(TASK_COLUMNS);
        qb.push(" FROM tasks");

        if !query.filters.is_empty() {
            qb.push(" WHERE ");
            Self::build_sql_where_clause(&query.filters, &mut qb);
        }

        qb.push(" ORDER BY created_at DESC, id DESC");
        qb
    }

    /// Build a SQL WHERE clause from the query's filters (joined with AND)
    pub fn build_sql_where_clause(filters: &[Filter], qb: &mut QueryBuilder<'_, Sqlite>) {
        for (i, filter) in filters.iter().enumerate() {
            if i > 0 {
                qb.push(" AND ");
            }
            match filter {
                Filter::Category(Some(category_id)) => {
                    qb.push("category_id = ");
                    qb.push_bind(*category_id);
                }
                Filter::Category(None) => {
                    qb.push("category_id IS NULL");
                }
                Filter::Completed(completed) => {
                    qb.push("completed = ");
                    qb.push_bind(*completed);
                }
            }
        }
    }

    /// Build an `UPDATE tasks SET ...` statement. Returns `None` when there is
    /// nothing to set.
    pub fn update_task(id: i64, changes: &TaskChanges) -> Option<QueryBuilder<'static, Sqlite>> {
        if changes.is_empty() {
            return None;
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE tasks SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(title) = &changes.title {
                set.push("title = ");
                set.push_bind_unseparated(title.clone());
            }
            if let Some(description) = &changes.description {
                set.push("description = ");
                set.push_bind_unseparated(description.clone());
            }
            if let Some(priority) = changes.priority {
                set.push("priority = ");
                set.push_bind_unseparated(priority);
            }
            if let Some(due_date) = changes.due_date {
                set.push("due_date = ");
                set.push_bind_unseparated(due_date);
            }
            if let Some(category_id) = changes.category_id {
                set.push("category_id = ");
                set.push_bind_unseparated(category_id);
            }
            if let Some(completion) = changes.completion {
                set.push("completed = ");
                set.push_bind_unseparated(completion.completed);
                set.push("completed_at = ");
                set.push_bind_unseparated(completion.completed_at);
            }
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);
        Some(qb)
    }
}
