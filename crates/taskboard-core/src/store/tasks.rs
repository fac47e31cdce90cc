use crate::error::StoreError;
use crate::models::{NewTaskRecord, Task, TaskChanges};
use crate::query::TaskQuery;
use crate::store::query_builder::{SqlQueryBuilder, TASK_COLUMNS};
use crate::store::SqliteStore;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

#[async_trait]
impl super::TaskStore for SqliteStore {
    async fn list_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, StoreError> {
        let mut qb = SqlQueryBuilder::select_tasks(query);
        let tasks = qb.build_query_as().fetch_all(self.pool()).await?;
        Ok(tasks)
    }

    async fn get_task(&self, id: i64) -> Result<Option<Task>, StoreError> {
        let task = sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn insert_task(&self, record: NewTaskRecord) -> Result<Task, StoreError> {
        let mut tx = self.pool().begin().await?;

        // Id assignment and insert happen in one statement so two writers can't
        // read the same MAX(id).
        let result = sqlx::query(
            r#"INSERT INTO tasks (id, title, description, priority, due_date, category_id, completed, created_at, completed_at)
            SELECT COALESCE(MAX(id), 0) + 1, $1, $2, $3, $4, $5, FALSE, $6, NULL FROM tasks
            "#,
        )
        .bind(&record.title)
        .bind(&record.description)
        .bind(record.priority)
        .bind(record.due_date)
        .bind(record.category_id)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        let task = sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
            .bind(result.last_insert_rowid())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(task)
    }

    async fn update_task(&self, id: i64, changes: TaskChanges) -> Result<Option<Task>, StoreError> {
        let mut tx = self.pool().begin().await?;

        if let Some(mut qb) = SqlQueryBuilder::update_task(id, &changes) {
            let result = qb.build().execute(&mut *tx).await?;
            if result.rows_affected() == 0 {
                return Ok(None);
            }
        }

        let task = sqlx::query_as(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(task)
    }

    async fn delete_tasks(&self, ids: &[i64]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("DELETE FROM tasks WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let result = qb.build().execute(self.pool()).await?;
        Ok(result.rows_affected())
    }
}
