use crate::error::StoreError;
use crate::models::{Category, CategoryChanges, NewCategoryRecord};
use crate::store::SqliteStore;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

#[async_trait]
impl super::CategoryStore for SqliteStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let categories = sqlx::query_as("SELECT id, name, color FROM categories ORDER BY id")
            .fetch_all(self.pool())
            .await?;
        Ok(categories)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        let category = sqlx::query_as("SELECT id, name, color FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(category)
    }

    async fn insert_category(&self, record: NewCategoryRecord) -> Result<Category, StoreError> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            r#"INSERT INTO categories (id, name, color)
            SELECT COALESCE(MAX(id), 0) + 1, $1, $2 FROM categories
            "#,
        )
        .bind(record.name)
        .bind(record.color)
        .execute(&mut *tx)
        .await?;

        let category = sqlx::query_as("SELECT id, name, color FROM categories WHERE id = $1")
            .bind(result.last_insert_rowid())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(category)
    }

    async fn update_category(
        &self,
        id: i64,
        changes: CategoryChanges,
    ) -> Result<Option<Category>, StoreError> {
        if changes.is_empty() {
            return self.get_category(id).await;
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE categories SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = changes.name {
                set.push("name = ");
                set.push_bind_unseparated(name);
            }
            if let Some(color) = changes.color {
                set.push("color = ");
                set.push_bind_unseparated(color);
            }
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);

        let mut tx = self.pool().begin().await?;
        let result = qb.build().execute(&mut *tx).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let category = sqlx::query_as("SELECT id, name, color FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(category)
    }

    async fn delete_categories(&self, ids: &[i64]) -> Result<u64, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new("DELETE FROM categories WHERE id IN (");
        let mut separated = qb.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        let result = qb.build().execute(self.pool()).await?;
        Ok(result.rows_affected())
    }
}
