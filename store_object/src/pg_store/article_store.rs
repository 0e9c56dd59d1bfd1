//! ArticleStore implementation for Postgres

use super::core::{ArticleRow, PgArticleStore, ARTICLE_COLUMNS, ARTICLE_FROM, TABLE};
use crate::errors::StoreError;
use crate::model::{Article, ArticleChanges, ArticleListing, NewArticle};
use crate::store::ArticleStore;
use async_trait::async_trait;

const CREATE_SQL: &str = "INSERT INTO articles (title, description, content, author_id, deleted_at) \
     VALUES ($1, $2, $3, $4, NULL) \
     RETURNING id, title, description, content, author_id, created_at, updated_at, deleted_at, \
     NULL::TEXT AS author_username";

const LIST_ACTIVE_SQL: &str =
    "SELECT id, title, description, content FROM articles WHERE deleted_at IS NULL ORDER BY id";

const UPDATE_FIELDS_SQL: &str = "UPDATE articles SET title = $1, description = $2, content = $3 \
     WHERE id = $4 AND deleted_at IS NULL";

const SOFT_DELETE_SQL: &str =
    "UPDATE articles SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL";

const PURGE_SQL: &str = "DELETE FROM articles WHERE id = $1";

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn create(&self, article: NewArticle) -> Result<Article, StoreError> {
        let row = sqlx::query_as::<_, ArticleRow>(CREATE_SQL)
            .bind(&article.title)
            .bind(&article.description)
            .bind(&article.content)
            .bind(article.author_id)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(TABLE, "create", e))?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, StoreError> {
        // The live-row filter is what keeps soft-deleted articles out of detail reads
        let sql = format!(
            "SELECT {} {} WHERE a.id = $1 AND a.deleted_at IS NULL",
            ARTICLE_COLUMNS, ARTICLE_FROM
        );
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(TABLE, "find_by_id", e))?;
        Ok(row.map(Article::from))
    }

    async fn find_with_deleted(&self, id: i64) -> Result<Option<Article>, StoreError> {
        let sql = format!("SELECT {} {} WHERE a.id = $1", ARTICLE_COLUMNS, ARTICLE_FROM);
        let row = sqlx::query_as::<_, ArticleRow>(&sql)
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(TABLE, "find_with_deleted", e))?;
        Ok(row.map(Article::from))
    }

    async fn list_active(&self) -> Result<Vec<ArticleListing>, StoreError> {
        sqlx::query_as::<_, ArticleListing>(LIST_ACTIVE_SQL)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(TABLE, "list_active", e))
    }

    async fn update_fields(&self, id: i64, changes: &ArticleChanges) -> Result<bool, StoreError> {
        tracing::debug!(table = TABLE, id, "updating title, description, content");
        let result = sqlx::query(UPDATE_FIELDS_SQL)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(&changes.content)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(TABLE, "update_fields", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(SOFT_DELETE_SQL)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(TABLE, "soft_delete", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn purge(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query(PURGE_SQL)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::database_operation(TABLE, "purge", e))?;
        Ok(result.rows_affected() > 0)
    }
}
