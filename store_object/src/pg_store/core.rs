use crate::model::{Article, Author};
use crate::DbPool;
use chrono::{DateTime, Utc};

pub(crate) const TABLE: &str = "articles";

pub(crate) const ARTICLE_COLUMNS: &str = "a.id, a.title, a.description, a.content, a.author_id, \
     a.created_at, a.updated_at, a.deleted_at, u.username AS author_username";

pub(crate) const ARTICLE_FROM: &str =
    "FROM articles a LEFT JOIN users u ON u.id = a.author_id AND u.deleted_at IS NULL";

/// Postgres-backed article store
#[derive(Clone)]
pub struct PgArticleStore {
    pub(crate) db_pool: DbPool,
}

impl std::fmt::Debug for PgArticleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgArticleStore")
            .field("table", &TABLE)
            .field("pool_size", &self.db_pool.size())
            .finish()
    }
}

impl PgArticleStore {
    pub fn new(db_pool: DbPool) -> Self {
        Self { db_pool }
    }
}

/// Row shape of the article/author join
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ArticleRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub author_username: Option<String>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        let author = row.author_username.map(|username| Author {
            id: row.author_id,
            username,
        });
        Article {
            id: row.id,
            title: row.title,
            description: row.description,
            content: row.content,
            author_id: row.author_id,
            author,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}
