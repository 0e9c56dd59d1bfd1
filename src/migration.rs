//! Database migration functionality
//!
//! Creates the tables the article store reads and writes.

use sqlx::PgPool;

use crate::core::BlogHaus;
use crate::errors::BlogHausError;

const CREATE_USERS_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
)"#;

const CREATE_ARTICLES_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    content TEXT NOT NULL,
    author_id BIGINT NOT NULL REFERENCES users (id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    deleted_at TIMESTAMPTZ
)"#;

const CREATE_INDEXES_SQL: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_articles_deleted_at ON articles (deleted_at)",
    "CREATE INDEX IF NOT EXISTS idx_users_deleted_at ON users (deleted_at)",
];

const DROP_TABLES_SQL: &str = "DROP TABLE IF EXISTS articles, users CASCADE";

/// Create the users and articles tables and their indexes.
/// If recreate is true, drops existing tables first.
pub async fn migrate(pool: &PgPool, recreate: bool) -> Result<(), BlogHausError> {
    if recreate {
        tracing::warn!("dropping articles and users tables");
        sqlx::query(DROP_TABLES_SQL).execute(pool).await?;
    }

    sqlx::query(CREATE_USERS_SQL).execute(pool).await?;
    sqlx::query(CREATE_ARTICLES_SQL).execute(pool).await?;

    for index_sql in CREATE_INDEXES_SQL {
        sqlx::query(*index_sql).execute(pool).await?;
    }

    tracing::info!("schema migration applied");
    Ok(())
}

impl BlogHaus {
    /// Run [`migrate`] against this instance's pool
    pub async fn auto_migrate(&self, recreate: bool) -> Result<(), BlogHausError> {
        migrate(self.pool(), recreate).await
    }
}
