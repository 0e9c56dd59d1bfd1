//! Convenience re-exports for common store-object usage

// Core contract
pub use crate::store::ArticleStore;

// Error types
pub use crate::errors::StoreError;

// Model
pub use crate::model::{Article, ArticleChanges, ArticleListing, Author, NewArticle};

// Implementations
pub use crate::memory::MemoryArticleStore;
pub use crate::pg_store::PgArticleStore;

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::PgPool;
