//! Store Object - persistence layer for BlogHaus articles
//!
//! This crate provides the article model types, the store contract the cache
//! layer consumes, and its Postgres and in-process implementations.

pub mod errors;
pub mod memory;
pub mod model;
pub mod pg_store;
pub mod prelude;
pub mod store;

pub use errors::StoreError;
pub use memory::MemoryArticleStore;
pub use model::{Article, ArticleChanges, ArticleListing, Author, NewArticle};
pub use pg_store::PgArticleStore;
pub use store::ArticleStore;

use sqlx::PgPool;

pub type DbPool = PgPool;
