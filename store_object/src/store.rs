//! Article store contract
//!
//! This module defines the persistence operations the cache layer consumes.

use crate::errors::StoreError;
use crate::model::{Article, ArticleChanges, ArticleListing, NewArticle};
use async_trait::async_trait;
use std::fmt::Debug;

/// Durable article storage with soft deletion
///
/// Every lookup except [`ArticleStore::find_with_deleted`] ignores rows whose
/// soft-delete marker is set.
#[async_trait]
pub trait ArticleStore: Send + Sync + Debug {
    /// Insert a new live article and return it with its assigned id
    async fn create(&self, article: NewArticle) -> Result<Article, StoreError>;

    /// Get a live article by id, attaching its author when available
    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, StoreError>;

    /// Get an article by id whether or not it has been soft-deleted
    async fn find_with_deleted(&self, id: i64) -> Result<Option<Article>, StoreError>;

    /// List live articles ordered by id
    async fn list_active(&self) -> Result<Vec<ArticleListing>, StoreError>;

    /// Write title, description and content of a live article.
    /// Returns whether a row was updated.
    async fn update_fields(&self, id: i64, changes: &ArticleChanges) -> Result<bool, StoreError>;

    /// Set the soft-delete marker. Returns whether a live row was marked.
    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Physically remove an article, deleted or not. Returns whether a row was removed.
    async fn purge(&self, id: i64) -> Result<bool, StoreError>;
}
