//! Cache-aside manager for articles
//!
//! Population and invalidation rules:
//! - list reads cache the summaries under [`ARTICLES_KEY`]
//! - detail reads cache the full article under [`article_key`]
//! - create drops the list entry
//! - update drops the list entry and the article's entry
//! - delete drops the list entry in a detached task after the soft delete;
//!   the article's entry is kept unless [`InvalidationPolicy::detail_on_delete`]
//!   is set, so a deleted article may still be served from cache until its TTL ends
//!
//! The manager keeps no state of its own. Concurrent misses each query the
//! store and each write the cache, and a read racing a write may re-populate
//! an entry the write just dropped; both are bounded by the TTL.

use super::errors::ArticleError;
use super::keys::{article_key, ARTICLES_KEY, ARTICLE_CACHE_TTL};
use super::summary::ArticleSummary;
use cache_system::{CacheStore, CacheStoreExt};
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;
use store_object::{Article, ArticleChanges, ArticleStore, NewArticle};
use tokio::task::JoinHandle;

/// Handle on the detached invalidation started by [`ArticleManager::delete`].
/// Dropping it leaves the task running.
pub type PendingInvalidation = JoinHandle<()>;

/// Which cache entries writes drop beyond the fixed rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvalidationPolicy {
    /// Also drop the article's own entry on delete
    pub detail_on_delete: bool,
}

/// Mediates every article read and write between callers, the store and the cache
#[derive(Clone)]
pub struct ArticleManager {
    store: Arc<dyn ArticleStore>,
    cache: Arc<dyn CacheStore>,
    policy: InvalidationPolicy,
}

impl Debug for ArticleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleManager")
            .field("store", &self.store)
            .field("cache", &self.cache)
            .field("policy", &self.policy)
            .finish()
    }
}

impl ArticleManager {
    pub fn new(store: Arc<dyn ArticleStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            store,
            cache,
            policy: InvalidationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: InvalidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// List every live article as id, title and description
    pub async fn list(&self) -> Result<Vec<ArticleSummary>, ArticleError> {
        match self.cache.get_json::<Vec<ArticleSummary>>(ARTICLES_KEY).await {
            Ok(Some(cached)) => {
                debug_log!(key = ARTICLES_KEY, count = cached.len(), "article list cache hit");
                return Ok(cached);
            }
            Ok(None) => {
                debug_log!(key = ARTICLES_KEY, "article list cache miss");
            }
            Err(e) => {
                tracing::warn!(key = ARTICLES_KEY, error = %e, "article list cache read failed, querying store");
            }
        }

        let summaries: Vec<ArticleSummary> = self
            .store
            .list_active()
            .await?
            .into_iter()
            .map(ArticleSummary::from)
            .collect();

        self.populate(ARTICLES_KEY, &summaries).await;
        Ok(summaries)
    }

    /// Get one live article with all of its fields
    pub async fn get(&self, id: i64) -> Result<Article, ArticleError> {
        let key = article_key(id);

        match self.cache.get_json::<Article>(&key).await {
            Ok(Some(cached)) => {
                debug_log!(key = %key, "article cache hit");
                return Ok(cached);
            }
            Ok(None) => {
                debug_log!(key = %key, "article cache miss");
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "article cache read failed, querying store");
            }
        }

        let article = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(id))?;

        self.populate(&key, &article).await;
        Ok(article)
    }

    /// Create an article owned by `author`
    pub async fn create(
        &self,
        author: Option<i64>,
        fields: ArticleChanges,
    ) -> Result<Article, ArticleError> {
        let author_id = author.ok_or(ArticleError::Unauthenticated)?;

        let created = self
            .store
            .create(NewArticle {
                title: fields.title,
                description: fields.description,
                content: fields.content,
                author_id,
            })
            .await?;

        // A new id has no entry of its own yet; only the list is stale
        invalidate(self.cache.as_ref(), ARTICLES_KEY).await;
        Ok(created)
    }

    /// Replace title, description and content of a live article
    pub async fn update(&self, id: i64, fields: ArticleChanges) -> Result<Article, ArticleError> {
        let mut article = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(ArticleError::NotFound(id))?;

        fields.apply_to(&mut article);

        // The row may have been deleted between the read and the write
        if !self.store.update_fields(id, &fields).await? {
            return Err(ArticleError::NotFound(id));
        }

        invalidate(self.cache.as_ref(), ARTICLES_KEY).await;
        invalidate(self.cache.as_ref(), &article_key(id)).await;
        Ok(article)
    }

    /// Soft-delete a live article.
    ///
    /// Returns once the store has marked the row; cache invalidation runs in a
    /// detached task whose handle is returned.
    pub async fn delete(&self, id: i64) -> Result<PendingInvalidation, ArticleError> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(ArticleError::NotFound(id));
        }
        if !self.store.soft_delete(id).await? {
            return Err(ArticleError::NotFound(id));
        }

        let cache = Arc::clone(&self.cache);
        let detail_key = self.policy.detail_on_delete.then(|| article_key(id));
        Ok(tokio::spawn(async move {
            invalidate(cache.as_ref(), ARTICLES_KEY).await;
            if let Some(key) = detail_key {
                invalidate(cache.as_ref(), &key).await;
            }
        }))
    }

    /// Best-effort cache write
    async fn populate<T>(&self, key: &str, value: &T)
    where
        T: Serialize + Sync + ?Sized,
    {
        match self.cache.set_json(key, value, ARTICLE_CACHE_TTL).await {
            Ok(()) => {
                trace_log!(key = %key, "article cache populated");
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "article cache write failed");
            }
        }
    }
}

/// Best-effort cache delete
async fn invalidate(cache: &dyn CacheStore, key: &str) {
    match cache.delete(key).await {
        Ok(_) => {
            trace_log!(key = %key, "article cache entry dropped");
        }
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "article cache invalidation failed");
        }
    }
}
