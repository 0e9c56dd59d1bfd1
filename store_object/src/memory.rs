//! In-process article store
//!
//! Behaves like the Postgres store for everything the cache layer observes:
//! sequential ids, live-row filtering, author attachment on detail reads and
//! a field-restricted update. Counts read queries so callers can tell cache
//! hits from store round-trips, and can simulate latency or an outage.

use crate::errors::StoreError;
use crate::model::{Article, ArticleChanges, ArticleListing, Author, NewArticle};
use crate::store::ArticleStore;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    articles: BTreeMap<i64, Article>,
    authors: HashMap<i64, String>,
}

/// BTreeMap-backed [`ArticleStore`]
#[derive(Debug)]
pub struct MemoryArticleStore {
    state: RwLock<MemoryState>,
    read_queries: AtomicUsize,
    available: AtomicBool,
    latency: Option<Duration>,
}

impl Default for MemoryArticleStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryArticleStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            read_queries: AtomicUsize::new(0),
            available: AtomicBool::new(true),
            latency: None,
        }
    }

    /// Delay every operation by `latency` (tokio clock)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Register a user so detail reads can attach it as author
    pub async fn add_author(&self, id: i64, username: &str) {
        self.state
            .write()
            .await
            .authors
            .insert(id, username.to_string());
    }

    /// Make every subsequent operation fail (or succeed again)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of `find_by_id` and `list_active` calls served
    pub fn read_query_count(&self) -> usize {
        self.read_queries.load(Ordering::SeqCst)
    }

    async fn enter(&self, operation: &str) -> Result<(), StoreError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "memory store offline during {operation}"
            )))
        }
    }

    fn with_author(state: &MemoryState, article: &Article) -> Article {
        let mut article = article.clone();
        article.author = state.authors.get(&article.author_id).map(|username| Author {
            id: article.author_id,
            username: username.clone(),
        });
        article
    }
}

#[async_trait]
impl ArticleStore for MemoryArticleStore {
    async fn create(&self, article: NewArticle) -> Result<Article, StoreError> {
        self.enter("create").await?;
        let mut state = self.state.write().await;
        state.last_id += 1;
        let now = Utc::now();
        let created = Article {
            id: state.last_id,
            title: article.title,
            description: article.description,
            content: article.content,
            author_id: article.author_id,
            author: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        state.articles.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Article>, StoreError> {
        self.read_queries.fetch_add(1, Ordering::SeqCst);
        self.enter("find_by_id").await?;
        let state = self.state.read().await;
        Ok(state
            .articles
            .get(&id)
            .filter(|article| !article.is_deleted())
            .map(|article| Self::with_author(&state, article)))
    }

    async fn find_with_deleted(&self, id: i64) -> Result<Option<Article>, StoreError> {
        self.enter("find_with_deleted").await?;
        let state = self.state.read().await;
        Ok(state
            .articles
            .get(&id)
            .map(|article| Self::with_author(&state, article)))
    }

    async fn list_active(&self) -> Result<Vec<ArticleListing>, StoreError> {
        self.read_queries.fetch_add(1, Ordering::SeqCst);
        self.enter("list_active").await?;
        let state = self.state.read().await;
        Ok(state
            .articles
            .values()
            .filter(|article| !article.is_deleted())
            .map(|article| ArticleListing {
                id: article.id,
                title: article.title.clone(),
                description: article.description.clone(),
                content: article.content.clone(),
            })
            .collect())
    }

    async fn update_fields(&self, id: i64, changes: &ArticleChanges) -> Result<bool, StoreError> {
        self.enter("update_fields").await?;
        let mut state = self.state.write().await;
        match state.articles.get_mut(&id) {
            Some(article) if !article.is_deleted() => {
                changes.apply_to(article);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, StoreError> {
        self.enter("soft_delete").await?;
        let mut state = self.state.write().await;
        match state.articles.get_mut(&id) {
            Some(article) if !article.is_deleted() => {
                article.deleted_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn purge(&self, id: i64) -> Result<bool, StoreError> {
        self.enter("purge").await?;
        Ok(self.state.write().await.articles.remove(&id).is_some())
    }
}
