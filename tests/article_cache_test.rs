//! Cache-aside behaviour of the article manager
//!
//! Drives ArticleManager against the in-process store and cache and checks
//! which entries exist after each read and write.

use async_trait::async_trait;
use bloghaus::articles::keys::{ARTICLE_CACHE_TTL, ARTICLES_KEY, article_key};
use bloghaus::articles::summary::{DESCRIPTION_MAX_CHARS, TRUNCATION_MARKER};
use bloghaus::prelude::*;
use std::sync::Arc;
use std::time::Duration;

const AUTHOR: i64 = 7;

struct Harness {
    manager: ArticleManager,
    store: Arc<MemoryArticleStore>,
    cache: Arc<MemoryCache>,
}

async fn harness_with(store: MemoryArticleStore, policy: InvalidationPolicy) -> Harness {
    store.add_author(AUTHOR, "jared").await;
    let store = Arc::new(store);
    let cache = Arc::new(MemoryCache::new());
    let manager = ArticleManager::new(store.clone(), cache.clone()).with_policy(policy);
    Harness {
        manager,
        store,
        cache,
    }
}

async fn harness() -> Harness {
    harness_with(MemoryArticleStore::new(), InvalidationPolicy::default()).await
}

fn fields(title: &str, description: &str, content: &str) -> ArticleChanges {
    ArticleChanges {
        title: title.to_string(),
        description: description.to_string(),
        content: content.to_string(),
    }
}

/// Cache double whose every command fails
#[derive(Debug, Default)]
struct UnreachableCache;

#[async_trait]
impl CacheStore for UnreachableCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(CacheError::General("cache unreachable".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::General("cache unreachable".to_string()))
    }

    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        Err(CacheError::Timeout(500))
    }
}

// ========================================
// List reads
// ========================================

#[tokio::test]
async fn test_create_then_list_synthesizes_short_description() {
    let h = harness().await;
    let created = h
        .manager
        .create(Some(AUTHOR), fields("A", "", "short"))
        .await
        .unwrap();

    let listed = h.manager.list().await.unwrap();

    assert_eq!(
        listed,
        vec![ArticleSummary {
            id: created.id,
            title: "A".to_string(),
            description: "short".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_list_truncates_long_content_and_keeps_explicit_description() {
    let h = harness().await;
    let long = "x".repeat(DESCRIPTION_MAX_CHARS + 30);
    h.manager
        .create(Some(AUTHOR), fields("long", "", &long))
        .await
        .unwrap();
    h.manager
        .create(Some(AUTHOR), fields("explicit", "my summary", &long))
        .await
        .unwrap();

    let listed = h.manager.list().await.unwrap();

    assert_eq!(
        listed[0].description,
        format!("{}{}", "x".repeat(DESCRIPTION_MAX_CHARS), TRUNCATION_MARKER)
    );
    assert_eq!(listed[1].description, "my summary");
}

#[tokio::test]
async fn test_list_never_exposes_content() {
    let h = harness().await;
    h.manager
        .create(Some(AUTHOR), fields("A", "", "secret body"))
        .await
        .unwrap();

    h.manager.list().await.unwrap();

    let raw = h.cache.get(ARTICLES_KEY).await.unwrap().unwrap();
    let entries: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    for entry in entries {
        let mut keys: Vec<_> = entry.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["description", "id", "title"]);
    }
}

#[tokio::test]
async fn test_list_miss_populates_and_hit_skips_store() {
    let h = harness().await;
    h.manager
        .create(Some(AUTHOR), fields("A", "", "a"))
        .await
        .unwrap();

    let first = h.manager.list().await.unwrap();
    assert!(h.cache.contains_key(ARTICLES_KEY).await);
    assert_eq!(h.store.read_query_count(), 1);

    let second = h.manager.list().await.unwrap();
    assert_eq!(second, first);
    assert_eq!(h.store.read_query_count(), 1);
}

#[tokio::test]
async fn test_list_entry_lives_for_one_day() {
    let h = harness().await;
    h.manager.list().await.unwrap();

    let ttl = h.cache.ttl(ARTICLES_KEY).await.unwrap();
    assert!(ttl <= ARTICLE_CACHE_TTL);
    assert!(ttl > ARTICLE_CACHE_TTL - Duration::from_secs(60));
}

#[tokio::test]
async fn test_corrupt_list_entry_falls_back_to_store_and_is_replaced() {
    let h = harness().await;
    h.manager
        .create(Some(AUTHOR), fields("A", "", "a"))
        .await
        .unwrap();
    h.cache
        .set(ARTICLES_KEY, "not json", ARTICLE_CACHE_TTL)
        .await
        .unwrap();

    let listed = h.manager.list().await.unwrap();

    assert_eq!(listed.len(), 1);
    let cached: Option<Vec<ArticleSummary>> = h.cache.get_json(ARTICLES_KEY).await.unwrap();
    assert_eq!(cached, Some(listed));
}

#[tokio::test]
async fn test_list_surfaces_store_failure() {
    let h = harness().await;
    h.store.set_available(false);

    let result = h.manager.list().await;

    assert!(matches!(result, Err(ArticleError::Store(_))));
    assert!(!h.cache.contains_key(ARTICLES_KEY).await);
}

// ========================================
// Detail reads
// ========================================

#[tokio::test]
async fn test_detail_of_missing_article_is_not_found() {
    let h = harness().await;

    let result = h.manager.get(9999).await;

    assert!(matches!(result, Err(ArticleError::NotFound(9999))));
    assert!(!h.cache.contains_key(&article_key(9999)).await);
}

#[tokio::test]
async fn test_detail_miss_populates_with_author_and_hit_skips_store() {
    let h = harness().await;
    let created = h
        .manager
        .create(Some(AUTHOR), fields("A", "", "body"))
        .await
        .unwrap();

    let first = h.manager.get(created.id).await.unwrap();
    assert_eq!(first.author.as_ref().unwrap().username, "jared");
    assert!(h.cache.contains_key(&article_key(created.id)).await);
    let queries = h.store.read_query_count();

    let second = h.manager.get(created.id).await.unwrap();
    assert_eq!(second, first);
    assert_eq!(h.store.read_query_count(), queries);
}

#[tokio::test]
async fn test_cached_entities_round_trip_exactly() {
    let h = harness().await;
    let created = h
        .manager
        .create(Some(AUTHOR), fields("A", "desc", "body"))
        .await
        .unwrap();

    let detail = h.manager.get(created.id).await.unwrap();
    let listed = h.manager.list().await.unwrap();

    let cached_detail: Option<Article> = h.cache.get_json(&article_key(created.id)).await.unwrap();
    let cached_list: Option<Vec<ArticleSummary>> = h.cache.get_json(ARTICLES_KEY).await.unwrap();
    assert_eq!(cached_detail, Some(detail));
    assert_eq!(cached_list, Some(listed));
}

#[tokio::test]
async fn test_cold_detail_read_never_returns_soft_deleted_article() {
    let h = harness().await;
    let created = h
        .manager
        .create(Some(AUTHOR), fields("A", "", "body"))
        .await
        .unwrap();
    h.store.soft_delete(created.id).await.unwrap();

    let result = h.manager.get(created.id).await;

    assert!(matches!(result, Err(ArticleError::NotFound(_))));
}

// ========================================
// Writes
// ========================================

#[tokio::test]
async fn test_create_requires_identity() {
    let h = harness().await;

    let result = h.manager.create(None, fields("A", "", "body")).await;

    assert!(matches!(result, Err(ArticleError::Unauthenticated)));
    assert!(h.store.list_active().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_and_update_store_fields_unconditionally() {
    let h = harness().await;

    let created = h
        .manager
        .create(Some(AUTHOR), fields("", "", "body"))
        .await
        .unwrap();
    assert_eq!(created.title, "");

    h.manager
        .update(created.id, fields("A", "", "x"))
        .await
        .unwrap();
    let cleared = h
        .manager
        .update(created.id, fields("", "", "y"))
        .await
        .unwrap();

    assert_eq!(cleared.title, "");
    assert_eq!(cleared.content, "y");
    let stored = h.manager.get(created.id).await.unwrap();
    assert_eq!(stored.title, "");
    assert_eq!(stored.content, "y");
}

#[tokio::test]
async fn test_create_drops_list_entry_and_next_list_sees_article() {
    let h = harness().await;
    assert!(h.manager.list().await.unwrap().is_empty());
    assert!(h.cache.contains_key(ARTICLES_KEY).await);

    let created = h
        .manager
        .create(Some(AUTHOR), fields("B", "", "body"))
        .await
        .unwrap();

    assert!(!h.cache.contains_key(ARTICLES_KEY).await);
    assert!(!h.cache.contains_key(&article_key(created.id)).await);
    let listed = h.manager.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert!(!created.is_deleted());
    assert_eq!(created.author_id, AUTHOR);
}

#[tokio::test]
async fn test_update_drops_both_entries_and_keeps_identity_fields() {
    let h = harness().await;
    let created = h
        .manager
        .create(Some(AUTHOR), fields("Old", "", "old body"))
        .await
        .unwrap();
    let before = h.manager.get(created.id).await.unwrap();
    h.manager.list().await.unwrap();

    let updated = h
        .manager
        .update(created.id, fields("New", "new desc", "new body"))
        .await
        .unwrap();

    assert!(!h.cache.contains_key(ARTICLES_KEY).await);
    assert!(!h.cache.contains_key(&article_key(created.id)).await);
    assert_eq!(updated.title, "New");

    let after = h.manager.get(created.id).await.unwrap();
    assert_eq!(after.title, "New");
    assert_eq!(after.description, "new desc");
    assert_eq!(after.content, "new body");
    assert_eq!(after.id, before.id);
    assert_eq!(after.author_id, before.author_id);
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(after.updated_at, before.updated_at);

    let listed = h.manager.list().await.unwrap();
    assert_eq!(listed[0].description, "new desc");
}

#[tokio::test]
async fn test_update_of_missing_article_is_not_found() {
    let h = harness().await;

    let result = h.manager.update(42, fields("New", "", "body")).await;

    assert!(matches!(result, Err(ArticleError::NotFound(42))));
}

#[tokio::test]
async fn test_delete_hides_article_from_list_but_detail_entry_stays_stale() {
    let h = harness().await;
    let created = h
        .manager
        .create(Some(AUTHOR), fields("A", "", "body"))
        .await
        .unwrap();
    let cached = h.manager.get(created.id).await.unwrap();
    h.manager.list().await.unwrap();

    let pending = h.manager.delete(created.id).await.unwrap();
    pending.await.unwrap();

    assert!(!h.cache.contains_key(ARTICLES_KEY).await);
    assert!(h.manager.list().await.unwrap().is_empty());

    // The per-article entry survives the delete and is served until it expires
    assert!(h.cache.contains_key(&article_key(created.id)).await);
    let stale = h.manager.get(created.id).await.unwrap();
    assert_eq!(stale, cached);
    assert!(!stale.is_deleted());

    let retained = h.store.find_with_deleted(created.id).await.unwrap().unwrap();
    assert!(retained.is_deleted());
}

#[tokio::test(start_paused = true)]
async fn test_stale_detail_after_delete_ends_with_ttl() {
    let h = harness().await;
    let created = h
        .manager
        .create(Some(AUTHOR), fields("A", "", "body"))
        .await
        .unwrap();
    h.manager.get(created.id).await.unwrap();
    h.manager.delete(created.id).await.unwrap().await.unwrap();

    tokio::time::advance(ARTICLE_CACHE_TTL - Duration::from_secs(1)).await;
    assert!(h.manager.get(created.id).await.is_ok());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(matches!(
        h.manager.get(created.id).await,
        Err(ArticleError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_with_detail_policy_drops_article_entry() {
    let h = harness_with(
        MemoryArticleStore::new(),
        InvalidationPolicy {
            detail_on_delete: true,
        },
    )
    .await;
    let created = h
        .manager
        .create(Some(AUTHOR), fields("A", "", "body"))
        .await
        .unwrap();
    h.manager.get(created.id).await.unwrap();

    h.manager.delete(created.id).await.unwrap().await.unwrap();

    assert!(!h.cache.contains_key(&article_key(created.id)).await);
    assert!(matches!(
        h.manager.get(created.id).await,
        Err(ArticleError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_delete_of_missing_or_deleted_article_is_not_found() {
    let h = harness().await;
    assert!(matches!(
        h.manager.delete(5).await,
        Err(ArticleError::NotFound(5))
    ));

    let created = h
        .manager
        .create(Some(AUTHOR), fields("A", "", "body"))
        .await
        .unwrap();
    h.manager.delete(created.id).await.unwrap().await.unwrap();

    assert!(matches!(
        h.manager.delete(created.id).await,
        Err(ArticleError::NotFound(_))
    ));
}

// ========================================
// Cache failures never reach the caller
// ========================================

#[tokio::test]
async fn test_unreachable_cache_degrades_to_store_only() {
    let store = Arc::new(MemoryArticleStore::new());
    let manager = ArticleManager::new(store.clone(), Arc::new(UnreachableCache));

    let created = manager
        .create(Some(AUTHOR), fields("A", "", "body"))
        .await
        .unwrap();
    assert_eq!(manager.list().await.unwrap().len(), 1);
    assert_eq!(manager.get(created.id).await.unwrap().title, "A");

    let updated = manager
        .update(created.id, fields("B", "", "body"))
        .await
        .unwrap();
    assert_eq!(updated.title, "B");

    manager.delete(created.id).await.unwrap().await.unwrap();
    assert!(manager.list().await.unwrap().is_empty());
    assert!(matches!(
        manager.get(created.id).await,
        Err(ArticleError::NotFound(_))
    ));
}

// ========================================
// Concurrency and expiry
// ========================================

#[tokio::test(start_paused = true)]
async fn test_concurrent_cold_reads_each_hit_the_store() {
    let h = harness_with(
        MemoryArticleStore::new().with_latency(Duration::from_millis(50)),
        InvalidationPolicy::default(),
    )
    .await;
    h.manager
        .create(Some(AUTHOR), fields("A", "", "body"))
        .await
        .unwrap();

    let (first, second) = tokio::join!(h.manager.list(), h.manager.list());

    assert_eq!(first.unwrap(), second.unwrap());
    assert_eq!(h.store.read_query_count(), 2);
    assert_eq!(h.cache.write_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_list_entry_expires_after_ttl() {
    let h = harness().await;
    h.manager
        .create(Some(AUTHOR), fields("A", "", "body"))
        .await
        .unwrap();
    h.manager.list().await.unwrap();

    tokio::time::advance(ARTICLE_CACHE_TTL - Duration::from_secs(1)).await;
    h.manager.list().await.unwrap();
    assert_eq!(h.store.read_query_count(), 1);

    tokio::time::advance(Duration::from_secs(1)).await;
    h.manager.list().await.unwrap();
    assert_eq!(h.store.read_query_count(), 2);
}
