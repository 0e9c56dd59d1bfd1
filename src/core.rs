//! Core BlogHaus functionality
//!
//! This module contains the BlogHaus struct, which owns the connections to
//! Postgres and Redis and wires them into the article manager.

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;

use crate::articles::{ArticleManager, InvalidationPolicy};
use crate::errors::BlogHausError;
use cache_system::{CacheStore, RedisCache};
use config::{AppConfig, DatabaseConfig};
use store_object::{ArticleStore, PgArticleStore};

/// Owns the store connections and the article manager built on them
pub struct BlogHaus {
    pool: PgPool,
    cache: RedisCache,
    articles: ArticleManager,
}

impl BlogHaus {
    /// Connect to Postgres and Redis. Fails if either is unreachable.
    pub async fn new(config: &AppConfig) -> Result<Self, BlogHausError> {
        let database = &config.database;

        let mut pool_options = PgPoolOptions::new()
            .max_connections(database.max_connections)
            .min_connections(database.min_connections)
            .acquire_timeout(Duration::from_secs(database.connection_timeout_seconds))
            .idle_timeout(Duration::from_secs(database.idle_timeout_seconds));

        // Set max lifetime if specified
        if database.max_lifetime_seconds > 0 {
            pool_options =
                pool_options.max_lifetime(Duration::from_secs(database.max_lifetime_seconds));
        }

        let pool = pool_options
            .connect_with(connect_options(database))
            .await?;
        tracing::info!(
            host = %database.host,
            database = %database.database,
            "connected to postgres"
        );

        let cache = RedisCache::new(config.cache.clone())?;
        cache.ping().await?;
        tracing::info!("redis reachable");

        let store: Arc<dyn ArticleStore> = Arc::new(PgArticleStore::new(pool.clone()));
        let cache_store: Arc<dyn CacheStore> = Arc::new(cache.clone());
        let articles = ArticleManager::new(store, cache_store).with_policy(InvalidationPolicy {
            detail_on_delete: config.cache.invalidate_detail_on_delete,
        });

        Ok(Self {
            pool,
            cache,
            articles,
        })
    }

    /// Get database pool reference
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis cache
    pub fn cache(&self) -> &RedisCache {
        &self.cache
    }

    /// A handle on the article manager; clones share the same connections
    pub fn articles(&self) -> ArticleManager {
        self.articles.clone()
    }

    /// Check database and cache connectivity
    pub async fn health_check(&self) -> Result<(), BlogHausError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        self.cache.ping().await?;
        Ok(())
    }
}

/// Structured connect options; credentials are passed as-is, never spliced into a URL
fn connect_options(database: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&database.host)
        .port(database.port)
        .username(&database.username)
        .password(&database.password)
        .database(&database.database)
}
