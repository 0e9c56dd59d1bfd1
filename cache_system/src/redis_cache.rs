//! Redis cache store implementation
//!
//! This module provides the RedisCache struct for Redis
//! operations and connection management.

use crate::errors::CacheError;
use crate::store::CacheStore;
use async_trait::async_trait;
use config::CacheConfig;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Redis-backed [`CacheStore`]
///
/// Commands share one [`ConnectionManager`], which re-establishes the
/// connection after Redis drops it. The command that observes the drop
/// fails; later commands run on the new connection.
#[derive(Clone)]
pub struct RedisCache {
    client: Arc<Client>,
    config: Arc<CacheConfig>,
    connection: Arc<OnceCell<ConnectionManager>>,
}

impl Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let connection_status = if self.connection.initialized() {
            "connected"
        } else {
            "no_connection"
        };

        f.debug_struct("RedisCache")
            .field("config", &self.config)
            .field("connected", &connection_status)
            .finish()
    }
}

impl RedisCache {
    /// Create a new Redis cache. No connection is made until first use.
    pub fn new(config: CacheConfig) -> Result<Self, CacheError> {
        let client = Client::open(config.redis_url.as_str())?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            connection: Arc::new(OnceCell::new()),
        })
    }

    /// Get the shared connection, opening it on first use.
    /// A failed first connect leaves the cell empty so the next call retries.
    async fn get_connection(&self) -> Result<ConnectionManager, CacheError> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let connect_timeout = self.config.connection_timeout();
                let manager =
                    tokio::time::timeout(connect_timeout, self.client.get_connection_manager())
                        .await
                        .map_err(|_| CacheError::Timeout(self.config.connection_timeout_ms))??;
                tracing::debug!("opened redis connection manager");
                Ok::<_, CacheError>(manager)
            })
            .await?;

        Ok(manager.clone())
    }

    /// Run a single command under the configured per-operation deadline
    async fn with_deadline<T, F>(&self, command: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, redis::RedisError>>,
    {
        let deadline: Duration = self.config.timeout();
        match tokio::time::timeout(deadline, command).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(CacheError::Timeout(self.config.timeout_ms)),
        }
    }

    /// Ping Redis to check connectivity
    pub async fn ping(&self) -> Result<String, CacheError> {
        let mut conn = self.get_connection().await?;
        self.with_deadline(redis::cmd("PING").query_async::<String>(&mut conn))
            .await
    }

    /// Remaining TTL in seconds as reported by Redis (-2 absent, -1 no expiry)
    pub async fn ttl(&self, key: &str) -> Result<i64, CacheError> {
        let mut conn = self.get_connection().await?;
        self.with_deadline(conn.ttl::<_, i64>(key)).await
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.get_connection().await?;
        self.with_deadline(conn.get::<_, Option<String>>(key)).await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let seconds = ttl.as_secs().max(1);
        let mut conn = self.get_connection().await?;
        self.with_deadline(conn.set_ex::<_, _, ()>(key, value, seconds))
            .await
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.get_connection().await?;
        let deleted: i32 = self.with_deadline(conn.del::<_, i32>(key)).await?;
        Ok(deleted > 0)
    }
}
