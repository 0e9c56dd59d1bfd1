//! Cache store contract
//!
//! Values are opaque JSON text. Implementations must be safe to share
//! between tasks; callers hold them behind `Arc<dyn CacheStore>`.

use crate::errors::CacheError;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::time::Duration;

/// Key-value store with per-entry TTL
#[async_trait]
pub trait CacheStore: Send + Sync + Debug {
    /// Fetch the raw value stored under `key`, `None` on a miss
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, expiring after `ttl`
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove `key`. Returns whether an entry existed; an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;
}

/// Typed JSON helpers layered over any [`CacheStore`]
#[async_trait]
pub trait CacheStoreExt: CacheStore {
    /// Get and deserialize a cached value
    async fn get_json<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned + Send,
    {
        match self.get(key).await? {
            Some(json_str) => {
                let value: T = serde_json::from_str(&json_str)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and store a value with the given TTL
    async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let json_str = serde_json::to_string(value)?;
        self.set(key, &json_str, ttl).await
    }
}

impl<C: CacheStore + ?Sized> CacheStoreExt for C {}
