//! Cache system for article caching
//!
//! This crate provides the key-value cache contract used by the article
//! cache-aside layer, a Redis implementation and an in-process implementation.

pub mod errors;
pub mod memory;
pub mod prelude;
pub mod redis_cache;
pub mod store;

// Re-export centralized config
pub use config::CacheConfig;

pub use errors::CacheError;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;
pub use store::{CacheStore, CacheStoreExt};
