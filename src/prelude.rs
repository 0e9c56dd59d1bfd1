//! Convenience re-exports for common BlogHaus usage
//!
//! # Example
//!
//! ```rust
//! use bloghaus::prelude::*;
//! ```

// Core BlogHaus components
pub use crate::articles::{
    ArticleError, ArticleManager, ArticleSummary, InvalidationPolicy, PendingInvalidation,
};
pub use crate::core::BlogHaus;
pub use crate::errors::BlogHausError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, DatabaseConfig, LogFormat, LoggingConfig, ServerConfig};

// Re-export store and cache layers
pub use cache_system::prelude::*;
pub use store_object::prelude::*;

// Common external dependencies
pub use anyhow;
pub use sqlx;
pub use tokio;
