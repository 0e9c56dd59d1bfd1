//! # BlogHaus
//!
//! A blog article service: Postgres for durable storage, Redis in front of it
//! as a cache-aside accelerator, and an axum HTTP surface.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bloghaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!
//!     let bloghaus = BlogHaus::new(&config).await?;
//!     bloghaus.auto_migrate(false).await?;
//!
//!     let articles = bloghaus.articles();
//!     let created = articles
//!         .create(
//!             Some(1),
//!             ArticleChanges {
//!                 title: "Hello".to_string(),
//!                 description: String::new(),
//!                 content: "First post".to_string(),
//!             },
//!         )
//!         .await?;
//!
//!     // Served from Postgres, then from Redis for the next 24 hours
//!     let article = articles.get(created.id).await?;
//!     println!("{}", article.title);
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod articles;
pub mod core;
pub mod errors;
pub mod http;
pub mod migration;
pub mod prelude;
pub mod telemetry;

// Re-export the main public types for convenience
pub use self::core::BlogHaus;
pub use articles::{ArticleError, ArticleManager, ArticleSummary, InvalidationPolicy};
pub use errors::BlogHausError;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, DatabaseConfig, LogFormat, LoggingConfig, ServerConfig};

// Re-export internal crates used in the public API
pub use cache_system;
pub use store_object;

// Re-export external dependencies used in public API
pub use async_trait;
pub use sqlx;
