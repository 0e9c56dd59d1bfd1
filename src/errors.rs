//! Error types for the BlogHaus crate
//!
//! Bootstrap and infrastructure errors. Per-request article errors live in
//! [`crate::articles::ArticleError`].

use cache_system::CacheError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogHausError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}
