//! Errors surfaced by article operations
//!
//! Cache failures never appear here: the manager logs and absorbs them.

use store_object::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error("{0}")]
    Validation(String),

    #[error("Article not found: {0}")]
    NotFound(i64),

    #[error("Invalid token: User not found")]
    Unauthenticated,

    #[error("Article store error: {0}")]
    Store(#[from] StoreError),
}
