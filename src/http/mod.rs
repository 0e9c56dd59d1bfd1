//! HTTP surface for articles
//!
//! Thin axum handlers over [`ArticleManager`]; every cache decision lives in
//! the manager.

pub mod error;
pub mod handlers;
pub mod identity;

use axum::Router;
use axum::routing::get;

use crate::articles::ArticleManager;

pub use error::ApiError;
pub use identity::{Identity, USER_ID_HEADER, forwarded_user};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct ApiState {
    pub articles: ArticleManager,
}

/// Article routes. Identity resolution is left to an outer layer that inserts
/// an [`Identity`] extension, such as [`forwarded_user`].
pub fn router(articles: ArticleManager) -> Router {
    Router::new()
        .route(
            "/articles",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/articles/{id}",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .with_state(ApiState { articles })
}
