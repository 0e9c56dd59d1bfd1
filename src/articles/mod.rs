//! Article cache-aside layer
//!
//! [`ArticleManager`] is the only component that talks to both the article
//! store and the cache. Reads consult the cache first and populate it on a
//! miss; writes go to the store first and then drop the affected entries.

pub mod errors;
pub mod id;
pub mod keys;
pub mod manager;
pub mod summary;

pub use errors::ArticleError;
pub use id::{parse_article_id, parse_article_id_lossy};
pub use manager::{ArticleManager, InvalidationPolicy, PendingInvalidation};
pub use summary::{derive_description, ArticleSummary};
