//! Cache key derivation and entry lifetime

use std::time::Duration;

/// Key of the cached list of every live article
pub const ARTICLES_KEY: &str = "articles";

/// Lifetime of every article cache entry
pub const ARTICLE_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Key of a single cached article
pub fn article_key(id: i64) -> String {
    format!("{}:{}", ARTICLES_KEY, id)
}
