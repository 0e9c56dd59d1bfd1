//! Article identifiers as they arrive from callers

use super::errors::ArticleError;

/// Parse an id strictly; anything but a non-negative integer is rejected
pub fn parse_article_id(raw: &str) -> Result<i64, ArticleError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(|id| i64::try_from(id).ok())
        .ok_or_else(|| ArticleError::Validation("Invalid article ID".to_string()))
}

/// Parse an id, falling back to 0 when the text is not a valid id.
/// No article has id 0, so the lookup that follows simply misses.
pub fn parse_article_id_lossy(raw: &str) -> i64 {
    parse_article_id(raw).unwrap_or(0)
}
