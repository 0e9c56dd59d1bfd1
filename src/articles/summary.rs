//! List-view projection of an article

use serde::{Deserialize, Serialize};
use store_object::ArticleListing;

/// Longest synthesized description, in chars, before the marker
pub const DESCRIPTION_MAX_CHARS: usize = 120;

/// Appended to a synthesized description that was cut short
pub const TRUNCATION_MARKER: &str = "…";

/// What the article list exposes: never the content itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub id: i64,
    pub title: String,
    pub description: String,
}

impl From<ArticleListing> for ArticleSummary {
    fn from(listing: ArticleListing) -> Self {
        let description = derive_description(&listing.description, &listing.content);
        Self {
            id: listing.id,
            title: listing.title,
            description,
        }
    }
}

/// The explicit description when present, otherwise the head of the content
pub fn derive_description(description: &str, content: &str) -> String {
    if !description.is_empty() {
        return description.to_string();
    }

    match content.char_indices().nth(DESCRIPTION_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &content[..cut], TRUNCATION_MARKER),
        None => content.to_string(),
    }
}
