//! Article model types
//!
//! `Article` is the full record as the store returns it and the shape cached
//! under the per-article key. `ArticleListing` is the narrow row the list
//! query selects; it still carries `content` so a description can be derived.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article author as attached to detail reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

/// Full article record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    /// Explicit description; empty when the author did not provide one
    #[serde(default)]
    pub description: String,
    pub content: String,
    pub author_id: i64,
    /// Attached on detail reads when the author row is live
    #[serde(default)]
    pub author: Option<Author>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Article {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Insert payload; the store assigns id and timestamps and clears `deleted_at`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub content: String,
    pub author_id: i64,
}

/// The mutable field set of an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleChanges {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub content: String,
}

impl ArticleChanges {
    /// Overwrite title, description and content; every other field is left untouched
    pub fn apply_to(&self, article: &mut Article) {
        article.title.clone_from(&self.title);
        article.description.clone_from(&self.description);
        article.content.clone_from(&self.content);
    }
}

/// Projection selected by the list query
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ArticleListing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
}
