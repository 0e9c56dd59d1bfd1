pub mod article_store;
pub mod core;

pub use self::core::PgArticleStore;
