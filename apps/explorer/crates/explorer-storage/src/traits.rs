//! Storage trait definitions.

use crate::StorageResult;
use async_trait::async_trait;
use explorer_types::ArticleSummary;

/// Trait for key-value storage backends.
pub trait KeyValueStorage: Send + Sync {
    /// Store a value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Retrieve a value
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Delete a value. Returns whether the key existed.
    fn delete(&self, key: &str) -> StorageResult<bool>;

    /// Check if a key exists
    fn has(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Durable store the orchestrator reads and writes through.
///
/// Every operation is awaitable so a remote implementation can replace the
/// local one. None of them fail for "not found": absence is `None` or an
/// empty list.
#[async_trait]
pub trait PersistentStore: Send + Sync {
    /// Current auth token, if any.
    async fn get_token(&self) -> StorageResult<Option<String>>;

    /// Replace the auth token.
    async fn set_token(&self, token: &str) -> StorageResult<()>;

    /// Forget the auth token. Succeeds when there was none.
    async fn remove_token(&self) -> StorageResult<()>;

    /// Saved articles in insertion order.
    async fn get_saved_articles(&self) -> StorageResult<Vec<ArticleSummary>>;

    /// Add an article (no-op when its URL is already saved) and return the
    /// resulting list.
    async fn add_saved_article(&self, article: &ArticleSummary)
        -> StorageResult<Vec<ArticleSummary>>;

    /// Remove the article with `url` (no-op when absent) and return the
    /// resulting list.
    async fn remove_saved_article(&self, url: &str) -> StorageResult<Vec<ArticleSummary>>;
}
