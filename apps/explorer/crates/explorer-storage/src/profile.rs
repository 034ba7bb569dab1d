//! Typed profile API over a key-value backend.

use crate::{KeyValueStorage, PersistentStore, StorageError, StorageKeys, StorageResult};
use async_trait::async_trait;
use explorer_types::ArticleSummary;
use std::sync::Arc;
use tracing::debug;

/// Auth token and saved articles for one profile.
#[derive(Clone)]
pub struct ProfileStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl ProfileStore {
    /// Create a profile store over the given backend.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// The underlying backend, shared with collaborators that keep their own
    /// keys in the same profile (the mock auth service).
    pub fn backend(&self) -> Arc<dyn KeyValueStorage> {
        Arc::clone(&self.storage)
    }

    // ==========================================
    // Auth token
    // ==========================================

    pub fn token(&self) -> StorageResult<Option<String>> {
        self.storage.get(StorageKeys::TOKEN)
    }

    pub fn store_token(&self, token: &str) -> StorageResult<()> {
        self.storage.set(StorageKeys::TOKEN, token)
    }

    /// Returns whether a token was present.
    pub fn clear_token(&self) -> StorageResult<bool> {
        self.storage.delete(StorageKeys::TOKEN)
    }

    // ==========================================
    // Saved articles
    // ==========================================

    pub fn saved_articles(&self) -> StorageResult<Vec<ArticleSummary>> {
        match self.storage.get(StorageKeys::SAVED_ARTICLES)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| StorageError::Encoding(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn write_saved_articles(&self, articles: &[ArticleSummary]) -> StorageResult<()> {
        let json =
            serde_json::to_string(articles).map_err(|e| StorageError::Encoding(e.to_string()))?;
        self.storage.set(StorageKeys::SAVED_ARTICLES, &json)
    }

    /// Append `article` unless its URL is already saved. Existing entries keep
    /// their position.
    pub fn save_article(&self, article: &ArticleSummary) -> StorageResult<Vec<ArticleSummary>> {
        let mut articles = self.saved_articles()?;
        if articles.iter().any(|a| a.url == article.url) {
            debug!(url = %article.url, "Article already saved");
            return Ok(articles);
        }
        articles.push(article.clone());
        self.write_saved_articles(&articles)?;
        debug!(url = %article.url, total = articles.len(), "Article saved");
        Ok(articles)
    }

    /// Remove every entry with `url`.
    pub fn unsave_article(&self, url: &str) -> StorageResult<Vec<ArticleSummary>> {
        let mut articles = self.saved_articles()?;
        let original_len = articles.len();
        articles.retain(|a| a.url != url);
        if articles.len() == original_len {
            return Ok(articles);
        }
        self.write_saved_articles(&articles)?;
        debug!(url = %url, total = articles.len(), "Article removed");
        Ok(articles)
    }
}

#[async_trait]
impl PersistentStore for ProfileStore {
    async fn get_token(&self) -> StorageResult<Option<String>> {
        self.token()
    }

    async fn set_token(&self, token: &str) -> StorageResult<()> {
        self.store_token(token)
    }

    async fn remove_token(&self) -> StorageResult<()> {
        self.clear_token().map(|_| ())
    }

    async fn get_saved_articles(&self) -> StorageResult<Vec<ArticleSummary>> {
        self.saved_articles()
    }

    async fn add_saved_article(
        &self,
        article: &ArticleSummary,
    ) -> StorageResult<Vec<ArticleSummary>> {
        self.save_article(article)
    }

    async fn remove_saved_article(&self, url: &str) -> StorageResult<Vec<ArticleSummary>> {
        self.unsave_article(url)
    }
}
