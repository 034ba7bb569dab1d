use crate::SearchOutcome;
use async_trait::async_trait;
use explorer_types::ArticleSummary;

/// Articles matching one keyword, each tagged with that keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    pub articles: Vec<ArticleSummary>,
}

/// Keyword search against some news source.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Search for `keyword`. No matches is `Ok` with an empty list.
    async fn search_news(&self, keyword: &str) -> SearchOutcome<SearchResponse>;
}
