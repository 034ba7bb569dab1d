//! Search results, pagination, and request identity.

use crate::ValidationError;
use explorer_search::{SearchOutcome, SearchResponse};
use explorer_types::ArticleSummary;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Articles shown after a fresh search.
pub const INITIAL_PAGE_SIZE: usize = 3;
/// Articles added by each "show more".
pub const SHOW_MORE_INCREMENT: usize = 3;

pub const NOTHING_FOUND: &str = "Nothing found";
pub const SEARCH_FAILED: &str =
    "We couldn't complete your search. Please check your connection and try again.";

/// Why the result area shows a message instead of articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCondition {
    /// Empty keyword, no request was made.
    Validation,
    /// The search succeeded with zero articles.
    NoResults,
    /// The search service failed.
    Failed,
}

impl SearchCondition {
    pub fn message(&self) -> &'static str {
        match self {
            SearchCondition::Validation => "Please enter a keyword",
            SearchCondition::NoResults => NOTHING_FOUND,
            SearchCondition::Failed => SEARCH_FAILED,
        }
    }
}

/// Identity of one outbound search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub id: u64,
    pub keyword: String,
}

/// Search results and pagination.
///
/// `displayed_count <= articles.len()` holds after every method.
#[derive(Debug, Default)]
pub struct SearchState {
    keyword: String,
    articles: Vec<ArticleSummary>,
    displayed_count: usize,
    is_loading: bool,
    has_searched: bool,
    condition: Option<SearchCondition>,
    last_ticket_id: u64,
    in_flight: Option<u64>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn articles(&self) -> &[ArticleSummary] {
        &self.articles
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed_count
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn condition(&self) -> Option<SearchCondition> {
        self.condition
    }

    /// The first `displayed_count` articles.
    pub fn visible_articles(&self) -> &[ArticleSummary] {
        &self.articles[..self.displayed_count]
    }

    pub fn can_show_more(&self) -> bool {
        self.displayed_count < self.articles.len()
    }

    /// Validate `raw_keyword` and start a new request.
    ///
    /// Any previously issued ticket becomes stale.
    pub fn begin(&mut self, raw_keyword: &str) -> Result<SearchTicket, ValidationError> {
        let keyword = raw_keyword.trim();
        if keyword.is_empty() {
            self.condition = Some(SearchCondition::Validation);
            debug!("Rejected empty search keyword");
            return Err(ValidationError::EmptyKeyword);
        }

        self.last_ticket_id += 1;
        self.in_flight = Some(self.last_ticket_id);
        self.condition = None;
        self.is_loading = true;
        self.has_searched = true;
        self.keyword = keyword.to_string();
        self.displayed_count = INITIAL_PAGE_SIZE.min(self.articles.len());

        debug!(ticket = self.last_ticket_id, keyword = %keyword, "Search started");
        Ok(SearchTicket {
            id: self.last_ticket_id,
            keyword: keyword.to_string(),
        })
    }

    /// Apply the completion of `ticket`. Returns false, touching nothing, when
    /// the ticket is no longer the latest one.
    pub fn apply(&mut self, ticket: &SearchTicket, outcome: SearchOutcome<SearchResponse>) -> bool {
        if self.in_flight != Some(ticket.id) {
            debug!(
                ticket = ticket.id,
                latest = self.last_ticket_id,
                "Discarding stale search result"
            );
            return false;
        }
        self.in_flight = None;
        self.is_loading = false;

        match outcome {
            Ok(response) if !response.articles.is_empty() => {
                info!(
                    keyword = %ticket.keyword,
                    count = response.articles.len(),
                    "Search results received"
                );
                self.articles = response.articles;
                self.condition = None;
                self.displayed_count = INITIAL_PAGE_SIZE.min(self.articles.len());
            }
            Ok(_) => {
                info!(keyword = %ticket.keyword, "Search returned no articles");
                self.articles.clear();
                self.displayed_count = 0;
                self.condition = Some(SearchCondition::NoResults);
            }
            Err(e) => {
                warn!(
                    keyword = %ticket.keyword,
                    error = %e,
                    transient = e.is_transient(),
                    "Search failed"
                );
                self.articles.clear();
                self.displayed_count = 0;
                self.condition = Some(SearchCondition::Failed);
            }
        }
        true
    }

    pub fn show_more(&mut self) {
        self.displayed_count = (self.displayed_count + SHOW_MORE_INCREMENT).min(self.articles.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_search::SearchError;

    fn articles(n: usize) -> Vec<ArticleSummary> {
        (0..n)
            .map(|i| ArticleSummary {
                url: format!("https://example.com/{}", i),
                title: format!("Article {}", i),
                description: String::new(),
                source: "Example".to_string(),
                published_at: "2024-01-05".to_string(),
                image_url: None,
                keyword: "k".to_string(),
            })
            .collect()
    }

    fn ok(n: usize) -> SearchOutcome<SearchResponse> {
        Ok(SearchResponse {
            articles: articles(n),
        })
    }

    #[test]
    fn test_begin_trims_and_issues_increasing_tickets() {
        let mut state = SearchState::new();

        let first = state.begin("  bitcoin ").unwrap();
        let second = state.begin("ethereum").unwrap();

        assert_eq!(first.keyword, "bitcoin");
        assert!(second.id > first.id);
        assert_eq!(state.keyword(), "ethereum");
        assert!(state.is_loading());
        assert!(state.has_searched());
    }

    #[test]
    fn test_blank_keyword_sets_validation() {
        let mut state = SearchState::new();

        assert_eq!(state.begin("   "), Err(ValidationError::EmptyKeyword));
        assert_eq!(state.condition(), Some(SearchCondition::Validation));
        assert!(!state.has_searched());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_result_shorter_than_page() {
        let mut state = SearchState::new();
        let ticket = state.begin("k").unwrap();

        assert!(state.apply(&ticket, ok(2)));

        assert_eq!(state.displayed_count(), 2);
        assert!(!state.can_show_more());
    }

    #[test]
    fn test_failure_is_distinct_from_no_results() {
        let mut state = SearchState::new();

        let ticket = state.begin("k").unwrap();
        state.apply(&ticket, ok(0));
        assert_eq!(state.condition(), Some(SearchCondition::NoResults));

        let ticket = state.begin("k").unwrap();
        state.apply(&ticket, Err(SearchError::MissingApiKey));
        assert_eq!(state.condition(), Some(SearchCondition::Failed));
        assert_eq!(state.condition().map(|c| c.message()), Some(SEARCH_FAILED));
    }

    #[test]
    fn test_new_search_clamps_to_previous_results() {
        let mut state = SearchState::new();
        let ticket = state.begin("k").unwrap();
        state.apply(&ticket, ok(2));

        state.begin("other").unwrap();

        assert_eq!(state.displayed_count(), 2);
        assert_eq!(state.visible_articles().len(), 2);
    }

    #[test]
    fn test_ticket_applies_once() {
        let mut state = SearchState::new();
        let ticket = state.begin("k").unwrap();

        assert!(state.apply(&ticket, ok(4)));
        assert!(!state.apply(&ticket, ok(1)));
        assert_eq!(state.articles().len(), 4);
    }
}
