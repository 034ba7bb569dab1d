//! Search error types.

use thiserror::Error;

/// Error type for news searches.
///
/// An empty result set is not an error.
#[derive(Error, Debug)]
pub enum SearchError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The news API answered with an error status or error body
    #[error("News API error ({code}): {message}")]
    Api {
        code: String,
        message: String,
        /// HTTP status, when the failure came with one
        status: Option<u16>,
    },

    /// No API key configured
    #[error("No news API key configured (set NEWS_API_KEY or news_api_key in config.json)")]
    MissingApiKey,

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns true if this error is transient and the search can be retried.
    pub fn is_transient(&self) -> bool {
        match self {
            SearchError::Http(e) => {
                if e.is_connect() || e.is_timeout() {
                    return true;
                }
                if let Some(status) = e.status() {
                    return status.is_server_error();
                }
                false
            }
            SearchError::Api { code, status, .. } => {
                status.is_some_and(|s| s >= 500 || s == 429)
                    || matches!(code.as_str(), "rateLimited" | "unexpectedError")
            }
            _ => false,
        }
    }
}

/// Result type alias using SearchError.
pub type SearchOutcome<T> = Result<T, SearchError>;
