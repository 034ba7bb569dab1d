//! Domain types shared by every News Explorer crate.
//!
//! These are plain data records: the storage layer persists them, the search
//! and auth services produce them, and the orchestrator moves them between the
//! two. Nothing here performs I/O.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single search result, identified by its URL.
///
/// Serialized with camelCase keys so the persisted saved-articles list keeps
/// the same shape the web client used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    /// Canonical article URL; the identity used for dedup and deletion.
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Publisher display name.
    #[serde(default)]
    pub source: String,
    /// Publication timestamp as returned by the news API (RFC 3339).
    #[serde(default)]
    pub published_at: String,
    #[serde(default, alias = "urlToImage", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Keyword of the search that produced this article.
    #[serde(default)]
    pub keyword: String,
}

impl ArticleSummary {
    /// Human readable publication date, e.g. `January 5, 2024`.
    ///
    /// Falls back to the raw value when it is not a recognizable date.
    pub fn display_date(&self) -> String {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(&self.published_at) {
            return parsed.format("%B %-d, %Y").to_string();
        }
        if let Ok(parsed) = NaiveDate::parse_from_str(&self.published_at, "%Y-%m-%d") {
            return parsed.format("%B %-d, %Y").to_string();
        }
        self.published_at.clone()
    }
}

/// Account record returned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl UserRecord {
    /// Name shown in the header; the email when no name was given.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
