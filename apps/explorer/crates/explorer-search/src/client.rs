//! NewsAPI `/v2/everything` client.

use crate::{SearchError, SearchOutcome, SearchResponse, SearchService};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use explorer_config_and_utils::Config;
use explorer_types::ArticleSummary;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Marker NewsAPI puts in every field of an article that was taken down.
const REMOVED_MARKER: &str = "[Removed]";

/// Connection settings for [`NewsApiClient`].
#[derive(Debug, Clone)]
pub struct NewsApiSettings {
    pub endpoint: Url,
    pub api_key: Option<String>,
    pub window_days: u32,
    pub page_size: u32,
    pub timeout: Duration,
}

impl NewsApiSettings {
    pub fn from_config(config: &Config) -> SearchOutcome<Self> {
        let endpoint = config
            .news_api_url()
            .map_err(|e| SearchError::Config(e.to_string()))?;
        Ok(Self {
            endpoint,
            api_key: config.news_api_key().map(str::to_string),
            window_days: config.search_window_days,
            page_size: config.search_page_size,
            timeout: Duration::from_secs(config.request_timeout_secs),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponse {
    status: String,
    #[serde(default)]
    articles: Vec<RawArticle>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    url_to_image: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    #[serde(default)]
    name: Option<String>,
}

impl RawArticle {
    /// Map to the domain type. Entries without a URL or taken down upstream
    /// are dropped.
    fn into_summary(self, keyword: &str) -> Option<ArticleSummary> {
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        let title = self.title.unwrap_or_default();
        if url == "https://removed.com" || title == REMOVED_MARKER {
            return None;
        }
        Some(ArticleSummary {
            url,
            title,
            description: self.description.unwrap_or_default(),
            source: self.source.and_then(|s| s.name).unwrap_or_default(),
            published_at: self.published_at.unwrap_or_default(),
            image_url: self.url_to_image.filter(|u| !u.trim().is_empty()),
            keyword: keyword.to_string(),
        })
    }
}

/// NewsAPI client.
#[derive(Clone)]
pub struct NewsApiClient {
    http_client: reqwest::Client,
    settings: NewsApiSettings,
}

impl NewsApiClient {
    pub fn new(settings: NewsApiSettings) -> SearchOutcome<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("news-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http_client,
            settings,
        })
    }

    pub fn from_config(config: &Config) -> SearchOutcome<Self> {
        Self::new(NewsApiSettings::from_config(config)?)
    }

    /// Query parameters for a search issued on `today`.
    fn query(&self, keyword: &str, api_key: &str, today: NaiveDate) -> Vec<(&'static str, String)> {
        let from = today - ChronoDuration::days(i64::from(self.settings.window_days));
        vec![
            ("q", keyword.to_string()),
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", today.format("%Y-%m-%d").to_string()),
            ("pageSize", self.settings.page_size.to_string()),
            ("apiKey", api_key.to_string()),
        ]
    }

    async fn fetch(&self, keyword: &str, today: NaiveDate) -> SearchOutcome<SearchResponse> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingApiKey)?;

        debug!(keyword = %keyword, endpoint = %self.settings.endpoint, "Searching news");

        let response = self
            .http_client
            .get(self.settings.endpoint.clone())
            .query(&self.query(keyword, api_key, today))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        let raw: RawResponse = match serde_json::from_str(&body) {
            Ok(raw) => raw,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => {
                warn!(status = %status, body_len = body.len(), "News API error without JSON body");
                return Err(SearchError::Api {
                    code: format!("http_{}", status.as_u16()),
                    message: status.canonical_reason().unwrap_or("request failed").to_string(),
                    status: Some(status.as_u16()),
                });
            }
        };

        if !status.is_success() || raw.status != "ok" {
            let err = SearchError::Api {
                code: raw
                    .code
                    .unwrap_or_else(|| format!("http_{}", status.as_u16())),
                message: raw.message.unwrap_or_else(|| raw.status.clone()),
                status: Some(status.as_u16()),
            };
            warn!(status = %status, error = %err, "News API rejected search");
            return Err(err);
        }

        let received = raw.articles.len();
        let articles: Vec<ArticleSummary> = raw
            .articles
            .into_iter()
            .filter_map(|a| a.into_summary(keyword))
            .collect();

        info!(
            keyword = %keyword,
            received,
            kept = articles.len(),
            "Search completed"
        );
        Ok(SearchResponse { articles })
    }
}

#[async_trait]
impl SearchService for NewsApiClient {
    async fn search_news(&self, keyword: &str) -> SearchOutcome<SearchResponse> {
        self.fetch(keyword, Utc::now().date_naive()).await
    }
}
