//! Application configuration.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// NewsAPI "everything" endpoint.
pub const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// How many days back a search reaches.
pub const DEFAULT_SEARCH_WINDOW_DAYS: u32 = 7;

/// Maximum number of articles requested per search.
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 100;

/// Simulated round trip of the mock auth service.
pub const DEFAULT_MOCK_AUTH_LATENCY_MS: u64 = 300;

/// HTTP timeout for news search requests.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// News search endpoint.
    #[serde(default = "default_news_api_url")]
    pub news_api_url: String,
    /// NewsAPI key. Searches fail with a configuration error without one.
    #[serde(default)]
    pub news_api_key: Option<String>,
    /// Search window in days, counted back from today.
    #[serde(default = "default_search_window_days")]
    pub search_window_days: u32,
    /// Page size sent to the news API.
    #[serde(default = "default_search_page_size")]
    pub search_page_size: u32,
    /// Artificial latency of the mock auth service, in milliseconds.
    #[serde(default = "default_mock_auth_latency_ms")]
    pub mock_auth_latency_ms: u64,
    /// Make the mock auth service behave as if the network were down.
    #[serde(default)]
    pub mock_auth_offline: bool,
    /// HTTP request timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_news_api_url() -> String {
    DEFAULT_NEWS_API_URL.to_string()
}

fn default_search_window_days() -> u32 {
    DEFAULT_SEARCH_WINDOW_DAYS
}

fn default_search_page_size() -> u32 {
    DEFAULT_SEARCH_PAGE_SIZE
}

fn default_mock_auth_latency_ms() -> u64 {
    DEFAULT_MOCK_AUTH_LATENCY_MS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            news_api_url: default_news_api_url(),
            news_api_key: None,
            search_window_days: DEFAULT_SEARCH_WINDOW_DAYS,
            search_page_size: DEFAULT_SEARCH_PAGE_SIZE,
            mock_auth_latency_ms: DEFAULT_MOCK_AUTH_LATENCY_MS,
            mock_auth_offline: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Create a Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from the config file (if any), then apply
    /// environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self, paths: &Paths) -> CoreResult<()> {
        paths.ensure_dirs()?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    /// Override configuration from environment variables.
    fn load_from_env(&mut self) {
        if let Some(level) = non_empty_env("NEWS_EXPLORER_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(key) = non_empty_env("NEWS_API_KEY") {
            self.news_api_key = Some(key);
        }
        if let Some(url) = non_empty_env("NEWS_API_URL") {
            self.news_api_url = url;
        }
        if let Some(offline) = non_empty_env("NEWS_EXPLORER_MOCK_AUTH_OFFLINE") {
            self.mock_auth_offline = parse_flag(&offline);
        }
    }

    /// Reject values that would make every search fail in a confusing way.
    pub fn validate(&self) -> CoreResult<()> {
        self.news_api_url()?;
        if self.search_page_size == 0 {
            return Err(CoreError::Config(
                "search_page_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// The news endpoint as a parsed URL.
    pub fn news_api_url(&self) -> CoreResult<Url> {
        Url::parse(&self.news_api_url).map_err(CoreError::from)
    }

    /// The API key, ignoring blank values.
    pub fn news_api_key(&self) -> Option<&str> {
        self.news_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.news_api_url, DEFAULT_NEWS_API_URL);
        assert_eq!(config.search_window_days, 7);
        assert_eq!(config.search_page_size, 100);
        assert!(config.news_api_key.is_none());
        assert!(!config.mock_auth_offline);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }

    #[test]
    fn test_config_file_can_take_auth_offline() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        std::fs::write(&config_path, r#"{ "mock_auth_offline": true }"#).unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert!(config.mock_auth_offline);
        assert_eq!(config.mock_auth_latency_ms, DEFAULT_MOCK_AUTH_LATENCY_MS);
    }

    #[test]
    fn test_config_load_from_file_fills_missing_fields() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");

        std::fs::write(&config_path, r#"{ "log_level": "debug", "search_window_days": 3 }"#)
            .unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.search_window_days, 3);
        assert_eq!(config.news_api_url, DEFAULT_NEWS_API_URL);
        assert_eq!(config.mock_auth_latency_ms, DEFAULT_MOCK_AUTH_LATENCY_MS);
    }

    #[test]
    fn test_config_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let config = Config {
            search_page_size: 20,
            mock_auth_latency_ms: 0,
            ..Config::default()
        };
        config.save(&paths).unwrap();

        let loaded = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(loaded.search_page_size, 20);
        assert_eq!(loaded.mock_auth_latency_ms, 0);
    }

    #[test]
    fn test_config_load_nonexistent_uses_defaults() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        let config = Config::load(&paths).unwrap();
        assert_eq!(config.search_page_size, DEFAULT_SEARCH_PAGE_SIZE);
    }

    #[test]
    fn test_config_invalid_url() {
        let config = Config {
            news_api_url: "not a valid url".to_string(),
            ..Config::default()
        };

        assert!(config.news_api_url().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_zero_page_size_rejected() {
        let config = Config {
            search_page_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let config = Config {
            news_api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(config.news_api_key().is_none());

        let config = Config {
            news_api_key: Some(" abc ".to_string()),
            ..Config::default()
        };
        assert_eq!(config.news_api_key(), Some("abc"));
    }
}
