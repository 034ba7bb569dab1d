//! Configuration, filesystem paths, and logging setup for News Explorer.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{
    Config, DEFAULT_LOG_LEVEL, DEFAULT_MOCK_AUTH_LATENCY_MS, DEFAULT_NEWS_API_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_PAGE_SIZE, DEFAULT_SEARCH_WINDOW_DAYS,
};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, parse_level};
pub use paths::{Paths, DEFAULT_PROFILE};
