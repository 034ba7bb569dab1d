//! # Observability
//!
//! Centralized logging for News Explorer.
//!
//! Binaries call [`init_with_config`] once at startup and then use the
//! standard `tracing` macros everywhere. Library crates never install a
//! subscriber; they only emit events.
//!
//! All events are written as JSONL to a central file
//! (`~/.news-explorer/logs/dev.jsonl` unless overridden), so a running
//! terminal UI can be observed from another shell:
//!
//! ```text
//! tail -f ~/.news-explorer/logs/dev.jsonl | jq
//! ```
//!
//! Writing to stderr is optional because the terminal UI owns the screen.
//!
//! ```rust,ignore
//! observability::init_with_config(observability::LogConfig {
//!     service_name: "news-explorer".into(),
//!     default_level: "debug".into(),
//!     also_stderr: false,
//!     ..Default::default()
//! })?;
//! tracing::info!("ready");
//! ```

mod json_layer;
mod writer;

use std::io;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub use json_layer::{JsonLayer, LogEntry};
pub use writer::{default_log_path, CentralLogWriter, WriterFactory};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Name of the service (e.g. "news-explorer", "news-explorer-tui").
    /// Included in every log line for filtering.
    pub service_name: String,

    /// Default log level filter (e.g. "debug", "info", "warn").
    /// Can be overridden by `RUST_LOG`.
    pub default_level: String,

    /// Optional custom log file path.
    /// Defaults to `~/.news-explorer/logs/dev.jsonl`.
    pub log_path: Option<PathBuf>,

    /// Also emit compact logs to stderr.
    pub also_stderr: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown".into(),
            default_level: "info".into(),
            log_path: None,
            also_stderr: false,
        }
    }
}

/// Initialize logging with custom configuration.
///
/// Returns an error when the log file cannot be opened. Installing a second
/// global subscriber (e.g. from tests) is silently ignored.
pub fn init_with_config(config: LogConfig) -> io::Result<()> {
    let log_path = config.log_path.clone().unwrap_or_else(default_log_path);
    let writer = CentralLogWriter::new(&log_path)?;

    let json_layer = JsonLayer::new(config.service_name.clone(), WriterFactory::new(writer));

    let stderr_layer = if config.also_stderr {
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_writer(io::stderr)
                .with_ansi(true)
                .with_filter(env_filter(&config.default_level)),
        )
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(json_layer.with_filter(env_filter(&config.default_level)))
        .with(stderr_layer)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(
            service = %config.service_name,
            log_path = %log_path.display(),
            "observability initialized"
        );
    }

    Ok(())
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}
