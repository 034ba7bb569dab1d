//! Logging initialization.
//!
//! Thin wrapper over the observability package so the binary only deals with
//! one call. Every log line lands as JSONL in the central log file; stderr
//! output is opt-in because the terminal UI owns the screen.

use std::path::PathBuf;

/// Initialize logging for a service.
///
/// * `service_name` - included in every log line
/// * `level` - default filter when `RUST_LOG` is unset
/// * `also_stderr` - mirror logs to stderr (one-shot commands only)
/// * `log_path` - central JSONL file
pub fn init_logging(
    service_name: &str,
    level: &str,
    also_stderr: bool,
    log_path: PathBuf,
) -> std::io::Result<()> {
    observability::init_with_config(observability::LogConfig {
        service_name: service_name.into(),
        default_level: parse_level(level).as_str().to_ascii_lowercase(),
        log_path: Some(log_path),
        also_stderr,
    })
}

/// Parse a log level string into a tracing Level.
pub fn parse_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" | "warning" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
