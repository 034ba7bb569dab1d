//! File system paths for News Explorer.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Profile used when none is given on the command line.
pub const DEFAULT_PROFILE: &str = "default";

/// Environment variable overriding the base directory.
const HOME_ENV: &str = "NEWS_EXPLORER_HOME";

/// Manages file system paths for the application.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory (~/.news-explorer)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance.
    ///
    /// Uses `$NEWS_EXPLORER_HOME` when set, otherwise `~/.news-explorer`.
    pub fn new() -> CoreResult<Self> {
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_base_dir(PathBuf::from(dir)));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".news-explorer"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.news-explorer).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.news-explorer/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Directory holding one storage document per profile.
    pub fn profiles_dir(&self) -> PathBuf {
        self.base_dir.join("profiles")
    }

    /// Storage document for a profile (~/.news-explorer/profiles/<name>.json).
    ///
    /// Path separators and other unexpected characters in the name are
    /// replaced so a profile can never escape the profiles directory.
    pub fn profile_file(&self, profile: &str) -> PathBuf {
        let sanitized: String = profile
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let name = if sanitized.is_empty() {
            DEFAULT_PROFILE.to_string()
        } else {
            sanitized
        };
        self.profiles_dir().join(format!("{}.json", name))
    }

    /// Get the logs directory (~/.news-explorer/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Central JSONL log file (~/.news-explorer/logs/dev.jsonl).
    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("dev.jsonl")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.profiles_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}
