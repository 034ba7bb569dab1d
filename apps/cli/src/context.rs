//! Wiring shared by every command: paths, config, profile storage, services.

use anyhow::{Context, Result};
use explorer_auth::MockAuthService;
use explorer_config_and_utils::{init_logging, Config, Paths};
use explorer_search::NewsApiClient;
use explorer_storage::{open_profile_storage, KeyValueStorage, MemoryStorage, ProfileStore};
use session_article_orchestrator::Orchestrator;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Where the storage for this run lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageLocation {
    File(PathBuf),
    Memory,
}

impl std::fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageLocation::File(path) => write!(f, "{}", path.display()),
            StorageLocation::Memory => write!(f, "memory (ephemeral)"),
        }
    }
}

/// Resolved settings for one invocation.
pub struct AppContext {
    pub paths: Paths,
    pub config: Config,
    pub profile: String,
    pub storage: StorageLocation,
}

impl AppContext {
    pub fn new(home: Option<PathBuf>, profile: &str, ephemeral: bool) -> Result<Self> {
        let paths = match home {
            Some(dir) => Paths::with_base_dir(dir),
            None => Paths::new()?,
        };
        let config = Config::load(&paths)
            .with_context(|| format!("Failed to load {}", paths.config_file().display()))?;

        let profile = profile.trim();
        let profile = if profile.is_empty() {
            explorer_config_and_utils::DEFAULT_PROFILE
        } else {
            profile
        };

        let storage = if ephemeral {
            StorageLocation::Memory
        } else {
            StorageLocation::File(paths.profile_file(profile))
        };

        Ok(Self {
            paths,
            config,
            profile: profile.to_string(),
            storage,
        })
    }

    pub fn init_logging(&self, level: &str, also_stderr: bool) -> std::io::Result<()> {
        self.paths
            .ensure_dirs()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        init_logging("news-explorer", level, also_stderr, self.paths.log_file())
    }

    fn open_backend(&self) -> Result<Arc<dyn KeyValueStorage>> {
        match &self.storage {
            StorageLocation::File(path) => open_profile_storage(path)
                .with_context(|| format!("Failed to open profile '{}'", self.profile)),
            StorageLocation::Memory => Ok(Arc::new(MemoryStorage::new())),
        }
    }

    /// Build an orchestrator over this profile. Not yet initialized.
    pub fn orchestrator(&self) -> Result<Orchestrator> {
        let backend = self.open_backend()?;
        let store = ProfileStore::new(backend.clone());
        let auth = MockAuthService::new(
            backend,
            Duration::from_millis(self.config.mock_auth_latency_ms),
        )
        .with_outage(self.config.mock_auth_offline);
        let search = NewsApiClient::from_config(&self.config)?;

        debug!(profile = %self.profile, storage = %self.storage, "Services ready");
        Ok(Orchestrator::new(
            Arc::new(store),
            Arc::new(auth),
            Arc::new(search),
        ))
    }

    /// Build an orchestrator and resolve the stored session.
    pub async fn start(&self) -> Result<Orchestrator> {
        let mut orchestrator = self.orchestrator()?;
        orchestrator.initialize().await;
        info!(
            profile = %self.profile,
            authenticated = orchestrator.is_authenticated(),
            "Session resolved"
        );
        Ok(orchestrator)
    }
}
