//! Persistent storage for News Explorer.
//!
//! Two layers:
//! - **Backends** implement the synchronous [`KeyValueStorage`] trait:
//!   [`FileStorage`] keeps one JSON document per profile on disk,
//!   [`MemoryStorage`] keeps everything in memory (tests, `--ephemeral`).
//! - [`ProfileStore`] is the typed API on top (auth token, saved articles)
//!   and implements the async [`PersistentStore`] contract the orchestrator
//!   talks to, so a remote store can be swapped in later.

mod file;
mod keys;
mod memory;
mod profile;
mod traits;

pub use file::FileStorage;
pub use keys::StorageKeys;
pub use memory::MemoryStorage;
pub use profile::ProfileStore;
pub use traits::{KeyValueStorage, PersistentStore};

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Error type for storage operations.
///
/// Missing keys are not errors; they surface as `None` or an empty list.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend could not be opened or written
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Encoding/decoding error
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Open the file-backed storage document for a profile.
pub fn open_profile_storage(path: &Path) -> StorageResult<Arc<dyn KeyValueStorage>> {
    let storage = FileStorage::open(path)?;
    Ok(Arc::new(storage))
}
