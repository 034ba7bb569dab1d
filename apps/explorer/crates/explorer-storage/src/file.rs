//! File-backed storage: one JSON object per profile.
//!
//! Every write re-reads the document, applies the change, and replaces the
//! file atomically (temp file + rename), so a crash never leaves a truncated
//! document behind and two processes on the same profile see each other's
//! writes.

use crate::{KeyValueStorage, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

type Document = BTreeMap<String, String>;

/// JSON document storage for a single profile.
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Open (or lazily create) the document at `path`.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let storage = Self {
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        };
        // Surface a corrupt document at open time rather than on first use.
        storage.read_document()?;
        Ok(storage)
    }

    /// Location of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> StorageResult<Document> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Profile document is not valid JSON");
            StorageError::Encoding(format!("{}: {}", self.path.display(), e))
        })
    }

    fn write_document(&self, document: &Document) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(document)
            .map_err(|e| StorageError::Encoding(e.to_string()))?;

        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "profile.json".to_string());
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let tmp_path = dir.join(format!(".{}.{}.{}.tmp", file_name, std::process::id(), nanos));

        let write_result = (|| -> std::io::Result<()> {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&tmp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &self.path)?;
            Ok(())
        })();

        if let Err(err) = write_result {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }

        debug!(path = %self.path.display(), keys = document.len(), "Profile document written");
        Ok(())
    }

    fn update<T>(&self, f: impl FnOnce(&mut Document) -> (T, bool)) -> StorageResult<T> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut document = self.read_document()?;
        let (result, changed) = f(&mut document);
        if changed {
            self.write_document(&document)?;
        }
        Ok(result)
    }
}

impl KeyValueStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.update(|doc| {
            let previous = doc.insert(key.to_string(), value.to_string());
            ((), previous.as_deref() != Some(value))
        })
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        Ok(self.read_document()?.remove(key))
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        self.update(|doc| {
            let existed = doc.remove(key).is_some();
            (existed, existed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(&dir.path().join("p.json")).unwrap();

        assert_eq!(storage.get("jwt").unwrap(), None);
        assert!(!storage.delete("jwt").unwrap());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("jwt", "token-1").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("jwt").unwrap(), Some("token-1".to_string()));
        assert!(reopened.delete("jwt").unwrap());
        assert_eq!(reopened.get("jwt").unwrap(), None);
    }

    #[test]
    fn test_two_handles_see_each_other() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.json");

        let a = FileStorage::open(&path).unwrap();
        let b = FileStorage::open(&path).unwrap();
        a.set("one", "1").unwrap();
        b.set("two", "2").unwrap();

        assert_eq!(a.get("two").unwrap(), Some("2".to_string()));
        assert_eq!(b.get("one").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_corrupt_document_is_an_encoding_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            FileStorage::open(&path),
            Err(StorageError::Encoding(_))
        ));
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(&dir.path().join("p.json")).unwrap();
        storage.set("a", "1").unwrap();
        storage.set("b", "2").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(entries, vec!["p.json".to_string()]);
    }
}
