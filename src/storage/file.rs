//! JSON file key-value store
//!
//! All keys live in one JSON object on disk. Every write rewrites the whole
//! file through a sibling temp file and a rename, so a crash mid-write leaves
//! either the old or the new content, never a truncated file.

use crate::core::error::StorageError;
use crate::core::service::KeyValueStore;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File-backed implementation of [`KeyValueStore`]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Use `path` as the backing file; it is created on first write
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<IndexMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(IndexMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.display().to_string(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| StorageError::Encoding {
            key: self.path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn save(&self, values: &IndexMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.display().to_string(),
            source,
        };
        let bytes = serde_json::to_vec_pretty(values).map_err(|e| StorageError::Encoding {
            key: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, bytes).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.shift_remove(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| StorageError::backend("file", format!("lock: {}", e)))?;

        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values)?;

        tracing::debug!(path = %self.path.display(), key = %key, "file store written");
        Ok(())
    }
}
