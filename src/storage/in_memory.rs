//! In-memory backends for testing and development

use crate::core::entity::Record;
use crate::core::error::{FetchError, StorageError};
use crate::core::service::{KeyValueStore, RecordSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// In-memory key-value store
///
/// Clones share the same map, so a test can hand one clone to a manager and
/// inspect what it wrote through another.
#[derive(Clone, Default)]
pub struct InMemoryKeyValueStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.values.read().map(|values| values.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .read()
            .map_err(|e| StorageError::backend("memory", format!("read lock: {}", e)))?;

        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self
            .values
            .write()
            .map_err(|e| StorageError::backend("memory", format!("write lock: {}", e)))?;

        values.insert(key.to_string(), value.to_string());

        Ok(())
    }
}

/// Record source serving a fixed collection
///
/// Can be switched into a broken mode where every fetch fails, to exercise
/// the error path the way a bad upstream URL would.
#[derive(Clone)]
pub struct StaticSource<R> {
    records: Arc<RwLock<Vec<R>>>,
    broken: Arc<AtomicBool>,
}

impl<R: Record> StaticSource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            broken: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make subsequent fetches fail (or succeed again)
    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    pub fn is_broken(&self) -> bool {
        self.broken.load(Ordering::SeqCst)
    }

    /// Replace the served records; the next fetch returns the new set
    pub fn replace(&self, records: Vec<R>) -> Result<(), FetchError> {
        let mut current = self.records.write().map_err(|e| FetchError::Unavailable {
            reason: format!("write lock: {}", e),
        })?;
        *current = records;
        Ok(())
    }

    fn check(&self) -> Result<(), FetchError> {
        if self.is_broken() {
            return Err(FetchError::Unavailable {
                reason: "source is broken".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Record> RecordSource<R> for StaticSource<R> {
    async fn fetch_all(&self) -> Result<Vec<R>, FetchError> {
        self.check()?;
        let records = self.records.read().map_err(|e| FetchError::Unavailable {
            reason: format!("read lock: {}", e),
        })?;

        Ok(records.clone())
    }

    async fn fetch_one(&self, id: R::Id) -> Result<Option<R>, FetchError> {
        self.check()?;
        let records = self.records.read().map_err(|e| FetchError::Unavailable {
            reason: format!("read lock: {}", e),
        })?;

        Ok(records.iter().find(|record| record.id() == id).cloned())
    }
}
