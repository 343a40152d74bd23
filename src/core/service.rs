//! Service traits for the two collaborators the core depends on

use crate::core::entity::Record;
use crate::core::error::{FetchError, StorageError};
use async_trait::async_trait;
use std::sync::Arc;

/// Durable string key-value storage
///
/// Calls are synchronous: a `write` that returned `Ok` is durable from the
/// backend's point of view. The favorites manager relies on this to persist
/// before yielding control.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Upstream source of records
///
/// The core never retries, times out or cancels a fetch itself; those
/// belong to the implementation.
#[async_trait]
pub trait RecordSource<R: Record>: Send + Sync {
    /// Fetch the whole collection, in source order
    async fn fetch_all(&self) -> Result<Vec<R>, FetchError>;

    /// Fetch a single record, `None` if the source does not know it
    async fn fetch_one(&self, id: R::Id) -> Result<Option<R>, FetchError>;
}
