//! LMDB key-value backend using heed (memory-mapped B-tree).
//!
//! LMDB is an embedded store, no external server required. Operations are
//! synchronous and each `write` commits its own transaction, which matches
//! the write-through contract of [`KeyValueStore`].
//!
//! # Databases (named LMDB sub-databases)
//!
//! - `kv`: string keys to string values
//!
//! # Feature flag
//!
//! Enable with `--features lmdb`. Requires the `heed` crate.

use crate::core::error::StorageError;
use crate::core::service::KeyValueStore;
use heed::types::Str;
use heed::{Database, Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;

fn lmdb_err(e: impl std::fmt::Display) -> StorageError {
    StorageError::backend("lmdb", e)
}

/// LMDB-backed implementation of [`KeyValueStore`].
///
/// The `Env` is wrapped in an `Arc` for cheap cloning.
///
/// # Example
///
/// ```rust,ignore
/// use userdesk::storage::LmdbKeyValueStore;
///
/// let store = LmdbKeyValueStore::open("/tmp/userdesk-lmdb")?;
/// let favorites = FavoritesManager::<u64, _>::load_default(store);
/// ```
#[derive(Clone)]
pub struct LmdbKeyValueStore {
    env: Arc<Env>,
    db: Database<Str, Str>,
}

impl LmdbKeyValueStore {
    /// Open (or create) an LMDB environment at `path` and initialise the
    /// `kv` named database.
    ///
    /// The map size is a virtual address space reservation, LMDB does not
    /// allocate it up front.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path.as_ref()).map_err(|source| StorageError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(16 * 1024 * 1024)
                .max_dbs(4)
                .open(path.as_ref())
                .map_err(lmdb_err)?
        };

        let mut wtxn = env.write_txn().map_err(lmdb_err)?;
        let db: Database<Str, Str> = env
            .create_database(&mut wtxn, Some("kv"))
            .map_err(lmdb_err)?;
        wtxn.commit().map_err(lmdb_err)?;

        Ok(Self {
            env: Arc::new(env),
            db,
        })
    }
}

impl KeyValueStore for LmdbKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let rtxn = self.env.read_txn().map_err(lmdb_err)?;
        let value = self.db.get(&rtxn, key).map_err(lmdb_err)?;
        Ok(value.map(str::to_string))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut wtxn = self.env.write_txn().map_err(lmdb_err)?;
        self.db.put(&mut wtxn, key, value).map_err(lmdb_err)?;
        wtxn.commit().map_err(lmdb_err)
    }
}
