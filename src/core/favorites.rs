//! Durable favorites set
//!
//! The set of favorited ids is the source of truth and lives independently of
//! any fetched collection: it may name ids the current snapshot does not
//! contain, which [`FavoritesManager::derive`] silently skips.
//!
//! Every mutation is written through to the [`KeyValueStore`] before
//! `toggle` returns. The persisted value is a JSON array in ascending id
//! order, so toggling the same id twice restores the exact stored bytes.
//!
//! Two toggles of the same id in one interaction cancel each other out;
//! guarding against double invocation is the caller's job.

use crate::core::entity::Record;
use crate::core::error::StorageError;
use crate::core::service::KeyValueStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::fmt::Debug;

/// Storage key used when none is configured
pub const DEFAULT_FAVORITES_KEY: &str = "favoriteUserIds";

/// In-memory favorites set kept in sync with durable storage
pub struct FavoritesManager<Id, S> {
    store: S,
    key: String,
    ids: BTreeSet<Id>,
    revision: u64,
}

impl<Id, S> FavoritesManager<Id, S>
where
    Id: Copy + Ord + Debug + Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Read the set from `store` under `key`
    ///
    /// Absent, unreadable or malformed content yields an empty set; the
    /// problem is logged and never returned. Content that is valid but not
    /// in canonical form (unsorted, duplicated, spaced) is rewritten once.
    pub fn load(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let ids = match store.read(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Id>>(&raw) {
                Ok(ids) => {
                    let ids: BTreeSet<Id> = ids.into_iter().collect();
                    canonicalize(&store, &key, &raw, &ids);
                    ids
                }
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "malformed favorites, starting empty");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "unreadable favorites, starting empty");
                BTreeSet::new()
            }
        };

        tracing::debug!(key = %key, count = ids.len(), "favorites loaded");

        Self {
            store,
            key,
            ids,
            revision: 0,
        }
    }

    /// Load from the default `favoriteUserIds` key
    pub fn load_default(store: S) -> Self {
        Self::load(store, DEFAULT_FAVORITES_KEY)
    }

    pub fn is_favorite(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    /// Flip membership of `id` and persist the whole set
    ///
    /// Returns whether `id` is a favorite afterwards. When the write fails
    /// the in-memory change is undone and the error returned, so memory and
    /// storage never disagree.
    pub fn toggle(&mut self, id: Id) -> Result<bool, StorageError> {
        let now_favorite = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };

        if let Err(e) = self.persist() {
            if now_favorite {
                self.ids.remove(&id);
            } else {
                self.ids.insert(id);
            }
            tracing::warn!(id = ?id, error = %e, "favorite toggle rolled back");
            return Err(e);
        }

        self.revision += 1;
        tracing::debug!(id = ?id, favorite = now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    /// All favorited ids, ascending
    pub fn all(&self) -> &BTreeSet<Id> {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Counter bumped on every successful mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The storage key this manager owns
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Favorited records of `collection`, in collection order
    pub fn derive<R>(&self, collection: &[R]) -> Vec<R>
    where
        R: Record<Id = Id>,
    {
        collection
            .iter()
            .filter(|record| self.ids.contains(&record.id()))
            .cloned()
            .collect()
    }

    /// Favorited ids with no record in `collection`
    pub fn missing_from<R>(&self, collection: &[R]) -> Vec<Id>
    where
        R: Record<Id = Id>,
    {
        let present: BTreeSet<Id> = collection.iter().map(|record| record.id()).collect();
        self.ids.difference(&present).copied().collect()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.ids).map_err(|e| StorageError::Encoding {
            key: self.key.clone(),
            message: e.to_string(),
        })?;
        self.store.write(&self.key, &encoded)
    }
}

fn canonicalize<Id: Serialize, S: KeyValueStore>(
    store: &S,
    key: &str,
    raw: &str,
    ids: &BTreeSet<Id>,
) {
    let canonical = match serde_json::to_string(ids) {
        Ok(canonical) => canonical,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "could not encode favorites");
            return;
        }
    };
    if canonical == raw {
        return;
    }

    match store.write(key, &canonical) {
        Ok(()) => tracing::debug!(key = %key, "favorites rewritten in canonical form"),
        Err(e) => tracing::warn!(key = %key, error = %e, "could not rewrite favorites"),
    }
}
