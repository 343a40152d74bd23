//! Fetched collection snapshots
//!
//! A [`Collection`] is replaced wholesale on every fetch, never merged. Each
//! snapshot carries a process-unique generation so memoized views can tell
//! a fresh fetch apart from the one they already processed.

use crate::core::entity::Record;
use crate::core::service::RecordSource;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Immutable snapshot of the records returned by one fetch
#[derive(Debug, Clone)]
pub struct Collection<R> {
    records: Arc<[R]>,
    generation: u64,
    fetched_at: DateTime<Utc>,
}

impl<R> Collection<R> {
    /// Wrap freshly fetched records in a new snapshot
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: records.into(),
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
            fetched_at: Utc::now(),
        }
    }

    /// An empty snapshot, used when a fetch failed
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Whether this snapshot is older than `stale_after` at `now`
    pub fn is_stale(&self, now: DateTime<Utc>, stale_after: Duration) -> bool {
        now - self.fetched_at > stale_after
    }
}

impl<R: Record> Collection<R> {
    /// Look a record up by id
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }
}

/// Outcome of a load: the snapshot plus the caller-visible error flag
#[derive(Debug, Clone)]
pub struct FetchState<R> {
    pub collection: Collection<R>,

    /// Error message when the fetch failed, `None` on success
    pub error: Option<String>,
}

impl<R> FetchState<R> {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Drives a [`RecordSource`] and turns its result into a [`FetchState`]
///
/// No retry is attempted: retrying means calling [`load`](Self::load) again.
pub struct CollectionLoader<R: Record, S: RecordSource<R>> {
    source: S,
    _marker: std::marker::PhantomData<fn() -> R>,
}

impl<R: Record, S: RecordSource<R>> CollectionLoader<R, S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            _marker: std::marker::PhantomData,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the full collection
    ///
    /// A failure yields an empty collection with the error flag set.
    pub async fn load(&self) -> FetchState<R> {
        match self.source.fetch_all().await {
            Ok(records) => {
                let collection = Collection::new(records);
                tracing::info!(
                    count = collection.len(),
                    generation = collection.generation(),
                    "collection loaded"
                );
                FetchState {
                    collection,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "collection fetch failed");
                FetchState {
                    collection: Collection::empty(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Fetch one record for a detail view
    ///
    /// Returns the record (if found) and the error message (if failed).
    pub async fn load_one(&self, id: R::Id) -> (Option<R>, Option<String>) {
        match self.source.fetch_one(id).await {
            Ok(record) => (record, None),
            Err(e) => {
                tracing::warn!(id = ?id, error = %e, "record fetch failed");
                (None, Some(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::user::User;
    use crate::storage::StaticSource;

    #[test]
    fn test_generations_are_unique() {
        let a: Collection<User> = Collection::empty();
        let b: Collection<User> = Collection::empty();
        assert_ne!(a.generation(), b.generation());
    }

    #[test]
    fn test_staleness() {
        let collection: Collection<User> = Collection::empty();
        let fetched = collection.fetched_at();
        assert!(!collection.is_stale(fetched + Duration::minutes(4), Duration::minutes(5)));
        assert!(collection.is_stale(fetched + Duration::minutes(6), Duration::minutes(5)));
    }

    #[test]
    fn test_get_by_id() {
        let collection = Collection::new(vec![User::new(1, "Ann"), User::new(2, "Bob")]);
        assert_eq!(collection.get(2).and_then(|u| u.name.as_deref()), Some("Bob"));
        assert!(collection.get(3).is_none());
    }

    #[tokio::test]
    async fn test_load_success() {
        let loader = CollectionLoader::new(StaticSource::new(vec![User::new(1, "Ann")]));
        let state = loader.load().await;
        assert!(!state.is_error());
        assert_eq!(state.collection.len(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_sets_flag() {
        let source = StaticSource::new(vec![User::new(1, "Ann")]);
        source.set_broken(true);
        let loader = CollectionLoader::new(source);

        let state = loader.load().await;
        assert!(state.is_error());
        assert!(state.collection.is_empty());

        loader.source().set_broken(false);
        let retried = loader.load().await;
        assert!(!retried.is_error());
        assert_eq!(retried.collection.len(), 1);
    }

    #[tokio::test]
    async fn test_load_one() {
        let loader = CollectionLoader::new(StaticSource::new(vec![User::new(1, "Ann")]));
        let (user, error) = loader.load_one(1).await;
        assert_eq!(user.map(|u| u.id), Some(1));
        assert!(error.is_none());

        let (user, error) = loader.load_one(9).await;
        assert!(user.is_none());
        assert!(error.is_none());
    }
}
