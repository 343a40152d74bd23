//! Memoized views over a collection snapshot
//!
//! Views recompute only when one of their declared inputs changed: the
//! collection generation and the query for [`QueryView`], the collection
//! generation and the favorites revision for [`FavoritesView`]. They can be
//! driven from any loop (event handler, test harness) by calling `rows`.

use crate::core::collection::Collection;
use crate::core::entity::Record;
use crate::core::favorites::FavoritesManager;
use crate::core::query::QuerySpec;
use crate::core::service::KeyValueStore;
use crate::core::store::{QueryProcessor, QueryableStore};

struct Cached<K, R> {
    key: K,
    rows: Vec<R>,
}

/// Filtered and sorted rows for a list view
pub struct QueryView<R: Record, P: QueryableStore<R> = QueryProcessor> {
    processor: P,
    cache: Option<Cached<(u64, QuerySpec), R>>,
    recomputations: usize,
}

impl<R: Record> QueryView<R> {
    pub fn new() -> Self {
        Self::with_processor(QueryProcessor)
    }
}

impl<R: Record> Default for QueryView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record, P: QueryableStore<R>> QueryView<R, P> {
    pub fn with_processor(processor: P) -> Self {
        Self {
            processor,
            cache: None,
            recomputations: 0,
        }
    }

    /// Rows for `collection` under `spec`, recomputed only if either changed
    pub fn rows(&mut self, collection: &Collection<R>, spec: &QuerySpec) -> &[R] {
        let fresh = self
            .cache
            .as_ref()
            .is_some_and(|c| c.key.0 == collection.generation() && &c.key.1 == spec);

        if !fresh {
            let rows = self.processor.apply(collection.records(), spec);
            self.recomputations += 1;
            self.cache = Some(Cached {
                key: (collection.generation(), spec.clone()),
                rows,
            });
        }

        self.cache.as_ref().map(|c| c.rows.as_slice()).unwrap_or(&[])
    }

    /// Drop the cached rows
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// How many times the rows were actually recomputed
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

/// Favorited rows for the favorites page
pub struct FavoritesView<R: Record> {
    cache: Option<Cached<(u64, u64), R>>,
    recomputations: usize,
}

impl<R: Record> Default for FavoritesView<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> FavoritesView<R> {
    pub fn new() -> Self {
        Self {
            cache: None,
            recomputations: 0,
        }
    }

    /// Favorited records of `collection`, recomputed only on a new snapshot
    /// or a favorites mutation
    pub fn rows<S: KeyValueStore>(
        &mut self,
        collection: &Collection<R>,
        favorites: &FavoritesManager<R::Id, S>,
    ) -> &[R] {
        let key = (collection.generation(), favorites.revision());
        let fresh = self.cache.as_ref().is_some_and(|c| c.key == key);

        if !fresh {
            let rows = favorites.derive(collection.records());
            self.recomputations += 1;
            self.cache = Some(Cached { key, rows });
        }

        self.cache.as_ref().map(|c| c.rows.as_slice()).unwrap_or(&[])
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}
