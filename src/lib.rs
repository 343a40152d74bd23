//! # userdesk
//!
//! Client-side query engine and durable favorites set for user directory
//! views backed by a JSONPlaceholder-style `/users` endpoint.
//!
//! ## Features
//!
//! - **Query processor**: global search, AND-combined column filters over
//!   dotted field paths, and a stable single-key sort with nulls last
//! - **Typed field access**: records expose a closed field enum instead of
//!   arbitrary path lookups
//! - **Favorites**: a write-through favorites set that survives restarts and
//!   tolerates ids missing from the current collection
//! - **Memoized views**: recompute only when the snapshot or query changed
//! - **Pluggable storage**: in-memory, JSON file, or LMDB (`lmdb` feature)
//! - **HTTP source**: JSONPlaceholder client (`http` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use userdesk::prelude::*;
//!
//! let users = vec![User::new(1, "Ann"), User::new(2, "Bob")];
//!
//! let spec = QuerySpec::new().search("an").sort_by(SortKey::desc("name"));
//! let rows = QueryProcessor.apply(&users, &spec);
//! assert_eq!(rows.len(), 1);
//!
//! let mut favorites = FavoritesManager::load_default(InMemoryKeyValueStore::new());
//! favorites.toggle(2).unwrap();
//! assert_eq!(favorites.derive(&users)[0].id, 2);
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{FieldPath, Record},
        service::{KeyValueStore, RecordSource},
        store::QueryableStore,
    };

    // === Query ===
    pub use crate::core::{
        field::FieldValue,
        query::{
            ColumnFilter, FilterOperator, Page, PaginatedResponse, QuerySpec, SortDirection,
            SortKey, paginate,
        },
        store::QueryProcessor,
    };

    // === Domain ===
    pub use crate::core::{
        collection::{Collection, CollectionLoader, FetchState},
        favorites::FavoritesManager,
        user::{User, UserField, UserId},
        validation::UserDraft,
        view::{FavoritesView, QueryView},
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, DirectoryError, FetchError, StorageError, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore, StaticSource};
    #[cfg(feature = "http")]
    pub use crate::storage::JsonPlaceholderClient;
    #[cfg(feature = "lmdb")]
    pub use crate::storage::LmdbKeyValueStore;

    // === Config ===
    pub use crate::config::{DirectoryConfig, StorageConfig};
}
