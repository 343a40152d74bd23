//! Core module containing fundamental traits and types

pub mod collection;
pub mod entity;
pub mod error;
pub mod favorites;
pub mod field;
pub mod query;
pub mod service;
pub mod store;
pub mod user;
pub mod validation;
pub mod view;

pub use collection::{Collection, CollectionLoader, FetchState};
pub use entity::{FieldPath, Record};
pub use error::{ConfigError, DirectoryError, FetchError, StorageError, ValidationError};
pub use favorites::{DEFAULT_FAVORITES_KEY, FavoritesManager};
pub use field::FieldValue;
pub use query::{
    ColumnFilter, FilterOperator, Page, PaginatedResponse, PaginationMeta, QuerySpec,
    SortDirection, SortKey, paginate,
};
pub use service::{KeyValueStore, RecordSource};
pub use store::{QueryProcessor, QueryableStore};
pub use user::{Address, Company, Geo, User, UserField, UserId};
pub use validation::UserDraft;
pub use view::{FavoritesView, QueryView};
