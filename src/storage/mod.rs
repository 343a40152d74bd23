//! Storage and source implementations for different backends

pub mod file;
pub mod in_memory;
#[cfg(feature = "http")]
pub mod json_placeholder;
#[cfg(feature = "lmdb")]
pub mod lmdb;

pub use file::FileKeyValueStore;
pub use in_memory::{InMemoryKeyValueStore, StaticSource};
#[cfg(feature = "http")]
pub use json_placeholder::{DEFAULT_API_URL, JsonPlaceholderClient};
#[cfg(feature = "lmdb")]
pub use lmdb::LmdbKeyValueStore;
