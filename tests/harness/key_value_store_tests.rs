//! Macro-generated test suite for `KeyValueStore` contract validation.
//!
//! The `key_value_store_tests!` macro generates a test module that validates
//! any `KeyValueStore` implementation: raw reads and writes, and the
//! favorites manager running on top of it.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod harness;
//!
//! use harness::*;
//! use userdesk::storage::InMemoryKeyValueStore;
//!
//! key_value_store_tests!(InMemoryKeyValueStore::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_read_missing_key`: unknown key reads as None
//! - `test_write_then_read`: value comes back unchanged
//! - `test_overwrite`: last write wins
//! - `test_keys_are_independent`: writing one key leaves another alone
//! - `test_favorites_toggle_persists`: manager writes the canonical array
//! - `test_favorites_reload`: a second manager on the same store sees the set
//! - `test_favorites_toggle_twice_restores_bytes`: add then remove is a no-op

/// Generate a `KeyValueStore` conformance test suite.
///
/// `$factory` must be an expression that evaluates to a store implementing
/// `KeyValueStore`. It is re-evaluated for each test to ensure isolation.
#[allow(unused_macros)]
macro_rules! key_value_store_tests {
    ($factory:expr) => {
        mod key_value_store_contract_tests {
            use super::*;
            use userdesk::core::favorites::{DEFAULT_FAVORITES_KEY, FavoritesManager};
            use userdesk::core::service::KeyValueStore;

            #[test]
            fn test_read_missing_key() {
                let store = $factory;
                assert_eq!(store.read("missing").unwrap(), None);
            }

            #[test]
            fn test_write_then_read() {
                let store = $factory;
                store.write("theme", "dark").unwrap();
                assert_eq!(store.read("theme").unwrap().as_deref(), Some("dark"));
            }

            #[test]
            fn test_overwrite() {
                let store = $factory;
                store.write("k", "[1]").unwrap();
                store.write("k", "[1,2]").unwrap();
                assert_eq!(store.read("k").unwrap().as_deref(), Some("[1,2]"));
            }

            #[test]
            fn test_keys_are_independent() {
                let store = $factory;
                store.write("a", "1").unwrap();
                store.write("b", "2").unwrap();
                assert_eq!(store.read("a").unwrap().as_deref(), Some("1"));
                assert_eq!(store.read("b").unwrap().as_deref(), Some("2"));
            }

            #[test]
            fn test_favorites_toggle_persists() {
                let mut favorites = FavoritesManager::<u64, _>::load_default($factory);
                assert!(favorites.toggle(3).unwrap());
                assert!(favorites.toggle(1).unwrap());

                let mut expected = std::collections::BTreeSet::new();
                expected.insert(1u64);
                expected.insert(3u64);
                assert_eq!(favorites.all(), &expected);
                assert_eq!(favorites.key(), DEFAULT_FAVORITES_KEY);
            }

            #[test]
            fn test_favorites_reload() {
                let store = std::sync::Arc::new($factory);

                let mut first = FavoritesManager::<u64, _>::load_default(store.clone());
                first.toggle(2).unwrap();
                first.toggle(5).unwrap();

                let second = FavoritesManager::<u64, _>::load_default(store.clone());
                assert!(second.is_favorite(2));
                assert!(second.is_favorite(5));
                assert_eq!(second.len(), 2);
                assert_eq!(
                    store.read(DEFAULT_FAVORITES_KEY).unwrap().as_deref(),
                    Some("[2,5]")
                );
            }

            #[test]
            fn test_favorites_toggle_twice_restores_bytes() {
                let store = std::sync::Arc::new($factory);
                let mut favorites = FavoritesManager::<u64, _>::load_default(store.clone());
                favorites.toggle(1).unwrap();
                favorites.toggle(4).unwrap();
                let before = store.read(DEFAULT_FAVORITES_KEY).unwrap();

                favorites.toggle(2).unwrap();
                favorites.toggle(2).unwrap();

                assert_eq!(store.read(DEFAULT_FAVORITES_KEY).unwrap(), before);
                assert!(!favorites.is_favorite(2));
            }
        }
    };
}
