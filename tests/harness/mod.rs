//! Shared test harness for integration tests
//!
//! Provides the fixture users served by the upstream `/users` endpoint, a few
//! hand-built records for edge cases, a `KeyValueStore` whose reads and
//! writes can be made to fail, and the `key_value_store_tests!` contract
//! suite every storage backend runs.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod key_value_store_tests;

use std::sync::atomic::{AtomicBool, Ordering};

use userdesk::core::error::StorageError;
use userdesk::core::service::KeyValueStore;
use userdesk::core::user::User;
use userdesk::storage::InMemoryKeyValueStore;

/// Raw fixture body, as the upstream serves it
pub const USERS_JSON: &str = include_str!("../fixtures/users.json");

/// The five fixture users, in upstream order
pub fn fixture_users() -> Vec<User> {
    serde_json::from_str(USERS_JSON).expect("fixture should parse")
}

/// A user whose display name is null
pub fn nameless(id: u64) -> User {
    let mut user = User::new(id, "");
    user.name = None;
    user
}

pub fn ids(users: &[User]) -> Vec<u64> {
    users.iter().map(|u| u.id).collect()
}

pub fn names(users: &[User]) -> Vec<Option<&str>> {
    users.iter().map(|u| u.name.as_deref()).collect()
}

// ---------------------------------------------------------------------------
// FlakyStore: a KeyValueStore whose I/O can be made to fail
// ---------------------------------------------------------------------------

/// Wraps an in-memory store; reads or writes fail while the flag is set
#[derive(Default)]
pub struct FlakyStore {
    pub inner: InMemoryKeyValueStore,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: InMemoryKeyValueStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Backend {
                backend: "flaky".to_string(),
                message: "read refused".to_string(),
            });
        }
        self.inner.read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend {
                backend: "flaky".to_string(),
                message: "disk full".to_string(),
            });
        }
        self.inner.write(key, value)
    }
}
