//! Configuration loading and management

use crate::core::error::{ConfigError, DirectoryError};
use crate::core::favorites::{DEFAULT_FAVORITES_KEY, FavoritesManager};
use crate::core::query::Page;
use crate::core::service::KeyValueStore;
use crate::core::user::UserId;
use crate::storage::{FileKeyValueStore, InMemoryKeyValueStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Where the favorites set is persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process memory, lost on exit
    #[default]
    Memory,

    /// A single JSON file
    File { path: PathBuf },

    /// An LMDB environment directory (requires the `lmdb` feature)
    Lmdb { path: PathBuf },
}

/// Complete configuration for a user directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Collection endpoint of the upstream source
    pub api_url: String,

    /// Storage key owned by the favorites manager
    pub favorites_key: String,

    /// Upstream request timeout
    pub request_timeout_secs: u64,

    /// Age after which a fetched collection should be refetched
    pub stale_after_secs: u64,

    /// Default number of rows per page
    pub page_size: usize,

    pub storage: StorageConfig,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            api_url: "https://jsonplaceholder.typicode.com/users".to_string(),
            favorites_key: DEFAULT_FAVORITES_KEY.to_string(),
            request_timeout_secs: 10,
            stale_after_secs: 5 * 60,
            page_size: 20,
            storage: StorageConfig::Memory,
        }
    }
}

impl DirectoryConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the rest of the crate cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(invalid("api_url", "must not be empty"));
        }
        if self.favorites_key.is_empty() {
            return Err(invalid("favorites_key", "must not be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be at least 1"));
        }
        if self.page_size == 0 {
            return Err(invalid("page_size", "must be at least 1"));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn stale_after(&self) -> chrono::Duration {
        let secs = self.stale_after_secs.min(u64::from(u32::MAX));
        chrono::Duration::seconds(secs as i64)
    }

    /// First page with the configured page size
    pub fn first_page(&self) -> Page {
        Page::new(1, self.page_size)
    }

    /// Build the configured storage backend
    pub fn open_store(&self) -> Result<Box<dyn KeyValueStore>, DirectoryError> {
        let store: Box<dyn KeyValueStore> = match &self.storage {
            StorageConfig::Memory => Box::new(InMemoryKeyValueStore::new()),
            StorageConfig::File { path } => Box::new(FileKeyValueStore::open(path)?),
            #[cfg(feature = "lmdb")]
            StorageConfig::Lmdb { path } => {
                Box::new(crate::storage::LmdbKeyValueStore::open(path)?)
            }
            #[cfg(not(feature = "lmdb"))]
            StorageConfig::Lmdb { .. } => {
                return Err(invalid("storage", "lmdb backend requires the `lmdb` feature").into());
            }
        };

        tracing::info!(storage = ?self.storage, "storage opened");
        Ok(store)
    }

    /// Open storage and load the favorites set from it
    pub fn open_favorites(
        &self,
    ) -> Result<FavoritesManager<UserId, Box<dyn KeyValueStore>>, DirectoryError> {
        Ok(FavoritesManager::load(self.open_store()?, self.favorites_key.clone()))
    }

    /// Build the HTTP client for the configured endpoint
    #[cfg(feature = "http")]
    pub fn client(&self) -> Result<crate::storage::JsonPlaceholderClient, DirectoryError> {
        Ok(crate::storage::JsonPlaceholderClient::new(
            self.api_url.clone(),
            self.request_timeout(),
        )?)
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
