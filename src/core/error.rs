//! Typed error handling for userdesk
//!
//! Every failure a caller can observe is one of a small set of categories.
//! None of them are fatal to the query layer: fetch failures degrade to an
//! empty collection plus an error flag, storage read failures degrade to an
//! empty favorites set, and field resolution failures never surface at all.
//!
//! # Error Categories
//!
//! - [`FetchError`]: the upstream record source failed
//! - [`StorageError`]: the durable key-value store failed
//! - [`ConfigError`]: configuration could not be loaded or is invalid
//! - [`ValidationError`]: a user draft failed field validation
//!
//! # Example
//!
//! ```rust,ignore
//! match favorites.toggle(3) {
//!     Ok(now_favorite) => println!("favorite: {}", now_favorite),
//!     Err(StorageError::Io { path, .. }) => eprintln!("could not write {}", path),
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// The main error type for the crate
///
/// Wraps each category so callers can either match precisely or just
/// propagate with `?`.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Upstream fetch errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Durable storage errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl DirectoryError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DirectoryError::Fetch(e) => e.error_code(),
            DirectoryError::Storage(_) => "STORAGE_ERROR",
            DirectoryError::Config(_) => "CONFIG_ERROR",
            DirectoryError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Whether re-invoking the failed operation could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DirectoryError::Fetch(FetchError::Network { .. })
                | DirectoryError::Fetch(FetchError::Status { .. })
        )
    }
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors reported by a [`RecordSource`](crate::core::service::RecordSource)
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, timeout...)
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// The upstream answered with a non-success status
    #[error("upstream {url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// The response body was not the expected JSON shape
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The source is deliberately unavailable
    #[error("record source unavailable: {reason}")]
    Unavailable { reason: String },
}

impl FetchError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Network { .. } => "FETCH_NETWORK_ERROR",
            FetchError::Status { .. } => "FETCH_STATUS_ERROR",
            FetchError::Decode { .. } => "FETCH_DECODE_ERROR",
            FetchError::Unavailable { .. } => "FETCH_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to durable key-value storage
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("storage I/O error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Stored bytes could not be encoded or decoded
    #[error("storage encoding error for key '{key}': {message}")]
    Encoding { key: String, message: String },

    /// Backend-specific failure (lock poisoning, LMDB errors...)
    #[error("storage backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },
}

impl StorageError {
    pub(crate) fn backend(backend: &str, message: impl std::fmt::Display) -> Self {
        StorageError::Backend {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Invalid value
    #[error("invalid config value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Multiple field validation errors
    #[error("validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Input could not be read as a JSON object
    #[error("invalid JSON input: {message}")]
    InvalidJson { message: String },
}

/// Individual field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Field errors, empty for non-field variants
    pub fn fields(&self) -> &[FieldValidationError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
            ValidationError::InvalidJson { .. } => &[],
        }
    }
}
