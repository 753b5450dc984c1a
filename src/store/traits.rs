//! Item Store Traits
//!
//! Defines the keyed store interface every backend implements.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::model::{Item, ItemUpdate};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Error types for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error during a store operation
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Connection error (for remote backends)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic backend error
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Keyed persistence for items.
///
/// Every method is a single atomic operation against the backend. Absence is reported in the
/// `Ok` value (`None` or `false`), never as an error, so a caller can always tell a missing key
/// from a failing backend.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Get the backend type name (e.g., "memory", "file", "documentdb")
    fn backend_type(&self) -> &'static str;

    /// Check if the backend is available/connected
    async fn is_available(&self) -> bool;

    /// Write an item, replacing any item stored under the same id.
    async fn put(&self, item: &Item) -> StoreResult<()>;

    /// Write an item only if nothing is stored under its id.
    ///
    /// Returns `false` and leaves the stored item untouched when the id is taken.
    async fn put_if_absent(&self, item: &Item) -> StoreResult<bool>;

    /// Look up the item stored under `key`.
    async fn get(&self, key: &str) -> StoreResult<Option<Item>>;

    /// Overwrite the mutable fields of an existing item and return the result.
    ///
    /// Returns `None` when no item is stored under `key`. This never creates an item.
    async fn update(&self, key: &str, changes: &ItemUpdate) -> StoreResult<Option<Item>>;

    /// Remove the item stored under `key`.
    ///
    /// Removing a key that is not present succeeds.
    async fn delete(&self, key: &str) -> StoreResult<()>;
}

/// Builder for creating item stores from configuration
pub struct ItemStoreBuilder {
    backend_type: String,
    config: HashMap<String, String>,
}

impl ItemStoreBuilder {
    /// Create a new builder
    pub fn new(backend_type: &str) -> Self {
        Self {
            backend_type: backend_type.to_string(),
            config: HashMap::new(),
        }
    }

    /// Add a configuration option
    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.config.insert(key.to_string(), value.to_string());
        self
    }

    /// Set the base path (for the file backend)
    pub fn with_base_path(self, path: impl Into<PathBuf>) -> Self {
        self.with_option("base_path", &path.into().to_string_lossy())
    }

    /// Set the connection string, database and collection (for the documentdb backend)
    pub fn with_connection(self, connection_string: &str, database: &str, collection: &str) -> Self {
        self.with_option("connection_string", connection_string)
            .with_option("database", database)
            .with_option("collection", collection)
    }

    fn required(&self, key: &str) -> StoreResult<&str> {
        self.config
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| StoreError::Configuration(format!("{} is required", key)))
    }

    /// Build the item store
    pub async fn build(self) -> StoreResult<Arc<dyn ItemStore>> {
        match self.backend_type.as_str() {
            "memory" => Ok(Arc::new(super::MemoryItemStore::new())),
            "file" | "filesystem" => {
                let base_path = self.required("base_path")?;
                Ok(Arc::new(super::FileItemStore::new(base_path)?))
            }
            #[cfg(feature = "storage-documentdb")]
            "documentdb" | "mongodb" => {
                let store = super::DocumentDbItemStore::new(
                    self.required("connection_string")?,
                    self.required("database")?,
                    self.required("collection")?,
                )
                .await?;
                Ok(Arc::new(store))
            }
            #[cfg(not(feature = "storage-documentdb"))]
            "documentdb" | "mongodb" => Err(StoreError::Configuration(
                "DocumentDB backend requires the storage-documentdb feature".into(),
            )),
            unknown => Err(StoreError::Configuration(format!(
                "Unknown backend type: {}",
                unknown
            ))),
        }
    }
}
