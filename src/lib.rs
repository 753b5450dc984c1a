//! Item Store - CRUD lifecycle handlers over a pluggable keyed store
//!
//! The crate is split into always-on core modules and feature-gated edges:
//!
//! - **`model`** - The `Item` record and its mutable-field update
//! - **`store`** - The keyed store adapter trait and its memory, file and document backends
//! - **`handlers`** - Create, read, update and delete handlers producing status + body responses
//! - **`config`** - TOML configuration and `ITEMSTORE_*` environment overrides
//! - **`observability`** - Markdown operation log
//! - **`cli`** - The `itemstore` command-line front end
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! itemstore = { version = "0.3", features = ["config"] }
//! # Add the MongoDB/DocumentDB backend:
//! itemstore = { version = "0.3", features = ["config", "storage-documentdb"] }
//! # Or enable everything:
//! itemstore = { version = "0.3", features = ["all"] }
//! ```
//!
//! # Example: Handling requests
//!
//! ```no_run
//! use itemstore::handlers::{InboundRequest, ItemHandlers, Operation};
//! use itemstore::store::ItemStoreBuilder;
//! use serde_json::json;
//!
//! async fn example() -> itemstore::store::StoreResult<()> {
//!     let store = ItemStoreBuilder::new("file")
//!         .with_base_path("/var/lib/itemstore")
//!         .build()
//!         .await?;
//!     let handlers = ItemHandlers::new(store);
//!
//!     let request = InboundRequest::new(Operation::Create)
//!         .with_body(json!({"id": "42", "name": "Widget"}));
//!     let response = handlers.handle(request).await;
//!     assert_eq!(response.status.code(), 201);
//!     Ok(())
//! }
//! ```
//!
//! # Example: Building from configuration
//!
//! ```ignore
//! use itemstore::config::{ConfigurationLoader, EnvironmentLoader};
//! use itemstore::handlers::{self, ItemHandlers};
//!
//! let env = EnvironmentLoader::new(None);
//! let loader = ConfigurationLoader::new(None)?.with_environment(&env);
//! let handlers = ItemHandlers::from_config(&loader.config).await?;
//! handlers::init_global(handlers).ok();
//! ```

#![warn(missing_docs)]

/// Item record types
pub mod model;

/// Keyed store adapter and backends
pub mod store;

/// Item operation handlers
pub mod handlers;

/// Configuration management (enabled with the `config` feature)
#[cfg(feature = "config")]
pub mod config;

/// Observability utilities (enabled with the `observability` feature)
#[cfg(feature = "observability")]
pub mod observability;

/// Command-line front end (enabled with the `cli` feature)
#[cfg(feature = "cli")]
pub mod cli;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::handlers::{
        CreatePolicy, InboundRequest, ItemError, ItemHandlers, ItemResult, Operation,
        OperationResponse, Status,
    };
    pub use crate::model::{Item, ItemUpdate};
    pub use crate::store::{ItemStore, ItemStoreBuilder, StoreError, StoreResult};

    #[cfg(feature = "config")]
    pub use crate::config::{Configuration, ConfigurationLoader, EnvironmentLoader};

    #[cfg(feature = "observability")]
    pub use crate::observability::Logger;
}
