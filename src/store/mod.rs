//! Keyed Store Adapter
//!
//! This module provides a trait-based abstraction over the persistence backend that owns item
//! records. The default implementation stores items on the local filesystem; an in-memory store
//! backs tests, and a DocumentDB/MongoDB store is available behind a feature.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │    ItemHandlers     │
//! │  (create/read/...)  │
//! └──────────┬──────────┘
//!            │
//! ┌──────────▼──────────┐
//! │      ItemStore      │  <-- Trait
//! │       (async)       │
//! └──────────┬──────────┘
//!            │
//!     ┌──────┼───────────┐
//!     │      │           │
//! ┌───▼──┐ ┌─▼────┐ ┌────▼──────┐
//! │Memory│ │ File │ │ DocumentDB│
//! └──────┘ └──────┘ └───────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use itemstore::model::Item;
//! use itemstore::store::{FileItemStore, ItemStore};
//!
//! async fn example() -> itemstore::store::StoreResult<()> {
//!     let store = FileItemStore::new("/path/to/items")?;
//!
//!     store.put(&Item::new("42", "Widget", None)).await?;
//!     let item = store.get("42").await?;
//!
//!     Ok(())
//! }
//! ```

mod file_store;
mod memory_store;
mod traits;

pub use file_store::FileItemStore;
pub use memory_store::MemoryItemStore;
pub use traits::*;

#[cfg(feature = "storage-documentdb")]
mod documentdb_store;

#[cfg(feature = "storage-documentdb")]
pub use documentdb_store::DocumentDbItemStore;
