//! In-Memory Item Store
//!
//! Process-local store used for tests and ephemeral runs.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::traits::{ItemStore, StoreResult};
use crate::model::{Item, ItemUpdate};

/// An `ItemStore` which keeps items in memory.
///
/// Data is not persisted and is only visible to the current process. Each operation holds the
/// map lock for its whole duration, so single-key operations are atomic.
///
/// None of the methods in this store will ever return `Err`.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: RwLock<HashMap<String, Item>>,
}

impl MemoryItemStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently stored
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Whether the store holds no items
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    fn backend_type(&self) -> &'static str {
        "memory"
    }

    async fn is_available(&self) -> bool {
        true
    }

    async fn put(&self, item: &Item) -> StoreResult<()> {
        self.items
            .write()
            .await
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn put_if_absent(&self, item: &Item) -> StoreResult<bool> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Ok(false);
        }
        items.insert(item.id.clone(), item.clone());
        Ok(true)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Item>> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn update(&self, key: &str, changes: &ItemUpdate) -> StoreResult<Option<Item>> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(key).map(|item| {
            item.apply(changes);
            item.clone()
        }))
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.items.write().await.remove(key);
        Ok(())
    }
}
