//! DocumentDB/MongoDB Item Store
//!
//! Implementation for cloud-native item storage using MongoDB/DocumentDB.
//!
//! ## Usage
//!
//! Enable the `storage-documentdb` feature in Cargo.toml:
//!
//! ```toml
//! itemstore = { version = "0.3", features = ["storage-documentdb"] }
//! ```
//!
//! ## Configuration
//!
//! ```rust,no_run
//! use itemstore::store::DocumentDbItemStore;
//!
//! async fn example() -> itemstore::store::StoreResult<()> {
//!     let store = DocumentDbItemStore::new(
//!         "mongodb://localhost:27017",
//!         "itemstore",
//!         "items"
//!     ).await?;
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::doc,
    error::{ErrorKind, WriteFailure},
    options::{ClientOptions, ReturnDocument},
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use super::traits::{ItemStore, StoreError, StoreResult};
use crate::model::{Item, ItemUpdate};

/// Server error code for a duplicate `_id` on insert.
const DUPLICATE_KEY: i32 = 11000;

/// Stored form of an item; the item id is the document `_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ItemDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: String,
}

impl From<&Item> for ItemDocument {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<ItemDocument> for Item {
    type Error = StoreError;

    fn try_from(doc: ItemDocument) -> StoreResult<Self> {
        let created_at = DateTime::parse_from_rfc3339(&doc.created_at)
            .map_err(|e| StoreError::Deserialization(format!("createdAt: {}", e)))?
            .with_timezone(&Utc);

        Ok(Item {
            id: doc.id,
            name: doc.name,
            description: doc.description,
            created_at,
        })
    }
}

/// DocumentDB/MongoDB item store
pub struct DocumentDbItemStore {
    client: Client,
    collection: Collection<ItemDocument>,
    database_name: String,
}

impl DocumentDbItemStore {
    /// Create a new DocumentDB item store
    ///
    /// # Arguments
    /// * `connection_string` - MongoDB/DocumentDB connection string
    /// * `database` - Database name
    /// * `collection` - Collection name
    pub async fn new(
        connection_string: &str,
        database: &str,
        collection: &str,
    ) -> StoreResult<Self> {
        let client_options = ClientOptions::parse(connection_string)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let client = Client::with_options(client_options)
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        let coll = client
            .database(database)
            .collection::<ItemDocument>(collection);

        Ok(Self {
            client,
            collection: coll,
            database_name: database.to_string(),
        })
    }

    /// Get the MongoDB client (for advanced operations)
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ItemStore for DocumentDbItemStore {
    fn backend_type(&self) -> &'static str {
        "documentdb"
    }

    async fn is_available(&self) -> bool {
        self.client
            .database(&self.database_name)
            .run_command(doc! { "ping": 1 })
            .await
            .is_ok()
    }

    async fn put(&self, item: &Item) -> StoreResult<()> {
        self.collection
            .replace_one(doc! { "_id": item.id.as_str() }, ItemDocument::from(item))
            .upsert(true)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn put_if_absent(&self, item: &Item) -> StoreResult<bool> {
        match self.collection.insert_one(ItemDocument::from(item)).await {
            Ok(_) => Ok(true),
            Err(e) => match *e.kind {
                ErrorKind::Write(WriteFailure::WriteError(ref write_error))
                    if write_error.code == DUPLICATE_KEY =>
                {
                    Ok(false)
                }
                _ => Err(StoreError::Backend(e.to_string())),
            },
        }
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Item>> {
        self.collection
            .find_one(doc! { "_id": key })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .map(Item::try_from)
            .transpose()
    }

    async fn update(&self, key: &str, changes: &ItemUpdate) -> StoreResult<Option<Item>> {
        let update = doc! {
            "$set": {
                "name": changes.name.as_str(),
                "description": changes.description.as_str(),
            }
        };

        // No upsert: a missing key must come back as None rather than create a partial record.
        self.collection
            .find_one_and_update(doc! { "_id": key }, update)
            .upsert(false)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?
            .map(Item::try_from)
            .transpose()
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        self.collection
            .delete_one(doc! { "_id": key })
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_conversion() {
        let item = Item::new("42", "Widget", Some("A widget".to_string()));
        let document = ItemDocument::from(&item);
        assert_eq!(document.id, "42");

        let back = Item::try_from(document).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_document_with_bad_timestamp() {
        let document = ItemDocument {
            id: "1".to_string(),
            name: "x".to_string(),
            description: None,
            created_at: "yesterday".to_string(),
        };
        assert!(matches!(
            Item::try_from(document),
            Err(StoreError::Deserialization(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB instance
    async fn test_documentdb_store_basic() {
        let store = DocumentDbItemStore::new("mongodb://localhost:27017", "test_itemstore", "items")
            .await
            .expect("Failed to connect to MongoDB");

        assert!(store.is_available().await);
        assert_eq!(store.backend_type(), "documentdb");
    }
}
