//! Read handler

use tracing::debug;

use super::errors::{ItemError, ItemResult};
use super::request::require_id;
use super::response::{OperationResponse, Status};
use crate::store::{ItemStore, StoreError};

pub(super) async fn read_item(
    store: &dyn ItemStore,
    id: Option<&str>,
) -> ItemResult<OperationResponse> {
    let id = require_id(id)?;

    debug!(id = %id, backend = store.backend_type(), "getting item");

    let item = store.get(&id).await?.ok_or(ItemError::NotFound(id))?;
    let body = serde_json::to_value(&item)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    Ok(OperationResponse::record(Status::Ok, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Item;
    use crate::store::MemoryItemStore;

    #[tokio::test]
    async fn test_read_existing() {
        let store = MemoryItemStore::new();
        let item = Item::new("42", "Widget", Some("A widget".to_string()));
        store.put(&item).await.unwrap();

        let response = read_item(&store, Some("42")).await.unwrap();
        assert_eq!(response.status, Status::Ok);
        assert_eq!(response.body["id"], "42");
        assert_eq!(response.body["name"], "Widget");
        assert_eq!(response.body["description"], "A widget");
        assert_eq!(
            response.body["createdAt"],
            serde_json::to_value(item.created_at).unwrap()
        );
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let store = MemoryItemStore::new();
        let result = read_item(&store, Some("nope")).await;
        assert!(matches!(result, Err(ItemError::NotFound(ref id)) if id == "nope"));
    }

    #[tokio::test]
    async fn test_read_requires_id() {
        let store = MemoryItemStore::new();
        assert!(matches!(
            read_item(&store, None).await,
            Err(ItemError::InvalidInput(_))
        ));
    }
}
