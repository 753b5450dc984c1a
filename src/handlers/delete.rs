//! Delete handler

use tracing::debug;

use super::errors::ItemResult;
use super::request::require_id;
use super::response::{OperationResponse, Status};
use crate::store::ItemStore;

pub(super) async fn delete_item(
    store: &dyn ItemStore,
    id: Option<&str>,
) -> ItemResult<OperationResponse> {
    let id = require_id(id)?;

    debug!(id = %id, backend = store.backend_type(), "deleting item");

    store.delete(&id).await?;

    Ok(OperationResponse::message(
        Status::Ok,
        "Item deleted successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ItemError;
    use crate::model::Item;
    use crate::store::MemoryItemStore;

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = MemoryItemStore::new();
        store.put(&Item::new("42", "Widget", None)).await.unwrap();

        let first = delete_item(&store, Some("42")).await.unwrap();
        let second = delete_item(&store, Some("42")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.status, Status::Ok);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_requires_id() {
        let store = MemoryItemStore::new();
        assert!(matches!(
            delete_item(&store, Some("")).await,
            Err(ItemError::InvalidInput(_))
        ));
    }
}
