//! Create handler

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::errors::{ItemError, ItemResult};
use super::request::CreateItemRequest;
use super::response::{OperationResponse, Status};
use crate::model::Item;
use crate::store::ItemStore;

/// What a create does when the id is already taken
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatePolicy {
    /// Replace the existing item, including its `createdAt`
    #[default]
    Overwrite,
    /// Fail with `ItemError::AlreadyExists` and keep the existing item
    Reject,
}

impl fmt::Display for CreatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreatePolicy::Overwrite => f.write_str("overwrite"),
            CreatePolicy::Reject => f.write_str("reject"),
        }
    }
}

impl FromStr for CreatePolicy {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CreatePolicy::Overwrite),
            "reject" => Ok(CreatePolicy::Reject),
            other => Err(ItemError::invalid(format!("Unknown create policy: {}", other))),
        }
    }
}

pub(super) async fn create_item(
    store: &dyn ItemStore,
    policy: CreatePolicy,
    body: Option<&Value>,
) -> ItemResult<OperationResponse> {
    let request = CreateItemRequest::parse(body)?;
    let item = Item::new(request.id, request.name, request.description);

    debug!(id = %item.id, %policy, backend = store.backend_type(), "putting item");

    match policy {
        CreatePolicy::Overwrite => store.put(&item).await?,
        CreatePolicy::Reject => {
            if !store.put_if_absent(&item).await? {
                return Err(ItemError::AlreadyExists(item.id));
            }
        }
    }

    Ok(OperationResponse::message(
        Status::Created,
        "Item created successfully",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryItemStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_stamps_created_at() {
        let store = MemoryItemStore::new();
        let before = chrono::Utc::now() - chrono::Duration::seconds(1);
        let body = json!({
            "id": "42",
            "name": "Widget",
            "createdAt": "1999-01-01T00:00:00Z"
        });

        let response = create_item(&store, CreatePolicy::Overwrite, Some(&body))
            .await
            .unwrap();
        assert_eq!(response.status, Status::Created);
        assert_eq!(response.message_text(), Some("Item created successfully"));

        let stored = store.get("42").await.unwrap().unwrap();
        assert!(stored.created_at >= before);
        assert_eq!(stored.description, None);
    }

    #[tokio::test]
    async fn test_create_overwrite_replaces() {
        let store = MemoryItemStore::new();
        let first = json!({"id": "1", "name": "First"});
        let second = json!({"id": "1", "name": "Second"});

        create_item(&store, CreatePolicy::Overwrite, Some(&first)).await.unwrap();
        create_item(&store, CreatePolicy::Overwrite, Some(&second)).await.unwrap();

        assert_eq!(store.get("1").await.unwrap().unwrap().name, "Second");
    }

    #[tokio::test]
    async fn test_create_reject_keeps_original() {
        let store = MemoryItemStore::new();
        let first = json!({"id": "1", "name": "First"});
        let second = json!({"id": "1", "name": "Second"});

        create_item(&store, CreatePolicy::Reject, Some(&first)).await.unwrap();
        let result = create_item(&store, CreatePolicy::Reject, Some(&second)).await;

        assert!(matches!(result, Err(ItemError::AlreadyExists(ref id)) if id == "1"));
        assert_eq!(store.get("1").await.unwrap().unwrap().name, "First");
    }

    #[tokio::test]
    async fn test_create_invalid_input_never_writes() {
        let store = MemoryItemStore::new();
        let body = json!({"id": "", "name": "Widget"});

        let result = create_item(&store, CreatePolicy::Overwrite, Some(&body)).await;
        assert!(matches!(result, Err(ItemError::InvalidInput(_))));
        assert!(store.is_empty().await);
    }

    #[test]
    fn test_create_policy_parsing() {
        assert_eq!("overwrite".parse::<CreatePolicy>().unwrap(), CreatePolicy::Overwrite);
        assert_eq!("REJECT".parse::<CreatePolicy>().unwrap(), CreatePolicy::Reject);
        assert!("merge".parse::<CreatePolicy>().is_err());
        assert_eq!(CreatePolicy::default(), CreatePolicy::Overwrite);
    }
}
