//! End-to-end item lifecycle through `ItemHandlers` on the memory and file backends.

use async_trait::async_trait;
use itemstore::config::ConfigurationLoader;
use itemstore::handlers::{CreatePolicy, InboundRequest, ItemHandlers, Operation, Status};
use itemstore::model::{Item, ItemUpdate};
use itemstore::store::{
    FileItemStore, ItemStore, ItemStoreBuilder, MemoryItemStore, StoreError, StoreResult,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;

async fn widget_lifecycle(handlers: &ItemHandlers) {
    let created = handlers
        .handle(
            InboundRequest::new(Operation::Create)
                .with_body(json!({"id": "42", "name": "Widget", "description": "A widget"})),
        )
        .await;
    assert_eq!(created.status, Status::Created);
    assert_eq!(created.body, json!({"message": "Item created successfully"}));

    let read = handlers
        .handle(InboundRequest::new(Operation::Read).with_id("42"))
        .await;
    assert_eq!(read.status.code(), 200);
    assert_eq!(read.body["id"], "42");
    assert_eq!(read.body["name"], "Widget");
    assert_eq!(read.body["description"], "A widget");
    let created_at = read.body["createdAt"].as_str().unwrap().to_string();

    let updated = handlers
        .handle(
            InboundRequest::new(Operation::Update)
                .with_id("42")
                .with_body(json!({"name": "Widget2", "description": "Updated"})),
        )
        .await;
    assert_eq!(updated.status.code(), 200);
    assert_eq!(
        updated.body,
        json!({"id": "42", "name": "Widget2", "description": "Updated"})
    );

    let reread = handlers
        .handle(InboundRequest::new(Operation::Read).with_id("42"))
        .await;
    assert_eq!(reread.body["name"], "Widget2");
    assert_eq!(reread.body["createdAt"], created_at.as_str());

    let deleted = handlers
        .handle(InboundRequest::new(Operation::Delete).with_id("42"))
        .await;
    assert_eq!(deleted.status.code(), 200);
    assert_eq!(deleted.body, json!({"message": "Item deleted successfully"}));

    let gone = handlers
        .handle(InboundRequest::new(Operation::Read).with_id("42"))
        .await;
    assert_eq!(gone.status.code(), 404);
    assert_eq!(gone.body, json!({"message": "Item not found"}));
}

#[tokio::test]
async fn test_widget_lifecycle_memory() {
    let handlers = ItemHandlers::new(Arc::new(MemoryItemStore::new()));
    widget_lifecycle(&handlers).await;
}

#[tokio::test]
async fn test_widget_lifecycle_file() {
    let dir = tempdir().unwrap();
    let store = FileItemStore::new(dir.path()).unwrap();
    let handlers = ItemHandlers::new(Arc::new(store));
    widget_lifecycle(&handlers).await;
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = tempdir().unwrap();

    let first = ItemHandlers::new(Arc::new(FileItemStore::new(dir.path()).unwrap()));
    let response = first
        .create(Some(&json!({"id": "a/b", "name": "Nested"})))
        .await;
    assert_eq!(response.status, Status::Created);

    let second = ItemHandlers::new(Arc::new(FileItemStore::new(dir.path()).unwrap()));
    let read = second.read(Some("a/b")).await;
    assert_eq!(read.status, Status::Ok);
    assert_eq!(read.body["name"], "Nested");
}

#[tokio::test]
async fn test_update_missing_never_creates() {
    let handlers = ItemHandlers::new(Arc::new(MemoryItemStore::new()));

    let response = handlers
        .update(Some("ghost"), Some(&json!({"name": "Boo"})))
        .await;
    assert_eq!(response.status, Status::NotFound);
    assert_eq!(response.body, json!({"message": "Item not found"}));

    assert_eq!(handlers.read(Some("ghost")).await.status, Status::NotFound);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let handlers = ItemHandlers::new(Arc::new(MemoryItemStore::new()));
    handlers
        .create(Some(&json!({"id": "1", "name": "Once"})))
        .await;

    let first = handlers.delete(Some("1")).await;
    let second = handlers.delete(Some("1")).await;
    let never_existed = handlers.delete(Some("never")).await;

    assert_eq!(first, second);
    assert_eq!(second, never_existed);
    assert_eq!(never_existed.status, Status::Ok);
}

#[tokio::test]
async fn test_create_overwrite_resets_created_at() {
    let store = Arc::new(MemoryItemStore::new());
    let handlers = ItemHandlers::new(store.clone());

    handlers
        .create(Some(&json!({"id": "1", "name": "First", "description": "old"})))
        .await;
    let before = store.get("1").await.unwrap().unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    handlers
        .create(Some(&json!({"id": "1", "name": "Second"})))
        .await;
    let after = store.get("1").await.unwrap().unwrap();

    assert_eq!(after.name, "Second");
    assert_eq!(after.description, None);
    assert!(after.created_at > before.created_at);
}

#[tokio::test]
async fn test_reject_policy_on_file_backend() {
    let dir = tempdir().unwrap();
    let store = ItemStoreBuilder::new("file")
        .with_base_path(dir.path())
        .build()
        .await
        .unwrap();
    let handlers = ItemHandlers::new(store).with_create_policy(CreatePolicy::Reject);

    let first = handlers.create(Some(&json!({"id": "1", "name": "First"}))).await;
    assert_eq!(first.status, Status::Created);

    let second = handlers.create(Some(&json!({"id": "1", "name": "Second"}))).await;
    assert_eq!(second.status.code(), 409);
    assert_eq!(second.body, json!({"error": "Item 1 already exists"}));
    assert_eq!(handlers.read(Some("1")).await.body["name"], "First");
}

#[tokio::test]
async fn test_invalid_requests_are_bad_request() {
    let handlers = ItemHandlers::new(Arc::new(MemoryItemStore::new()));

    let cases = vec![
        InboundRequest::new(Operation::Create),
        InboundRequest::new(Operation::Create).with_body(json!("not an object")),
        InboundRequest::new(Operation::Create).with_body(json!({"id": "1"})),
        InboundRequest::new(Operation::Create).with_body(json!({"id": 1, "name": "x"})),
        InboundRequest::new(Operation::Read),
        InboundRequest::new(Operation::Update).with_id("1"),
        InboundRequest::new(Operation::Delete).with_id(""),
    ];

    for request in cases {
        let response = handlers.handle(request.clone()).await;
        assert_eq!(response.status, Status::BadRequest, "request: {:?}", request);
        assert!(response.body["error"].is_string());
    }
}

#[tokio::test]
async fn test_concurrent_creates_of_distinct_ids() {
    let dir = tempdir().unwrap();
    let handlers = ItemHandlers::new(Arc::new(FileItemStore::new(dir.path()).unwrap()));

    let mut tasks = Vec::new();
    for i in 0..16 {
        let handlers = handlers.clone();
        tasks.push(tokio::spawn(async move {
            handlers
                .create(Some(&json!({"id": format!("item-{i}"), "name": format!("Item {i}")})))
                .await
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap().status, Status::Created);
    }

    for i in 0..16 {
        let read = handlers.read(Some(&format!("item-{i}"))).await;
        assert_eq!(read.body["name"], format!("Item {i}"));
    }
}

struct FlakyStore;

#[async_trait]
impl ItemStore for FlakyStore {
    fn backend_type(&self) -> &'static str {
        "flaky"
    }

    async fn is_available(&self) -> bool {
        false
    }

    async fn put(&self, _item: &Item) -> StoreResult<()> {
        Err(StoreError::Backend("throttled".into()))
    }

    async fn put_if_absent(&self, _item: &Item) -> StoreResult<bool> {
        Err(StoreError::Backend("throttled".into()))
    }

    async fn get(&self, _key: &str) -> StoreResult<Option<Item>> {
        Err(StoreError::Backend("throttled".into()))
    }

    async fn update(&self, _key: &str, _changes: &ItemUpdate) -> StoreResult<Option<Item>> {
        Err(StoreError::Backend("throttled".into()))
    }

    async fn delete(&self, _key: &str) -> StoreResult<()> {
        Err(StoreError::Backend("throttled".into()))
    }
}

#[tokio::test]
async fn test_backend_failure_hides_detail() {
    let handlers = ItemHandlers::new(Arc::new(FlakyStore));

    let response = handlers.read(Some("42")).await;
    assert_eq!(response.status.code(), 500);
    assert_eq!(response.body, json!({"error": "Internal store error"}));
    assert!(!response.body.to_string().contains("throttled"));
}

#[tokio::test]
async fn test_handlers_from_config() {
    let dir = tempdir().unwrap();
    let mut config = ConfigurationLoader::default_config();
    config.store.backend = "file".to_string();
    config.store.base_path = Some(dir.path().to_string_lossy().to_string());
    config.handlers.create_policy = CreatePolicy::Reject;

    let handlers = ItemHandlers::from_config(&config).await.unwrap();
    assert_eq!(handlers.store().backend_type(), "file");
    assert_eq!(handlers.create_policy(), CreatePolicy::Reject);

    widget_lifecycle(&handlers).await;
}

#[tokio::test]
async fn test_unknown_backend_rejected() {
    let result = ItemStoreBuilder::new("redis").build().await;
    assert!(matches!(result, Err(StoreError::Configuration(_))));
}

#[tokio::test]
async fn test_long_ids_on_file_backend() {
    let dir = tempdir().unwrap();
    let handlers = ItemHandlers::new(Arc::new(FileItemStore::new(dir.path()).unwrap()));

    for id in ["x".repeat(300), "é".repeat(200), "日本".repeat(100)] {
        let created = handlers.create(Some(&json!({"id": id, "name": "W"}))).await;
        assert_eq!(created.status, Status::Created, "id of {} bytes", id.len());

        let read = handlers.read(Some(&id)).await;
        assert_eq!(read.status, Status::Ok);
        assert_eq!(read.body["id"], id.as_str());
    }
}
