//! Item Operation Handlers
//!
//! Four stateless handlers (create, read, update, delete) sit between a front end and the
//! keyed store. Each one validates its input, makes exactly one store call and turns the outcome
//! into an [`OperationResponse`]. Handlers never return an error to the front end: every failure
//! is folded into a response with a status and an `error` or `message` field.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use itemstore::handlers::{InboundRequest, ItemHandlers, Operation};
//! use itemstore::store::MemoryItemStore;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! async fn example() {
//!     let handlers = ItemHandlers::new(Arc::new(MemoryItemStore::new()));
//!
//!     let created = handlers
//!         .create(Some(&json!({"id": "42", "name": "Widget"})))
//!         .await;
//!     assert_eq!(created.status.code(), 201);
//!
//!     let read = handlers
//!         .handle(InboundRequest::new(Operation::Read).with_id("42"))
//!         .await;
//!     assert_eq!(read.body["name"], "Widget");
//! }
//! ```

mod create;
mod delete;
pub mod errors;
mod read;
pub mod request;
pub mod response;
mod update;

use serde_json::Value;
use std::sync::{Arc, OnceLock};
use tracing::{error, info, warn};

pub use create::CreatePolicy;
pub use errors::{ItemError, ItemResult};
pub use request::{CreateItemRequest, InboundRequest, Operation, UpdateItemRequest};
pub use response::{OperationResponse, Status};

use crate::store::ItemStore;

static GLOBAL_HANDLERS: OnceLock<ItemHandlers> = OnceLock::new();

/// The item operation handlers bound to a shared store handle.
///
/// Cloning is cheap; all clones share the same store client.
#[derive(Clone)]
pub struct ItemHandlers {
    store: Arc<dyn ItemStore>,
    create_policy: CreatePolicy,
}

impl ItemHandlers {
    /// Create handlers over `store` with the default (overwrite) create policy
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            create_policy: CreatePolicy::default(),
        }
    }

    /// Set the create policy
    pub fn with_create_policy(mut self, policy: CreatePolicy) -> Self {
        self.create_policy = policy;
        self
    }

    /// Build handlers from configuration, connecting to the configured backend
    #[cfg(feature = "config")]
    pub async fn from_config(config: &crate::config::Configuration) -> ItemResult<Self> {
        let store = config.store.builder().build().await?;
        Ok(Self::new(store).with_create_policy(config.handlers.create_policy))
    }

    /// The shared store handle
    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    /// The active create policy
    pub fn create_policy(&self) -> CreatePolicy {
        self.create_policy
    }

    /// Route a front-end request to the matching handler
    pub async fn handle(&self, request: InboundRequest) -> OperationResponse {
        let id = request.id.as_deref();
        let body = request.body.as_ref();

        match request.operation {
            Operation::Create => self.create(body).await,
            Operation::Read => self.read(id).await,
            Operation::Update => self.update(id, body).await,
            Operation::Delete => self.delete(id).await,
        }
    }

    /// Create an item from `{id, name, description}`
    pub async fn create(&self, body: Option<&Value>) -> OperationResponse {
        let id = body
            .and_then(|b| b.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let result = create::create_item(self.store.as_ref(), self.create_policy, body).await;
        finish(Operation::Create, id.as_deref(), result)
    }

    /// Read the item stored under `id`
    pub async fn read(&self, id: Option<&str>) -> OperationResponse {
        let result = read::read_item(self.store.as_ref(), id).await;
        finish(Operation::Read, id, result)
    }

    /// Overwrite `name` and `description` of the item stored under `id`
    pub async fn update(&self, id: Option<&str>, body: Option<&Value>) -> OperationResponse {
        let result = update::update_item(self.store.as_ref(), id, body).await;
        finish(Operation::Update, id, result)
    }

    /// Delete the item stored under `id`
    pub async fn delete(&self, id: Option<&str>) -> OperationResponse {
        let result = delete::delete_item(self.store.as_ref(), id).await;
        finish(Operation::Delete, id, result)
    }
}

fn finish(
    operation: Operation,
    id: Option<&str>,
    result: ItemResult<OperationResponse>,
) -> OperationResponse {
    let id = id.unwrap_or("");

    match result {
        Ok(response) => {
            info!(%operation, id, status = response.status.code(), "item operation completed");
            response
        }
        Err(err) => {
            match &err {
                ItemError::Backend(cause) => {
                    error!(%operation, id, error = %cause, "item operation failed")
                }
                _ => warn!(%operation, id, error = %err, "item operation rejected"),
            }
            err.into()
        }
    }
}

/// Install the process-wide handlers. Call once at startup.
///
/// Returns the handlers back if they were already installed.
pub fn init_global(handlers: ItemHandlers) -> Result<(), ItemHandlers> {
    GLOBAL_HANDLERS.set(handlers)
}

/// The process-wide handlers, if installed
pub fn global() -> Option<&'static ItemHandlers> {
    GLOBAL_HANDLERS.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, ItemUpdate};
    use crate::store::{MemoryItemStore, StoreError, StoreResult};
    use async_trait::async_trait;
    use serde_json::json;

    /// A store whose every call fails, as if the backend were unreachable.
    struct UnreachableStore;

    #[async_trait]
    impl ItemStore for UnreachableStore {
        fn backend_type(&self) -> &'static str {
            "unreachable"
        }

        async fn is_available(&self) -> bool {
            false
        }

        async fn put(&self, _item: &Item) -> StoreResult<()> {
            Err(StoreError::Connection("connection refused".into()))
        }

        async fn put_if_absent(&self, _item: &Item) -> StoreResult<bool> {
            Err(StoreError::Connection("connection refused".into()))
        }

        async fn get(&self, _key: &str) -> StoreResult<Option<Item>> {
            Err(StoreError::Connection("connection refused".into()))
        }

        async fn update(&self, _key: &str, _changes: &ItemUpdate) -> StoreResult<Option<Item>> {
            Err(StoreError::Connection("connection refused".into()))
        }

        async fn delete(&self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Connection("connection refused".into()))
        }
    }

    fn memory_handlers() -> ItemHandlers {
        ItemHandlers::new(Arc::new(MemoryItemStore::new()))
    }

    #[tokio::test]
    async fn test_widget_scenario() {
        let handlers = memory_handlers();

        let created = handlers
            .create(Some(&json!({"id": "42", "name": "Widget", "description": "A widget"})))
            .await;
        assert_eq!(created.status, Status::Created);
        assert!(created.message_text().is_some());

        let read = handlers.read(Some("42")).await;
        assert_eq!(read.status, Status::Ok);
        assert_eq!(read.body["id"], "42");
        assert_eq!(read.body["name"], "Widget");
        assert_eq!(read.body["description"], "A widget");
        let created_at = read.body["createdAt"].clone();
        assert!(created_at.is_string());

        let updated = handlers
            .update(Some("42"), Some(&json!({"name": "Widget2", "description": "Updated"})))
            .await;
        assert_eq!(updated.status, Status::Ok);
        assert_eq!(updated.body["name"], "Widget2");

        let reread = handlers.read(Some("42")).await;
        assert_eq!(reread.body["createdAt"], created_at);

        let deleted = handlers.delete(Some("42")).await;
        assert_eq!(deleted.status, Status::Ok);

        let gone = handlers.read(Some("42")).await;
        assert_eq!(gone.status, Status::NotFound);
    }

    #[tokio::test]
    async fn test_handle_routes_by_operation() {
        let handlers = memory_handlers();

        let response = handlers
            .handle(
                InboundRequest::new(Operation::Create)
                    .with_body(json!({"id": "7", "name": "Gadget"})),
            )
            .await;
        assert_eq!(response.status.code(), 201);

        let response = handlers
            .handle(InboundRequest::new(Operation::Read).with_id("7"))
            .await;
        assert_eq!(response.body["name"], "Gadget");

        let response = handlers
            .handle(InboundRequest::new(Operation::Delete).with_id("7"))
            .await;
        assert_eq!(response.status.code(), 200);
    }

    #[tokio::test]
    async fn test_backend_fault_is_server_error() {
        let handlers = ItemHandlers::new(Arc::new(UnreachableStore));

        let responses = vec![
            handlers.create(Some(&json!({"id": "1", "name": "x"}))).await,
            handlers.read(Some("1")).await,
            handlers.update(Some("1"), Some(&json!({"name": "y"}))).await,
            handlers.delete(Some("1")).await,
        ];

        for response in responses {
            assert_eq!(response.status, Status::ServerError);
            assert!(response.error_text().is_some());
        }
    }

    #[tokio::test]
    async fn test_invalid_input_is_checked_before_backend() {
        // The unreachable store would turn any store call into a 500.
        let handlers = ItemHandlers::new(Arc::new(UnreachableStore));

        let response = handlers.create(Some(&json!({"name": "x"}))).await;
        assert_eq!(response.status, Status::BadRequest);

        let response = handlers.read(Some("")).await;
        assert_eq!(response.status, Status::BadRequest);

        let response = handlers.update(None, Some(&json!({}))).await;
        assert_eq!(response.status, Status::BadRequest);

        let response = handlers.delete(None).await;
        assert_eq!(response.status, Status::BadRequest);
    }

    #[tokio::test]
    async fn test_reject_policy_conflict() {
        let handlers = memory_handlers().with_create_policy(CreatePolicy::Reject);
        let body = json!({"id": "1", "name": "First"});

        assert_eq!(handlers.create(Some(&body)).await.status, Status::Created);

        let response = handlers.create(Some(&json!({"id": "1", "name": "Second"}))).await;
        assert_eq!(response.status, Status::Conflict);
        assert_eq!(handlers.read(Some("1")).await.body["name"], "First");
    }

    #[tokio::test]
    async fn test_global_handlers_install_once() {
        let first = memory_handlers();
        let _ = init_global(first);
        assert!(global().is_some());
        assert!(init_global(memory_handlers()).is_err());
    }
}
