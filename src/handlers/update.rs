//! Update handler

use serde_json::Value;
use tracing::debug;

use super::errors::{ItemError, ItemResult};
use super::request::UpdateItemRequest;
use super::response::{OperationResponse, Status};
use crate::store::ItemStore;

pub(super) async fn update_item(
    store: &dyn ItemStore,
    id: Option<&str>,
    body: Option<&Value>,
) -> ItemResult<OperationResponse> {
    let request = UpdateItemRequest::parse(id, body)?;

    debug!(id = %request.id, backend = store.backend_type(), "updating item");

    let item = store
        .update(&request.id, &request.changes)
        .await?
        .ok_or(ItemError::NotFound(request.id))?;

    Ok(OperationResponse::record(Status::Ok, item.mutable_fields()))
}
