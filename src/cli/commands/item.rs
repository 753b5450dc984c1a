//! Item command implementation
//!
//! Sends one request through the handlers and records it in the operation log.

use serde_json::Value;
use std::collections::HashMap;

use crate::cli::error::CliResult;
use crate::cli::utils::{print_response, response_json};
use crate::handlers::{InboundRequest, ItemHandlers, OperationResponse, Status};
use crate::observability::Logger;

/// Run a single item request and print the response.
///
/// Returns the response so the caller can derive the exit code.
pub async fn run_item_command(
    handlers: &ItemHandlers,
    logger: &Logger,
    request: InboundRequest,
    as_json: bool,
) -> CliResult<OperationResponse> {
    let operation = request.operation;
    let id = request
        .id
        .clone()
        .or_else(|| {
            request
                .body
                .as_ref()
                .and_then(|b| b.get("id"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default();

    let response = handlers.handle(request).await;

    logger.log_operation(operation.as_str(), &id, &response)?;
    if response.status == Status::ServerError {
        let mut context = HashMap::new();
        context.insert("operation".to_string(), Value::from(operation.as_str()));
        context.insert("id".to_string(), Value::from(id.as_str()));
        context.insert(
            "backend".to_string(),
            Value::from(handlers.store().backend_type()),
        );
        logger.log_error("store backend failure", Some(&context))?;
    }

    if as_json {
        println!("{}", response_json(&response));
    } else {
        print_response(&response);
    }

    Ok(response)
}
