//! Structured operation responses.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::errors::ItemError;

/// Outcome classification of an operation, mapped onto HTTP status codes by `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// 200
    Ok,
    /// 201
    Created,
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 409
    Conflict,
    /// 500
    ServerError,
}

impl Status {
    /// HTTP status code
    pub fn code(&self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::Created => 201,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::Conflict => 409,
            Status::ServerError => 500,
        }
    }

    /// Whether the operation succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Status::Ok | Status::Created)
    }
}

/// What every operation hands back to the front end.
///
/// The body is a JSON object: a record, `{"message": ...}`, or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResponse {
    /// Status classification
    pub status: Status,
    /// JSON body
    pub body: Value,
}

impl OperationResponse {
    /// Response carrying a record or other payload
    pub fn record(status: Status, body: Value) -> Self {
        Self { status, body }
    }

    /// Response carrying `{"message": ...}`
    pub fn message<S: Into<String>>(status: Status, message: S) -> Self {
        Self {
            status,
            body: json!({ "message": message.into() }),
        }
    }

    /// Response carrying `{"error": ...}`
    pub fn error<S: Into<String>>(status: Status, error: S) -> Self {
        Self {
            status,
            body: json!({ "error": error.into() }),
        }
    }

    /// The `message` field of the body, if any
    pub fn message_text(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// The `error` field of the body, if any
    pub fn error_text(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

impl From<ItemError> for OperationResponse {
    fn from(err: ItemError) -> Self {
        let status = err.status();
        match err {
            ItemError::NotFound(_) => OperationResponse::message(status, "Item not found"),
            ItemError::InvalidInput(msg) => OperationResponse::error(status, msg),
            ItemError::AlreadyExists(id) => {
                OperationResponse::error(status, format!("Item {} already exists", id))
            }
            // Backend details go to the log, not to the caller.
            ItemError::Backend(_) => OperationResponse::error(status, "Internal store error"),
        }
    }
}
