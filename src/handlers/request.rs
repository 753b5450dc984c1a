//! Inbound requests and their validated per-operation forms.
//!
//! The front end hands over an operation, an optional path id and an optional JSON body. Each
//! handler turns that into one of the typed requests below before the store is touched; anything
//! that does not fit is rejected with `ItemError::InvalidInput`.

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::errors::{ItemError, ItemResult};
use crate::model::ItemUpdate;

/// The four item operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create an item
    Create,
    /// Read an item
    Read,
    /// Update an item's mutable fields
    Update,
    /// Delete an item
    Delete,
}

impl Operation {
    /// Map an HTTP method onto an operation
    pub fn from_method(method: &str) -> Option<Self> {
        match method.to_ascii_uppercase().as_str() {
            "POST" => Some(Operation::Create),
            "GET" => Some(Operation::Read),
            "PUT" | "PATCH" => Some(Operation::Update),
            "DELETE" => Some(Operation::Delete),
            _ => None,
        }
    }

    /// Lowercase operation name
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Operation::Create),
            "read" | "get" => Ok(Operation::Read),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            other => Err(ItemError::invalid(format!("Unknown operation: {}", other))),
        }
    }
}

/// A request as parsed by the front end
#[derive(Debug, Clone, PartialEq)]
pub struct InboundRequest {
    /// Operation to run
    pub operation: Operation,
    /// Path parameter `id`
    pub id: Option<String>,
    /// Parsed JSON body
    pub body: Option<Value>,
}

impl InboundRequest {
    /// Create a request with no path id or body
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            id: None,
            body: None,
        }
    }

    /// Set the path id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Validated input of a create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItemRequest {
    /// Item id (non-empty)
    pub id: String,
    /// Item name (non-empty)
    pub name: String,
    /// Optional description
    pub description: Option<String>,
}

impl CreateItemRequest {
    /// Validate a create body. A `createdAt` in the body is ignored.
    pub fn parse(body: Option<&Value>) -> ItemResult<Self> {
        let fields = body_object(body)?;

        Ok(Self {
            id: required_field(fields, "id")?,
            name: required_field(fields, "name")?,
            description: optional_field(fields, "description")?,
        })
    }
}

/// Validated input of an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateItemRequest {
    /// Item id from the path
    pub id: String,
    /// New field values; omitted fields are empty strings
    pub changes: ItemUpdate,
}

impl UpdateItemRequest {
    /// Validate an update from its path id and body
    pub fn parse(id: Option<&str>, body: Option<&Value>) -> ItemResult<Self> {
        let id = require_id(id)?;
        let fields = body_object(body)?;

        Ok(Self {
            id,
            changes: ItemUpdate {
                name: optional_field(fields, "name")?.unwrap_or_default(),
                description: optional_field(fields, "description")?.unwrap_or_default(),
            },
        })
    }
}

/// Validate a path id
pub fn require_id(id: Option<&str>) -> ItemResult<String> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id.to_string()),
        _ => Err(ItemError::invalid("id is required")),
    }
}

fn body_object(body: Option<&Value>) -> ItemResult<&Map<String, Value>> {
    match body {
        Some(Value::Object(fields)) => Ok(fields),
        Some(_) => Err(ItemError::invalid("request body must be a JSON object")),
        None => Err(ItemError::invalid("request body is required")),
    }
}

fn required_field(fields: &Map<String, Value>, name: &str) -> ItemResult<String> {
    match optional_field(fields, name)? {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ItemError::invalid(format!("{} is required", name))),
    }
}

fn optional_field(fields: &Map<String, Value>, name: &str) -> ItemResult<Option<String>> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ItemError::invalid(format!("{} must be a string", name))),
    }
}
