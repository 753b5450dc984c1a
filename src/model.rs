//! The item record and its mutable field set.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// A stored item.
///
/// `id` is the primary key of the backing store and never changes once the item is created.
/// `created_at` is assigned when the item is created and is never touched by an update.
///
/// The wire form is camelCase JSON:
///
/// ```json
/// {"id": "42", "name": "Widget", "description": "A widget", "createdAt": "2026-10-17T09:30:00.125Z"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique key of the item
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Creation timestamp (UTC, millisecond precision)
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Create a new item stamped with the current time.
    pub fn new(id: impl Into<String>, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    /// Apply an update to the mutable fields, leaving `id` and `created_at` alone.
    pub fn apply(&mut self, changes: &ItemUpdate) {
        self.name = changes.name.clone();
        self.description = Some(changes.description.clone());
    }

    /// The fields an update reports back to the caller.
    pub fn mutable_fields(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "description": self.description.clone().unwrap_or_default(),
        })
    }
}

/// New values for the mutable fields of an item.
///
/// Both fields are always written. A field the caller left out arrives here as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    /// New name
    pub name: String,
    /// New description
    pub description: String,
}
