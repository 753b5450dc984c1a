//! Error types for item operations

use thiserror::Error;

use super::response::Status;
use crate::store::StoreError;

/// Result type for item operations
pub type ItemResult<T> = Result<T, ItemError>;

/// Errors that end an item operation
#[derive(Error, Debug)]
pub enum ItemError {
    /// A required field is missing or the request body is malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No item is stored under the requested id
    #[error("Item not found: {0}")]
    NotFound(String),

    /// An item is already stored under the id (only with the `reject` create policy)
    #[error("Item already exists: {0}")]
    AlreadyExists(String),

    /// The store failed to carry out the operation
    #[error("Store error: {0}")]
    Backend(#[from] StoreError),
}

impl ItemError {
    /// Create an invalid input error
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Response status for this error
    pub fn status(&self) -> Status {
        match self {
            ItemError::InvalidInput(_) => Status::BadRequest,
            ItemError::NotFound(_) => Status::NotFound,
            ItemError::AlreadyExists(_) => Status::Conflict,
            ItemError::Backend(_) => Status::ServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(ItemError::invalid("id is required").status(), Status::BadRequest);
        assert_eq!(ItemError::NotFound("42".into()).status(), Status::NotFound);
        assert_eq!(ItemError::AlreadyExists("42".into()).status(), Status::Conflict);
        assert_eq!(
            ItemError::from(StoreError::Connection("refused".into())).status(),
            Status::ServerError
        );
    }

    #[test]
    fn test_error_display() {
        let err = ItemError::from(StoreError::Backend("throttled".into()));
        assert_eq!(err.to_string(), "Store error: Backend error: throttled");

        let err = ItemError::NotFound("42".into());
        assert!(err.to_string().contains("42"));
    }
}
