//! Observability utilities for the item store service.
//!
//! Diagnostics go through `tracing`; this module adds a persistent markdown
//! operation log that records every handled request and its outcome.
//!
//! # Example
//!
//! ```no_run
//! use itemstore::handlers::{OperationResponse, Status};
//! use itemstore::observability::Logger;
//! use std::collections::HashMap;
//!
//! let logger = Logger::new(None, Some("DEBUG")).unwrap();
//!
//! let config = HashMap::new();
//! logger.log_service_start("file", &config).unwrap();
//!
//! let response = OperationResponse::message(Status::Created, "Item created successfully");
//! logger.log_operation("create", "42", &response).unwrap();
//!
//! logger.log_completion("Shutdown").unwrap();
//! ```

pub mod logger;

pub use logger::Logger;
