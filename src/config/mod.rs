//! Configuration management for the item store service.
//!
//! This module provides configuration loading through TOML files and
//! environment variable overrides via `.env` files.
//!
//! # Example
//!
//! ```no_run
//! use itemstore::config::{ConfigurationLoader, EnvironmentLoader};
//! use std::path::Path;
//!
//! let env = EnvironmentLoader::new(None);
//! let loader = ConfigurationLoader::new(Some(Path::new("config/itemstore.toml")))
//!     .unwrap()
//!     .with_environment(&env);
//!
//! println!("Backend: {}", loader.config.store.backend);
//! println!("Create policy: {}", loader.config.handlers.create_policy);
//! ```

#[allow(clippy::module_inception)]
pub mod config;
pub mod environment;

pub use self::config::{
    Configuration, ConfigurationLoader, HandlersConfig, LoggingConfig, ServiceConfig,
    StoreConfig, DEFAULT_CONFIG_PATH,
};
pub use self::environment::EnvironmentLoader;
