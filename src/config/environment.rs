//! Environment variable loading and management.
//!
//! Store connection settings can be overridden per deployment through `ITEMSTORE_*` variables,
//! optionally loaded from a `.env` file.

use std::env;
use std::path::Path;
use tracing::warn;

/// Loads environment variables from .env file and system environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    env_file: Option<String>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to a .env file. Nothing is loaded when None.
    pub fn new(env_file: Option<&Path>) -> Self {
        // Only an explicit path is loaded, so stray .env files never leak into tests.
        if let Some(path) = env_file.filter(|p| p.exists()) {
            if let Err(e) = dotenv::from_path(path) {
                warn!(path = %path.display(), error = %e, "failed to load .env file");
            }
        }

        Self {
            env_file: env_file.map(|p| p.to_string_lossy().to_string()),
        }
    }

    /// The .env file this loader was given, if any
    pub fn env_file(&self) -> Option<&str> {
        self.env_file.as_deref()
    }

    /// Backend name override (`ITEMSTORE_BACKEND`)
    pub fn backend(&self) -> Option<String> {
        non_empty("ITEMSTORE_BACKEND")
    }

    /// File backend directory override (`ITEMSTORE_BASE_PATH`)
    pub fn base_path(&self) -> Option<String> {
        non_empty("ITEMSTORE_BASE_PATH")
    }

    /// Document database connection string (`ITEMSTORE_CONNECTION_STRING`)
    pub fn connection_string(&self) -> Option<String> {
        non_empty("ITEMSTORE_CONNECTION_STRING")
    }

    /// Document database name (`ITEMSTORE_DATABASE`)
    pub fn database(&self) -> Option<String> {
        non_empty("ITEMSTORE_DATABASE")
    }

    /// Table / collection name (`ITEMSTORE_TABLE`)
    pub fn table(&self) -> Option<String> {
        non_empty("ITEMSTORE_TABLE")
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
