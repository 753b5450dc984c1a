//! TOML configuration parsing and management.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::environment::EnvironmentLoader;
use crate::handlers::CreatePolicy;
use crate::store::ItemStoreBuilder;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/itemstore.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub service: ServiceConfig,
    pub store: StoreConfig,
    #[serde(default)]
    pub handlers: HandlersConfig,
    pub logging: LoggingConfig,
}

/// Service identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

/// Store backend selection and connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// memory | file | documentdb
    pub backend: String,
    /// Directory for the file backend
    pub base_path: Option<String>,
    pub connection_string: Option<String>,
    pub database: Option<String>,
    pub collection: Option<String>,
}

impl StoreConfig {
    /// A builder carrying every configured option for the selected backend
    pub fn builder(&self) -> ItemStoreBuilder {
        let mut builder = ItemStoreBuilder::new(&self.backend);
        let options = [
            ("base_path", &self.base_path),
            ("connection_string", &self.connection_string),
            ("database", &self.database),
            ("collection", &self.collection),
        ];
        for (key, value) in options {
            if let Some(value) = value {
                builder = builder.with_option(key, value);
            }
        }
        builder
    }
}

/// Handler behaviour
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandlersConfig {
    #[serde(default)]
    pub create_policy: CreatePolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_file: String,
    pub log_level: String,
}

/// Loads and manages TOML configuration.
#[derive(Debug)]
pub struct ConfigurationLoader {
    pub config_path: PathBuf,
    pub config: Configuration,
}

impl ConfigurationLoader {
    /// Initialize configuration loader.
    ///
    /// # Arguments
    /// * `config_path` - Path to TOML config file. If None, uses `config/itemstore.toml`
    ///   when present and built-in defaults otherwise.
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        let config = if config_path.exists() {
            Self::load_config(&config_path)?
        } else {
            Self::default_config()
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Create a configuration loader from a pre-parsed Configuration.
    pub fn from_config(config: Configuration) -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            config,
        }
    }

    /// Apply `ITEMSTORE_*` overrides on top of the loaded file.
    pub fn with_environment(mut self, env: &EnvironmentLoader) -> Self {
        let store = &mut self.config.store;
        if let Some(backend) = env.backend() {
            store.backend = backend;
        }
        if let Some(base_path) = env.base_path() {
            store.base_path = Some(base_path);
        }
        if let Some(connection_string) = env.connection_string() {
            store.connection_string = Some(connection_string);
        }
        if let Some(database) = env.database() {
            store.database = Some(database);
        }
        if let Some(table) = env.table() {
            store.collection = Some(table);
        }
        self
    }

    /// Load configuration from TOML file.
    fn load_config(path: &Path) -> Result<Configuration> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
    }

    /// Get default configuration.
    pub fn default_config() -> Configuration {
        let data_dir = dirs::data_dir().unwrap_or_else(std::env::temp_dir);

        Configuration {
            service: ServiceConfig {
                name: "itemstore".to_string(),
            },
            store: StoreConfig {
                backend: "file".to_string(),
                base_path: Some(
                    data_dir
                        .join("itemstore")
                        .join("items")
                        .to_string_lossy()
                        .to_string(),
                ),
                connection_string: Some("mongodb://localhost:27017".to_string()),
                database: Some("itemstore".to_string()),
                collection: Some("items".to_string()),
            },
            handlers: HandlersConfig::default(),
            logging: LoggingConfig {
                log_file: std::env::temp_dir()
                    .join("itemstore")
                    .join(format!(
                        "itemstore_{}_{}.md",
                        Utc::now().timestamp_millis(),
                        std::process::id()
                    ))
                    .to_string_lossy()
                    .to_string(),
                log_level: "INFO".to_string(),
            },
        }
    }

    /// Get configuration value by dot-notation key.
    pub fn get_string(&self, key: &str) -> Option<String> {
        let config = &self.config;
        match key {
            "service.name" => Some(config.service.name.clone()),
            "store.backend" => Some(config.store.backend.clone()),
            "store.base_path" => config.store.base_path.clone(),
            "store.connection_string" => config.store.connection_string.clone(),
            "store.database" => config.store.database.clone(),
            "store.collection" => config.store.collection.clone(),
            "handlers.create_policy" => Some(config.handlers.create_policy.to_string()),
            "logging.log_file" => Some(config.logging.log_file.clone()),
            "logging.log_level" => Some(config.logging.log_level.clone()),
            _ => None,
        }
    }
}
