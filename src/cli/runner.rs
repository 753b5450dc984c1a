//! CLI runner
//!
//! Loads configuration, opens the configured store and dispatches the parsed command.

use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::cli::args::{Cli, Command};
use crate::cli::commands::{config::config_show, item::run_item_command};
use crate::cli::error::{CliError, CliResult};
use crate::config::{ConfigurationLoader, EnvironmentLoader};
use crate::handlers::{ItemError, ItemHandlers};
use crate::observability::Logger;

/// Run the parsed command line and return the process exit code.
///
/// Item commands exit with 0 for a 2xx response and 1 otherwise.
pub async fn run(cli: Cli) -> CliResult<i32> {
    let env = EnvironmentLoader::new(cli.env_file.as_deref());
    let loader = ConfigurationLoader::new(cli.config.as_deref())?.with_environment(&env);

    let request = match cli.command {
        Command::Config => {
            config_show(&loader, cli.json)?;
            return Ok(0);
        }
        ref command => command
            .to_request()
            .ok_or_else(|| CliError::InvalidInput("command carries no request".to_string()))?,
    };
    let operation = request.operation;

    let config = &loader.config;
    let handlers = ItemHandlers::from_config(config).await.map_err(|e| match e {
        ItemError::Backend(store) => CliError::from(store),
        other => CliError::ConfigError(other.to_string()),
    })?;
    debug!(
        backend = handlers.store().backend_type(),
        policy = %handlers.create_policy(),
        "store opened"
    );

    let logger = Logger::new(
        Some(Path::new(&config.logging.log_file)),
        Some(&config.logging.log_level),
    )?;

    let mut settings = HashMap::new();
    settings.insert("service".to_string(), Value::from(config.service.name.as_str()));
    settings.insert(
        "create_policy".to_string(),
        Value::from(config.handlers.create_policy.to_string()),
    );
    logger.log_service_start(handlers.store().backend_type(), &settings)?;

    let available = handlers.store().is_available().await;
    logger.log_custom(
        "Store Check",
        &format!(
            "**Backend:** {}\n**Available:** {}",
            handlers.store().backend_type(),
            available
        ),
        Some(if available { "INFO" } else { "WARN" }),
    )?;

    let response = run_item_command(&handlers, &logger, request, cli.json).await?;

    logger.log_completion(&format!(
        "{} finished with status {}",
        operation,
        response.status.code()
    ))?;

    Ok(if response.status.is_success() { 0 } else { 1 })
}
