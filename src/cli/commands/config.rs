//! Config command implementation
//!
//! Prints the effective configuration after file and environment overrides.

use colored::*;

use crate::cli::error::CliResult;
use crate::config::ConfigurationLoader;

/// Dot-notation keys shown for each backend, in display order
fn summary_keys(backend: &str) -> Vec<&'static str> {
    let mut keys = vec!["service.name", "store.backend", "handlers.create_policy"];
    match backend {
        "file" | "filesystem" => keys.push("store.base_path"),
        "documentdb" | "mongodb" => {
            keys.extend(["store.connection_string", "store.database", "store.collection"])
        }
        _ => {}
    }
    keys.extend(["logging.log_file", "logging.log_level"]);
    keys
}

/// The `(key, value)` pairs `config` prints, with credentials redacted
pub fn config_summary(loader: &ConfigurationLoader) -> Vec<(&'static str, String)> {
    summary_keys(&loader.config.store.backend)
        .into_iter()
        .map(|key| {
            let value = loader.get_string(key);
            let value = if key == "store.connection_string" {
                redact(value.as_deref())
            } else {
                value.unwrap_or_else(|| "-".to_string())
            };
            (key, value)
        })
        .collect()
}

/// Show the effective configuration
pub fn config_show(loader: &ConfigurationLoader, as_json: bool) -> CliResult<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&loader.config)?);
        return Ok(());
    }

    let source = if loader.config_path.exists() {
        loader.config_path.display().to_string()
    } else {
        format!("{} (not found, using defaults)", loader.config_path.display())
    };

    println!("{}", "🔧 Configuration".bold());
    println!("  {:<26}{}", "config file", source);
    for (key, value) in config_summary(loader) {
        println!("  {:<26}{}", key, value.cyan());
    }

    Ok(())
}

/// Hide the credentials part of a connection string
fn redact(connection_string: Option<&str>) -> String {
    let Some(conn) = connection_string else {
        return "-".to_string();
    };

    match (conn.find("://"), conn.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &conn[..scheme_end], &conn[at..])
        }
        _ => conn.to_string(),
    }
}
