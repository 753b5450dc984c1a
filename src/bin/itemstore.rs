//! `itemstore` command-line front end.

use clap::Parser;
use itemstore::cli::{display_error_with_suggestions, run, Cli};
use itemstore::config::ConfigurationLoader;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = ConfigurationLoader::new(cli.config.as_deref())
        .map(|loader| loader.config.logging.log_level.to_lowercase())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&log_level);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            display_error_with_suggestions(&e, "itemstore failed");
            2
        }
    };

    std::process::exit(code);
}

/// Diagnostics go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,itemstore={default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
