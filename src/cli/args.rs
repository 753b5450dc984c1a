//! Command-line arguments

use clap::{Parser, Subcommand};
use serde_json::{json, Map, Value};
use std::path::PathBuf;

use crate::handlers::{InboundRequest, Operation};

/// Command-line interface of the `itemstore` binary
#[derive(Parser, Debug)]
#[command(name = "itemstore")]
#[command(about = "Create, read, update and delete items in a keyed store", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to a .env file with ITEMSTORE_* overrides
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Print the raw {"status", "body"} response as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create (or replace) an item
    Create {
        /// Item id
        #[arg(long)]
        id: String,

        /// Item name
        #[arg(long)]
        name: String,

        /// Item description
        #[arg(long)]
        description: Option<String>,
    },

    /// Show an item
    Get {
        /// Item id
        id: String,
    },

    /// Overwrite an item's name and description
    Update {
        /// Item id
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: String,
    },

    /// Show the effective configuration
    Config,
}

impl Command {
    /// The handler request for an item command, `None` for `config`
    pub fn to_request(&self) -> Option<InboundRequest> {
        let request = match self {
            Command::Create {
                id,
                name,
                description,
            } => {
                let mut body = json!({"id": id, "name": name});
                if let Some(description) = description {
                    body["description"] = json!(description);
                }
                InboundRequest::new(Operation::Create).with_body(body)
            }
            Command::Get { id } => InboundRequest::new(Operation::Read).with_id(id.as_str()),
            Command::Update {
                id,
                name,
                description,
            } => {
                let mut body = Map::new();
                if let Some(name) = name {
                    body.insert("name".into(), json!(name));
                }
                if let Some(description) = description {
                    body.insert("description".into(), json!(description));
                }
                InboundRequest::new(Operation::Update)
                    .with_id(id.as_str())
                    .with_body(Value::Object(body))
            }
            Command::Delete { id } => {
                InboundRequest::new(Operation::Delete).with_id(id.as_str())
            }
            Command::Config => return None,
        };
        Some(request)
    }
}
