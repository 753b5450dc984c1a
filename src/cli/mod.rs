//! CLI feature - the `itemstore` command-line front end
//!
//! The CLI is a thin front end over [`crate::handlers::ItemHandlers`]: each item
//! subcommand becomes one [`crate::handlers::InboundRequest`], and the resulting
//! [`crate::handlers::OperationResponse`] is printed either for a human
//! (coloured status line plus a table for records) or as raw JSON with `--json`.
//!
//! # Example
//!
//! ```rust,ignore
//! use clap::Parser;
//! use itemstore::cli::{run, Cli};
//!
//! let code = run(Cli::parse()).await?;
//! std::process::exit(code);
//! ```

pub mod args;
pub mod commands;
pub mod error;
pub mod runner;
pub mod utils;

pub use args::{Cli, Command};
pub use error::{CliError, CliResult};
pub use runner::run;
pub use utils::*;
