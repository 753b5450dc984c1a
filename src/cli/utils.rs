//! Shared output helpers for CLI commands

use colored::*;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde_json::{json, Value};

use crate::handlers::{OperationResponse, Status};

/// Render a response as `{"status": <code>, "body": ...}`
pub fn response_json(response: &OperationResponse) -> String {
    let value = json!({
        "status": response.status.code(),
        "body": response.body,
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

/// One-line coloured summary of a response
pub fn status_line(response: &OperationResponse) -> String {
    let label = format!("{} {}", response.status.code(), status_name(response.status));
    let label = if response.status.is_success() {
        format!("{} {}", "✓".green(), label.green().bold())
    } else if response.status == Status::ServerError {
        format!("{} {}", "✗".red(), label.red().bold())
    } else {
        format!("{} {}", "!".yellow(), label.yellow().bold())
    };

    match response.message_text().or_else(|| response.error_text()) {
        Some(text) => format!("{}  {}", label, text),
        None => label,
    }
}

/// Two-column field/value table for a record body
pub fn record_table(record: &Value) -> Option<Table> {
    let fields = record.as_object()?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);

    for (key, value) in fields {
        let value = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        table.add_row(vec![key.clone(), value]);
    }

    Some(table)
}

/// Print a response for a human reader
pub fn print_response(response: &OperationResponse) {
    let line = status_line(response);
    if response.status.is_success() {
        println!("{}", line);
    } else {
        eprintln!("{}", line);
    }

    let is_record = response.message_text().is_none() && response.error_text().is_none();
    if is_record {
        if let Some(table) = record_table(&response.body) {
            println!("{}", table);
        }
    }
}

/// Display a user-friendly error message with suggestions
pub fn display_error_with_suggestions<E: std::fmt::Display>(error: &E, context: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), context);
    eprintln!("   {}", error.to_string().red());

    let error_str = error.to_string().to_lowercase();
    if error_str.contains("unknown backend") || error_str.contains("storage-documentdb") {
        eprintln!("{}", "💡 Suggestions:".blue());
        eprintln!("   • Set [store] backend to memory, file or documentdb");
        eprintln!("   • Check the ITEMSTORE_BACKEND environment variable");
    } else if error_str.contains("permission denied") {
        eprintln!("{}", "💡 Suggestions:".blue());
        eprintln!("   • Check permissions on the [store] base_path directory");
        eprintln!("   • Point ITEMSTORE_BASE_PATH at a writable directory");
    } else if error_str.contains("connection") {
        eprintln!("{}", "💡 Suggestions:".blue());
        eprintln!("   • Check that the document database is reachable");
        eprintln!("   • Verify ITEMSTORE_CONNECTION_STRING");
    }
}

fn status_name(status: Status) -> &'static str {
    match status {
        Status::Ok => "OK",
        Status::Created => "Created",
        Status::BadRequest => "Bad Request",
        Status::NotFound => "Not Found",
        Status::Conflict => "Conflict",
        Status::ServerError => "Internal Server Error",
    }
}
