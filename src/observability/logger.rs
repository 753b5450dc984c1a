//! Markdown operation log.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::handlers::OperationResponse;

/// Logger for item operations.
///
/// Writes a markdown-formatted log file with one entry per handled request,
/// alongside service start/stop markers and errors.
#[derive(Debug)]
pub struct Logger {
    log_file: PathBuf,
    log_level: String,
}

impl Logger {
    /// Initialize logger.
    ///
    /// # Arguments
    /// * `log_file` - Path to log file. If None, creates a timestamped file in temp directory.
    /// * `log_level` - Logging level (defaults to "INFO").
    pub fn new(log_file: Option<&Path>, log_level: Option<&str>) -> Result<Self> {
        let log_file = match log_file {
            Some(p) => p.to_path_buf(),
            None => std::env::temp_dir().join("itemstore").join(format!(
                "itemstore_{}_{}.md",
                Utc::now().timestamp_millis(),
                std::process::id()
            )),
        };

        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }

        let logger = Self {
            log_file,
            log_level: log_level.unwrap_or("INFO").to_uppercase(),
        };

        if !logger.log_file.exists() {
            logger.initialize_log_file()?;
        }

        Ok(logger)
    }

    fn initialize_log_file(&self) -> Result<()> {
        let mut file = File::create(&self.log_file)
            .with_context(|| format!("Failed to create log file: {}", self.log_file.display()))?;

        let now: DateTime<Utc> = Utc::now();

        writeln!(file, "# Item Operation Log\n")?;
        writeln!(file, "Log started: {}\n", now.to_rfc3339())?;
        writeln!(file, "---\n")?;

        Ok(())
    }

    fn append_to_log(&self, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)
            .with_context(|| format!("Failed to open log file: {}", self.log_file.display()))?;

        write!(file, "{}", content).with_context(|| "Failed to write to log file")?;

        Ok(())
    }

    /// Log service start.
    ///
    /// # Arguments
    /// * `backend` - Store backend in use.
    /// * `config` - Effective settings worth recording.
    pub fn log_service_start(
        &self,
        backend: &str,
        config: &HashMap<String, serde_json::Value>,
    ) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!(
            "## Service Started - {}\n\n**Backend:** {}\n**Config:** {}\n\n",
            now.to_rfc3339(),
            backend,
            serde_json::to_string_pretty(config).unwrap_or_default()
        );

        self.append_to_log(&content)?;
        info!(backend, "service started");
        Ok(())
    }

    /// Log a handled operation and its response.
    pub fn log_operation(
        &self,
        operation: &str,
        id: &str,
        response: &OperationResponse,
    ) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let code = response.status.code();
        let outcome = response
            .message_text()
            .or_else(|| response.error_text())
            .unwrap_or("record returned");

        let mut content = format!(
            "### Operation - {}\n\n**Operation:** {}\n**Id:** `{}`\n**Status:** {}\n**Outcome:** {}\n\n",
            now.to_rfc3339(),
            operation,
            id,
            code,
            outcome
        );

        if self.log_level == "DEBUG" {
            content.push_str(&format!(
                "**Body:**\n```json\n{}\n```\n\n",
                serde_json::to_string_pretty(&response.body).unwrap_or_default()
            ));
        }

        self.append_to_log(&content)?;
        Ok(())
    }

    /// Log error with context.
    ///
    /// # Arguments
    /// * `error` - Error message.
    /// * `context` - Additional context information.
    pub fn log_error(
        &self,
        error: &str,
        context: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let mut content = format!(
            "### Error - {}\n\n**Error:** {}\n\n",
            now.to_rfc3339(),
            error
        );

        if let Some(ctx) = context {
            content.push_str(&format!(
                "**Context:** {}\n\n",
                serde_json::to_string_pretty(ctx).unwrap_or_default()
            ));
        }

        self.append_to_log(&content)?;
        error!(error, "logged error");
        Ok(())
    }

    /// Log service completion.
    pub fn log_completion(&self, reason: &str) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let content = format!(
            "### Service Stopped - {}\n\n**Reason:** {}\n\n---\n\n",
            now.to_rfc3339(),
            reason
        );

        self.append_to_log(&content)?;
        info!(reason, "service stopped");
        Ok(())
    }

    /// Log custom content.
    pub fn log_custom(&self, title: &str, content: &str, level: Option<&str>) -> Result<()> {
        let now: DateTime<Utc> = Utc::now();
        let log_content = format!("### {} - {}\n\n{}\n\n", title, now.to_rfc3339(), content);

        self.append_to_log(&log_content)?;

        match level.unwrap_or("INFO") {
            "ERROR" => error!(title, "{}", content),
            "WARN" => warn!(title, "{}", content),
            _ => info!(title, "{}", content),
        }

        Ok(())
    }

    /// Get the log file path.
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Get the log level.
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}
