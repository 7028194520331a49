//! Structured logging for the latency probe
//!
//! This module provides:
//! - Leveled logging with a minimum level derived from `--verbose`/`--debug`
//! - Console and JSON output formats
//! - A per-process session ID attached to every entry
//! - Builder-style structured fields serialized with serde_json
//!
//! All entries go to stderr so stdout only carries probe results.

use crate::error::AppError;
use crate::models::{Config, RunRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Debug level - detailed information for debugging
    Debug = 0,
    /// Info level - general application information
    Info = 1,
    /// Warning level - potentially harmful situations
    Warn = 2,
    /// Error level - error events but application can continue
    Error = 3,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Debug => "\x1b[36m",    // Cyan
            LogLevel::Info => "\x1b[32m",     // Green
            LogLevel::Warn => "\x1b[33m",     // Yellow
            LogLevel::Error => "\x1b[31m",    // Red
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Logger name/component
    pub logger: String,
    pub session_id: String,
    /// Additional structured fields
    pub fields: BTreeMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
}

/// Logger implementation with multiple output formats
#[derive(Debug, Clone)]
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
    name: String,
    session_id: String,
}

impl Logger {
    /// Create a new logger at Info level
    pub fn new(name: &str) -> Self {
        Self {
            min_level: LogLevel::Info,
            use_color: false,
            format: LogFormat::Console,
            name: name.to_string(),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger with level and format derived from the configuration
    pub fn with_config(name: &str, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color,
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            name: name.to_string(),
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Derive a logger for another component sharing this session
    pub fn child(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    /// Convenience methods for different log levels
    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    /// Render an entry in the configured format
    pub fn format_entry(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Console => self.format_console(entry),
            LogFormat::Json => self.format_json(entry),
        }
    }

    fn write_entry(&self, entry: LogEntry) {
        if !self.would_log(entry.level) {
            return;
        }

        let output = self.format_entry(&entry);
        let _ = writeln!(io::stderr(), "{}", output);
    }

    /// Format log entry for console output
    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}",
            timestamp,
            formatted_level,
            entry.logger,
            entry.message
        );

        if !entry.fields.is_empty() {
            let fields_str: Vec<String> = entry.fields.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            output.push_str(&format!(" {{{}}}", fields_str.join(", ")));
        }

        output
    }

    /// Format log entry as JSON
    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": {:?}}}", entry.message),
        }
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                session_id: logger.session_id.clone(),
                fields: BTreeMap::new(),
            },
        }
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add run information
    pub fn run(self, record: &RunRecord) -> Self {
        let builder = self
            .field("run", record.index)
            .field("success", record.outcome.is_success());
        match record.outcome.duration() {
            Some(seconds) => builder.field("seconds", seconds),
            None => builder,
        }
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_exit_code", error.exit_code())
    }

    /// Finished entry without writing it
    pub fn build(self) -> LogEntry {
        self.entry
    }

    /// Finalize and write the log entry
    pub fn log(self) {
        self.logger.write_entry(self.entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunOutcome;

    #[test]
    fn test_level_from_config() {
        let mut config = Config::default();
        assert!(!Logger::with_config("test", &config).would_log(LogLevel::Info));

        config.verbose = true;
        let logger = Logger::with_config("test", &config);
        assert!(logger.would_log(LogLevel::Info));
        assert!(!logger.would_log(LogLevel::Debug));

        config.debug = true;
        assert!(Logger::with_config("test", &config).would_log(LogLevel::Debug));
    }

    #[test]
    fn test_child_shares_session() {
        let logger = Logger::new("app");
        let child = logger.child("runner");
        assert_eq!(logger.session_id, child.session_id);
        let entry = child.info("hello").build();
        assert_eq!(entry.logger, "runner");
    }

    #[test]
    fn test_console_format() {
        let logger = Logger::new("runner");
        let entry = logger.warn("run failed").field("run", 3).build();
        let line = logger.format_entry(&entry);

        assert!(line.contains(" WARN [runner] run failed"));
        assert!(line.contains("{run=3}"));
    }

    #[test]
    fn test_json_format() {
        let config = Config {
            debug: true,
            ..Config::default()
        };
        let logger = Logger::with_config("runner", &config);

        let record = RunRecord::new(2, RunOutcome::success(0.25));
        let entry = logger.debug("run finished").run(&record).build();
        let parsed: serde_json::Value = serde_json::from_str(&logger.format_entry(&entry)).unwrap();

        assert_eq!(parsed["level"], "Debug");
        assert_eq!(parsed["fields"]["run"], 2);
        assert_eq!(parsed["fields"]["seconds"], 0.25);
        assert_eq!(parsed["session_id"], logger.session_id);
    }

    #[test]
    fn test_error_fields() {
        let logger = Logger::new("run_loop");
        let entry = logger
            .error("stopping early")
            .error_info(&AppError::io("broken pipe"))
            .build();

        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.fields["error_category"], "IO");
        assert_eq!(entry.fields["error_exit_code"], 5);
        assert!(logger.format_entry(&entry).contains("ERROR [run_loop] stopping early"));
    }
}
