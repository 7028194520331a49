//! Configuration data model and validation

use crate::defaults;
use crate::types::{AppError, OutputFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// File holding the curl command
    #[serde(default = "default_command_file")]
    pub command_file: PathBuf,

    /// Number of runs
    #[serde(default = "default_request_count")]
    pub request_count: u32,

    /// Pause between runs, in seconds
    #[serde(default = "default_interval_seconds")]
    pub interval_seconds: f64,

    /// Per-run timeout in seconds, 0 disables it
    #[serde(default)]
    pub timeout_seconds: u64,

    #[serde(default)]
    pub output_format: OutputFormat,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_file: default_command_file(),
            request_count: default_request_count(),
            interval_seconds: default_interval_seconds(),
            timeout_seconds: defaults::DEFAULT_TIMEOUT_SECONDS,
            output_format: OutputFormat::default(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Pause between runs. Invalid values collapse to zero; `validate` rejects them first.
    pub fn interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.interval_seconds).unwrap_or(Duration::ZERO)
    }

    /// Per-run timeout, if enabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }

    /// Lower bound of wall-clock time spent pausing between runs
    pub fn estimated_pause_time(&self) -> Duration {
        self.interval()
            .saturating_mul(self.request_count.saturating_sub(1))
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.command_file.as_os_str().is_empty() {
            return Err(AppError::config("Command file path cannot be empty"));
        }

        if self.request_count > defaults::MAX_REQUEST_COUNT {
            return Err(AppError::config(format!(
                "Request count cannot exceed {}",
                defaults::MAX_REQUEST_COUNT
            )));
        }

        if !self.interval_seconds.is_finite() || self.interval_seconds < 0.0 {
            return Err(AppError::config(format!(
                "Interval must be a non-negative number of seconds, got: {}",
                self.interval_seconds
            )));
        }

        if self.interval_seconds > defaults::MAX_INTERVAL_SECONDS {
            return Err(AppError::config(format!(
                "Interval cannot exceed {} seconds",
                defaults::MAX_INTERVAL_SECONDS
            )));
        }

        if self.timeout_seconds > defaults::MAX_TIMEOUT_SECONDS {
            return Err(AppError::config(format!(
                "Timeout cannot exceed {} seconds",
                defaults::MAX_TIMEOUT_SECONDS
            )));
        }

        Ok(())
    }

    /// Merge settings from an arbitrary key lookup (environment, tests)
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(command_file) = lookup("COMMAND_FILE") {
            let command_file = command_file.trim();
            if !command_file.is_empty() {
                self.command_file = PathBuf::from(command_file);
            }
        }

        if let Some(count) = lookup("REQUEST_COUNT") {
            self.request_count = count.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid REQUEST_COUNT value '{}': {}", count, e)))?;
        }

        if let Some(interval) = lookup("INTERVAL_SECONDS") {
            self.interval_seconds = interval.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid INTERVAL_SECONDS value '{}': {}", interval, e)))?;
        }

        if let Some(timeout) = lookup("TIMEOUT_SECONDS") {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e)))?;
        }

        if let Some(format) = lookup("OUTPUT_FORMAT") {
            self.output_format = format.parse()
                .map_err(|e| AppError::config(format!("Invalid OUTPUT_FORMAT value '{}': {}", format, e)))?;
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

// Default value functions for serde
fn default_command_file() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_COMMAND_FILE)
}

fn default_request_count() -> u32 {
    defaults::DEFAULT_REQUEST_COUNT
}

fn default_interval_seconds() -> f64 {
    defaults::DEFAULT_INTERVAL_SECONDS
}

fn default_enable_color() -> bool {
    true
}
