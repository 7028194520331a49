//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::types::OutputFormat;
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load the env file if it exists. Returns whether a file was loaded.
    pub fn load_env_file(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path)
            .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

        Ok(true)
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# Curl Latency Probe Configuration
#
# Values here are defaults for the probe; environment variables already set
# in the shell take precedence, and command-line arguments override both.

# File containing the curl command on a single line
# COMMAND_FILE=curl.txt

# Number of runs
# REQUEST_COUNT=120

# Pause between runs in seconds (fractions allowed)
# INTERVAL_SECONDS=0.5

# Kill a run after this many seconds (0 = no timeout)
# TIMEOUT_SECONDS=0

# Output format: text or json
# OUTPUT_FORMAT=text

# Enable colored output (true/false)
# ENABLE_COLOR=true

# Example configurations for different scenarios:
#
# Quick smoke test:
# REQUEST_COUNT=10
# INTERVAL_SECONDS=0.1
#
# Long-running soak test feeding a log collector:
# REQUEST_COUNT=10000
# INTERVAL_SECONDS=2
# TIMEOUT_SECONDS=10
# OUTPUT_FORMAT=json
"#.to_string()
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "COMMAND_FILE" => {
                if value.trim().is_empty() {
                    return Err(AppError::config("COMMAND_FILE cannot be empty"));
                }
            }
            "REQUEST_COUNT" => {
                let count: u32 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid REQUEST_COUNT value '{}': {}", value, e)))?;
                if count > crate::defaults::MAX_REQUEST_COUNT {
                    return Err(AppError::config(format!(
                        "REQUEST_COUNT must be at most {}, got: {}",
                        crate::defaults::MAX_REQUEST_COUNT,
                        count
                    )));
                }
            }
            "INTERVAL_SECONDS" => {
                let interval: f64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid INTERVAL_SECONDS value '{}': {}", value, e)))?;
                if !interval.is_finite() || !(0.0..=crate::defaults::MAX_INTERVAL_SECONDS).contains(&interval) {
                    return Err(AppError::config(format!(
                        "INTERVAL_SECONDS must be between 0 and {}, got: {}",
                        crate::defaults::MAX_INTERVAL_SECONDS,
                        value
                    )));
                }
            }
            "TIMEOUT_SECONDS" => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", value, e)))?;
                if timeout > crate::defaults::MAX_TIMEOUT_SECONDS {
                    return Err(AppError::config(format!(
                        "TIMEOUT_SECONDS must be between 0 and {}, got: {}",
                        crate::defaults::MAX_TIMEOUT_SECONDS,
                        timeout
                    )));
                }
            }
            "OUTPUT_FORMAT" => {
                value.parse::<OutputFormat>()?;
            }
            "ENABLE_COLOR" => {
                value.trim().parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("COMMAND_FILE", "File containing the curl command", "curl.txt"),
            ("REQUEST_COUNT", "Number of runs (0-100000)", "120"),
            ("INTERVAL_SECONDS", "Pause between runs in seconds (0-3600)", "0.5"),
            ("TIMEOUT_SECONDS", "Per-run timeout in seconds, 0 disables (0-3600)", "0"),
            ("OUTPUT_FORMAT", "Output format (text/json)", "text"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }
}
