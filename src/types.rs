//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines and summary block
    #[default]
    Text,
    /// One JSON object per run plus a summary object
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::parse(format!("Invalid output format: {}", other))),
        }
    }
}

/// Latency classification used for color coding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatencyLevel {
    /// Good latency (< 1 second)
    Good,
    /// Moderate latency (1-3 seconds)
    Moderate,
    /// Poor latency (> 3 seconds)
    Poor,
}

impl LatencyLevel {
    /// Classify a duration given in seconds
    pub fn from_seconds(secs: f64) -> Self {
        if secs < 1.0 {
            Self::Good
        } else if secs < 3.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}
