//! Configuration validation utilities and rules

use crate::{
    models::Config,
    error::Result,
    types::OutputFormat,
};
use std::fmt;
use std::time::Duration;

/// Estimated pause time above which a long-run warning is emitted
const LONG_RUN_THRESHOLD: Duration = Duration::from_secs(3600);

/// Configuration validator with advisory rules on top of `Config::validate`
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration and collect advisory warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_sampling(config));
        warnings.extend(Self::validate_output(config));

        Ok(warnings)
    }

    /// Check that the run count and interval produce meaningful statistics
    fn validate_sampling(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let count = config.request_count;

        if count == 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Request count is 0, no requests will be issued".to_string(),
            ));
        } else if count < 3 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Request count of {} may not provide reliable statistics (recommended: >= 3)", count),
            ));
        } else if count < 100 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("With {} samples TP99 is interpolated between the two slowest requests", count),
            ));
        }

        if count > 1 && config.interval_seconds == 0.0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                "Interval is 0, requests will be issued back to back".to_string(),
            ));
        }

        let pause = config.estimated_pause_time();
        if pause > LONG_RUN_THRESHOLD {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Configuration will pause for at least {:.1} hours between requests",
                    pause.as_secs_f64() / 3600.0
                ),
            ));
        }

        if let Some(timeout) = config.timeout() {
            if timeout.as_secs_f64() > config.interval_seconds.max(1.0) * 20.0 {
                warnings.push(ValidationWarning::new(
                    ValidationLevel::Info,
                    format!("Timeout of {}s will slow down failure detection", timeout.as_secs()),
                ));
            }
        }

        warnings
    }

    /// Check output settings for combinations that have no effect
    fn validate_output(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.output_format == OutputFormat::Json && config.enable_color {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Color output is ignored in JSON format".to_string(),
            ));
        }

        warnings
    }
}

/// Validation warning levels
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.message)
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
