//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::{AppError, Result},
    config::env::EnvManager,
};

/// Configuration parser that layers defaults, the env file, environment
/// variables and CLI arguments, in increasing priority
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        // Values from the env file never override variables already set
        EnvManager::load_env_file(&self.cli.env_file)?;

        self.parse_with(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an explicit variable lookup
    pub fn parse_with<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.cli.validate().map_err(AppError::config)?;

        for (key, _, _) in EnvManager::get_supported_env_vars() {
            if let Some(value) = lookup(key) {
                EnvManager::validate_env_var(key, &value)?;
            }
        }

        let mut config = Config::default();
        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(ref file) = self.cli.file {
            config.command_file = file.clone();
        }

        if let Some(count) = self.cli.count {
            config.request_count = count;
        }

        if let Some(interval) = self.cli.interval {
            config.interval_seconds = interval;
        }

        if let Some(timeout) = self.cli.timeout {
            config.timeout_seconds = timeout;
        }

        if let Some(format) = self.cli.format {
            config.output_format = format;
        }

        match self.cli.color_override() {
            Some(enable) => config.enable_color = enable,
            // An env-enabled color still yields to a non-terminal stdout
            None => config.enable_color = config.enable_color && self.cli.use_colors(),
        }

        // Set verbose and debug flags (these are CLI-only)
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    ConfigParser::new(cli).parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Command file: {}", config.command_file.display()));
    summary.push(format!("Request count: {}", config.request_count));
    summary.push(format!("Interval: {}s", config.interval_seconds));
    match config.timeout() {
        Some(timeout) => summary.push(format!("Timeout: {}s", timeout.as_secs())),
        None => summary.push("Timeout: none".to_string()),
    }
    summary.push(format!("Output format: {}", config.output_format));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutputFormat;
    use clap::Parser;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let cli = Cli::parse_from(["test"]);
        let config = ConfigParser::new(cli).parse_with(|_| None).unwrap();

        assert_eq!(config.command_file, PathBuf::from(crate::defaults::DEFAULT_COMMAND_FILE));
        assert_eq!(config.request_count, crate::defaults::DEFAULT_REQUEST_COUNT);
        assert_eq!(config.interval_seconds, crate::defaults::DEFAULT_INTERVAL_SECONDS);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert!(!config.verbose);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "test", "--count", "10", "--interval", "0", "--timeout", "5", "--no-color", "--verbose",
        ]);
        let config = ConfigParser::new(cli).parse_with(|_| None).unwrap();

        assert_eq!(config.request_count, 10);
        assert_eq!(config.interval_seconds, 0.0);
        assert_eq!(config.timeout_seconds, 5);
        assert!(!config.enable_color);
        assert!(config.verbose);
    }

    #[test]
    fn test_cli_overrides_env_vars() {
        let cli = Cli::parse_from(["test", "--count", "12", "--format", "text"]);
        let config = ConfigParser::new(cli)
            .parse_with(lookup_from(&[
                ("REQUEST_COUNT", "8"),
                ("INTERVAL_SECONDS", "2"),
                ("OUTPUT_FORMAT", "json"),
            ]))
            .unwrap();

        // CLI should override environment
        assert_eq!(config.request_count, 12);
        assert_eq!(config.output_format, OutputFormat::Text);
        // Environment still applies where the CLI is silent
        assert_eq!(config.interval_seconds, 2.0);
    }

    #[test]
    fn test_invalid_env_value_is_config_error() {
        let cli = Cli::parse_from(["test"]);
        let err = ConfigParser::new(cli)
            .parse_with(lookup_from(&[("INTERVAL_SECONDS", "-3")]))
            .unwrap_err();
        assert_eq!(err.category(), "CONFIG");
    }

    #[test]
    fn test_env_range_checked_before_merge() {
        let cli = Cli::parse_from(["test"]);
        let err = ConfigParser::new(cli)
            .parse_with(lookup_from(&[("REQUEST_COUNT", "200000")]))
            .unwrap_err();
        assert!(err.to_string().contains("REQUEST_COUNT must be at most 100000"));

        let cli = Cli::parse_from(["test"]);
        assert!(ConfigParser::new(cli)
            .parse_with(lookup_from(&[("COMMAND_FILE", "   ")]))
            .is_err());
    }

    #[test]
    fn test_conflicting_color_flags_rejected() {
        let cli = Cli::parse_from(["test", "--color", "--no-color"]);
        let err = ConfigParser::new(cli).parse_with(|_| None).unwrap_err();
        assert!(err.to_string().contains("--no-color"));
    }

    #[test]
    fn test_force_color_wins_over_env() {
        let cli = Cli::parse_from(["test", "--color"]);
        let config = ConfigParser::new(cli)
            .parse_with(lookup_from(&[("ENABLE_COLOR", "false")]))
            .unwrap();
        assert!(config.enable_color);
    }

    #[test]
    fn test_parse_with_missing_env_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let env_file = dir.path().join("absent.env");
        let cli = Cli::parse_from(["test", "--env-file", env_file.to_str().unwrap(), "--count", "1"]);
        let config = ConfigParser::new(cli).parse().unwrap();
        assert_eq!(config.request_count, 1);
    }

    #[test]
    fn test_config_summary() {
        let config = Config::default();
        let summary = display_config_summary(&config);

        assert!(summary.contains("Command file: curl.txt"));
        assert!(summary.contains("Request count: 120"));
        assert!(summary.contains("Interval: 0.5s"));
        assert!(summary.contains("Timeout: none"));
    }
}
