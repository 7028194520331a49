//! Command-line interface module

use crate::types::OutputFormat;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("GIT_COMMIT"),
    ", built ",
    env!("BUILD_TIME"),
    ", ",
    env!("TARGET_TRIPLE"),
    ")"
);

/// Curl Latency Probe - time one curl request repeatedly and report mean, TP90 and TP99
#[derive(Parser, Debug, Clone)]
#[command(name = "curl-latency-probe")]
#[command(version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// File containing the curl command on a single line [default: curl.txt]
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Number of runs [default: 120]
    #[arg(short, long)]
    pub count: Option<u32>,

    /// Pause between runs in seconds, fractions allowed [default: 0.5]
    #[arg(short, long, value_parser = parse_interval)]
    pub interval: Option<f64>,

    /// Kill a run after this many seconds, 0 disables [default: 0]
    #[arg(short, long, value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Environment file to load before reading environment variables
    #[arg(long, value_name = "PATH", default_value = ".env")]
    pub env_file: PathBuf,

    /// Print an example environment file and exit
    #[arg(long)]
    pub env_example: bool,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        Ok(())
    }

    /// Explicit color choice from flags, `None` when neither flag is given
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        self.color_override().unwrap_or_else(supports_color)
    }
}

/// Parse the pause between runs
fn parse_interval(s: &str) -> Result<f64, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid interval: {}", s))?;

    if !secs.is_finite() || secs < 0.0 {
        Err("Interval must be a non-negative number of seconds".to_string())
    } else if secs > crate::defaults::MAX_INTERVAL_SECONDS {
        Err(format!(
            "Interval cannot exceed {} seconds",
            crate::defaults::MAX_INTERVAL_SECONDS
        ))
    } else {
        Ok(secs)
    }
}

/// Parse the per-run timeout in whole seconds
fn parse_timeout(s: &str) -> Result<u64, String> {
    // Reject strings with leading + sign or other invalid formats
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid timeout: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid timeout: {}", s))
        .and_then(|secs| {
            if secs > crate::defaults::MAX_TIMEOUT_SECONDS {
                Err(format!(
                    "Timeout cannot exceed {} seconds",
                    crate::defaults::MAX_TIMEOUT_SECONDS
                ))
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    std::io::stdout().is_terminal()
}
