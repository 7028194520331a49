//! Curl Latency Probe
//!
//! Runs a single curl command repeatedly at a fixed interval, records the
//! total time reported by curl for each run and summarizes the successful
//! samples as mean, TP90 and TP99.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use app::App;
pub use error::{AppError, Result};
pub use executor::{CurlRunner, RequestRunner, RunLoop};
pub use models::{Config, RequestCommand, RunOutcome, RunRecord, SampleSet};
pub use stats::{percentile, Summary};
pub use output::{OutputFormatter, OutputFormatterFactory};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
pub const BUILD_TIME: &str = env!("BUILD_TIME");
pub const GIT_COMMIT: &str = env!("GIT_COMMIT");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_COMMAND_FILE: &str = "curl.txt";
    pub const DEFAULT_REQUEST_COUNT: u32 = 120;
    pub const DEFAULT_INTERVAL_SECONDS: f64 = 0.5;
    /// Zero disables the per-run timeout
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 0;

    pub const MAX_REQUEST_COUNT: u32 = 100_000;
    pub const MAX_INTERVAL_SECONDS: f64 = 3600.0;
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;

    /// Percentiles reported in the summary
    pub const TP90: f64 = 90.0;
    pub const TP99: f64 = 99.0;
}
