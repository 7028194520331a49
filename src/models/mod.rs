//! Data models and structures for the latency probe

pub mod command;
pub mod config;
pub mod sample;

// Re-export main model types
pub use command::RequestCommand;
pub use config::Config;
pub use sample::{FailureReason, RunOutcome, RunRecord, SampleSet};
