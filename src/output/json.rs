//! Line-delimited JSON output
//!
//! Every call yields one JSON object tagged with an `event` field
//! (`start`, `run` or `summary`) so the stream can be piped into `jq`.

use crate::{
    error::Result,
    models::{Config, RequestCommand, RunOutcome, RunRecord, SampleSet},
    stats::Summary,
};
use super::formatter::{OutputFormatter, NO_RESULTS_MESSAGE};
use serde_json::json;

pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_banner(&self, command: &RequestCommand, config: &Config) -> Result<String> {
        let value = json!({
            "event": "start",
            "command": command.tokens(),
            "request_count": config.request_count,
            "interval_seconds": config.interval_seconds,
            "timeout_seconds": config.timeout_seconds,
        });
        Ok(serde_json::to_string(&value)?)
    }

    fn format_run(&self, record: &RunRecord) -> Result<String> {
        let mut value = json!({
            "event": "run",
            "run": record.index,
            "timestamp": record.timestamp,
            "success": record.outcome.is_success(),
        });
        match &record.outcome {
            RunOutcome::Success { seconds } => value["seconds"] = json!(seconds),
            RunOutcome::Failed(reason) => value["failure"] = serde_json::to_value(reason)?,
        }
        Ok(serde_json::to_string(&value)?)
    }

    fn format_summary(&self, samples: &SampleSet, summary: Option<&Summary>) -> Result<String> {
        let value = match summary {
            Some(summary) => json!({
                "event": "summary",
                "attempted": samples.attempted(),
                "failed": samples.failed(),
                "summary": summary,
            }),
            None => json!({
                "event": "summary",
                "attempted": samples.attempted(),
                "failed": samples.failed(),
                "summary": null,
                "message": NO_RESULTS_MESSAGE,
            }),
        };
        Ok(serde_json::to_string(&value)?)
    }
}
