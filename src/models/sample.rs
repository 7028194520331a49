//! Per-run outcomes and the collected sample set

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Why a run produced no sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The process could not be started
    Spawn { message: String },
    /// The process exited unsuccessfully or was killed by a signal
    ExitStatus { code: Option<i32>, stderr: String },
    /// Standard output was not a usable number of seconds
    InvalidOutput { stdout: String, stderr: String },
    /// The per-run deadline elapsed and the process was killed
    Timeout { after_ms: u64 },
}

impl FailureReason {
    pub fn timeout(after: Duration) -> Self {
        Self::Timeout {
            after_ms: after.as_millis() as u64,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Spawn { message } => write!(f, "could not start client: {}", message),
            FailureReason::ExitStatus { code: Some(code), stderr } if !stderr.is_empty() => {
                write!(f, "client exited with status {}: {}", code, stderr)
            }
            FailureReason::ExitStatus { code: Some(code), .. } => {
                write!(f, "client exited with status {}", code)
            }
            FailureReason::ExitStatus { code: None, .. } => write!(f, "client terminated by signal"),
            FailureReason::InvalidOutput { stdout, .. } => {
                write!(f, "unexpected client output {:?}", stdout)
            }
            FailureReason::Timeout { after_ms } => write!(f, "timed out after {}ms", after_ms),
        }
    }
}

/// Result of one request invocation
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Total request time reported by the client, in seconds
    Success { seconds: f64 },
    Failed(FailureReason),
}

impl RunOutcome {
    pub fn success(seconds: f64) -> Self {
        Self::Success { seconds }
    }

    pub fn failed(reason: FailureReason) -> Self {
        Self::Failed(reason)
    }

    /// The sample carried by this outcome, if any
    pub fn duration(&self) -> Option<f64> {
        match self {
            RunOutcome::Success { seconds } => Some(*seconds),
            RunOutcome::Failed(_) => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success { .. })
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            RunOutcome::Failed(reason) => Some(reason),
            RunOutcome::Success { .. } => None,
        }
    }
}

/// One iteration of the run loop
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    /// 1-based run number
    pub index: u32,
    pub outcome: RunOutcome,
    /// When the run finished
    pub timestamp: DateTime<Utc>,
}

impl RunRecord {
    pub fn new(index: u32, outcome: RunOutcome) -> Self {
        Self {
            index,
            outcome,
            timestamp: Utc::now(),
        }
    }
}

/// Successful durations in run order, plus attempt counters.
///
/// Failed runs are counted but never stored as a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleSet {
    samples: Vec<f64>,
    attempted: u32,
    failed: u32,
}

impl SampleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for the configured run count
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            attempted: 0,
            failed: 0,
        }
    }

    /// Account for one run outcome
    pub fn record(&mut self, outcome: &RunOutcome) {
        self.attempted += 1;
        match outcome.duration() {
            Some(seconds) => self.samples.push(seconds),
            None => self.failed += 1,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn attempted(&self) -> u32 {
        self.attempted
    }

    pub fn failed(&self) -> u32 {
        self.failed
    }
}

impl FromIterator<f64> for SampleSet {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut set = SampleSet::new();
        for seconds in iter {
            set.record(&RunOutcome::success(seconds));
        }
        set
    }
}
