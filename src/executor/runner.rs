//! Request runners: one invocation of the external HTTP client per call

use crate::{
    logging::Logger,
    models::{FailureReason, RequestCommand, RunOutcome},
};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Where curl writes the response body
#[cfg(windows)]
pub const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
pub const NULL_DEVICE: &str = "/dev/null";

/// curl write-out format printing only the total request time in seconds
pub const TIME_TOTAL_FORMAT: &str = "%{time_total}";

/// Issues a single request and reports how long it took
#[async_trait]
pub trait RequestRunner: Send + Sync {
    /// Run the command once. Failures are soft and never abort the session.
    async fn run_once(&self, command: &RequestCommand) -> RunOutcome;
}

/// User arguments followed by the flags that discard the body, silence
/// progress output and print only the total time
pub fn timed_args(command: &RequestCommand) -> Vec<String> {
    let mut args = command.args().to_vec();
    args.extend(
        ["-o", NULL_DEVICE, "-s", "-w", TIME_TOTAL_FORMAT]
            .iter()
            .map(|s| s.to_string()),
    );
    args
}

/// Parse curl's `%{time_total}` output
pub fn parse_time_total(stdout: &str) -> Option<f64> {
    let secs: f64 = stdout.trim().parse().ok()?;
    (secs.is_finite() && secs >= 0.0).then_some(secs)
}

/// Runs the command as a curl child process
pub struct CurlRunner {
    timeout: Option<Duration>,
    logger: Logger,
}

impl CurlRunner {
    pub fn new(timeout: Option<Duration>, logger: Logger) -> Self {
        Self { timeout, logger }
    }

    fn build_command(&self, command: &RequestCommand) -> Command {
        let mut child = Command::new(command.program());
        child
            .args(timed_args(command))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        child
    }

    fn fail(&self, reason: FailureReason) -> RunOutcome {
        self.logger
            .debug("request failed")
            .field("reason", &reason)
            .log();
        RunOutcome::failed(reason)
    }
}

#[async_trait]
impl RequestRunner for CurlRunner {
    async fn run_once(&self, command: &RequestCommand) -> RunOutcome {
        let mut child = self.build_command(command);

        let result = match self.timeout {
            // Dropping the output future kills the child
            Some(limit) => match tokio::time::timeout(limit, child.output()).await {
                Ok(result) => result,
                Err(_) => return self.fail(FailureReason::timeout(limit)),
            },
            None => child.output().await,
        };

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                return self.fail(FailureReason::Spawn {
                    message: format!("{}: {}", command.program(), e),
                })
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            return self.fail(FailureReason::ExitStatus {
                code: output.status.code(),
                stderr,
            });
        }

        match parse_time_total(&stdout) {
            Some(seconds) => RunOutcome::success(seconds),
            None => self.fail(FailureReason::InvalidOutput { stdout, stderr }),
        }
    }
}
