//! Sequential run loop driving a request runner

pub mod runner;

pub use runner::{CurlRunner, RequestRunner, NULL_DEVICE, TIME_TOTAL_FORMAT};

use crate::{
    error::Result,
    logging::Logger,
    models::{Config, RequestCommand, RunRecord, SampleSet},
};
use std::time::Duration;

/// Issues the request a fixed number of times, one after another, pausing
/// for `interval` between runs
pub struct RunLoop<R: RequestRunner> {
    runner: R,
    request_count: u32,
    interval: Duration,
    logger: Logger,
}

impl<R: RequestRunner> RunLoop<R> {
    pub fn new(runner: R, request_count: u32, interval: Duration, logger: Logger) -> Self {
        Self {
            runner,
            request_count,
            interval,
            logger,
        }
    }

    pub fn from_config(runner: R, config: &Config, logger: Logger) -> Self {
        Self::new(runner, config.request_count, config.interval(), logger)
    }

    /// Run every iteration and collect the successful samples.
    ///
    /// `on_run` sees each record as soon as its run finishes; an error from
    /// it stops the loop. No pause follows the final run.
    pub async fn run<F>(&self, command: &RequestCommand, mut on_run: F) -> Result<SampleSet>
    where
        F: FnMut(&RunRecord) -> Result<()>,
    {
        let mut samples = SampleSet::with_capacity(self.request_count as usize);

        self.logger
            .info("starting runs")
            .field("count", self.request_count)
            .field("interval_ms", self.interval.as_millis() as u64)
            .field("program", command.program())
            .log();

        for index in 1..=self.request_count {
            let outcome = self.runner.run_once(command).await;
            let record = RunRecord::new(index, outcome);
            samples.record(&record.outcome);

            self.logger.debug("run finished").run(&record).log();
            if let Err(e) = on_run(&record) {
                self.logger
                    .error("stopping early")
                    .field("run", index)
                    .error_info(&e)
                    .log();
                return Err(e);
            }

            if index < self.request_count && !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }
        }

        self.logger
            .info("runs complete")
            .field("attempted", samples.attempted())
            .field("failed", samples.failed())
            .log();

        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FailureReason, RunOutcome};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Instant;

    /// Replays a fixed list of outcomes, then fails every further call
    struct ScriptedRunner {
        outcomes: Mutex<VecDeque<RunOutcome>>,
        calls: AtomicUsize,
    }

    impl ScriptedRunner {
        fn new(outcomes: Vec<RunOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RequestRunner for ScriptedRunner {
        async fn run_once(&self, _command: &RequestCommand) -> RunOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| RunOutcome::failed(FailureReason::Spawn {
                    message: "script exhausted".to_string(),
                }))
        }
    }

    #[async_trait]
    impl<T: RequestRunner> RequestRunner for std::sync::Arc<T> {
        async fn run_once(&self, command: &RequestCommand) -> RunOutcome {
            (**self).run_once(command).await
        }
    }

    fn command() -> RequestCommand {
        RequestCommand::parse_line("curl https://example.com").unwrap()
    }

    fn invalid_output() -> RunOutcome {
        RunOutcome::failed(FailureReason::InvalidOutput {
            stdout: "garbage".to_string(),
            stderr: String::new(),
        })
    }

    #[tokio::test]
    async fn test_collects_successful_samples_in_order() {
        let runner = ScriptedRunner::new(vec![
            RunOutcome::success(0.2),
            invalid_output(),
            RunOutcome::success(0.1),
        ]);
        let run_loop = RunLoop::new(runner, 3, Duration::ZERO, Logger::new("test"));

        let mut seen = Vec::new();
        let samples = run_loop
            .run(&command(), |record| {
                seen.push((record.index, record.outcome.duration()));
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(samples.samples(), &[0.2, 0.1]);
        assert_eq!(samples.attempted(), 3);
        assert_eq!(samples.failed(), 1);
        assert_eq!(seen, vec![(1, Some(0.2)), (2, None), (3, Some(0.1))]);
    }

    #[tokio::test]
    async fn test_zero_count_never_calls_runner() {
        let runner = std::sync::Arc::new(ScriptedRunner::new(vec![RunOutcome::success(0.2)]));
        let run_loop = RunLoop::new(runner.clone(), 0, Duration::from_secs(10), Logger::new("test"));

        let mut callbacks = 0;
        let samples = run_loop
            .run(&command(), |_| {
                callbacks += 1;
                Ok(())
            })
            .await
            .unwrap();

        assert!(samples.is_empty());
        assert_eq!(samples.attempted(), 0);
        assert_eq!(callbacks, 0);
        assert_eq!(runner.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_set() {
        let runner = std::sync::Arc::new(ScriptedRunner::new(vec![]));
        let run_loop = RunLoop::new(runner.clone(), 4, Duration::ZERO, Logger::new("test"));

        let samples = run_loop.run(&command(), |_| Ok(())).await.unwrap();

        assert!(samples.is_empty());
        assert_eq!(samples.failed(), 4);
        assert_eq!(runner.calls(), 4);
    }

    #[tokio::test]
    async fn test_callback_error_stops_loop() {
        let runner = std::sync::Arc::new(ScriptedRunner::new(vec![
            RunOutcome::success(0.1),
            RunOutcome::success(0.2),
            RunOutcome::success(0.3),
        ]));
        let run_loop = RunLoop::new(runner.clone(), 3, Duration::ZERO, Logger::new("test"));

        let result = run_loop
            .run(&command(), |record| {
                if record.index == 2 {
                    Err(crate::error::AppError::io("broken pipe"))
                } else {
                    Ok(())
                }
            })
            .await;

        assert!(matches!(result, Err(crate::error::AppError::Io(_))));
        assert_eq!(runner.calls(), 2);
    }

    #[tokio::test]
    async fn test_pauses_between_runs_only() {
        let runner = ScriptedRunner::new(vec![
            RunOutcome::success(0.01),
            RunOutcome::success(0.01),
            RunOutcome::success(0.01),
        ]);
        let interval = Duration::from_millis(40);
        let run_loop = RunLoop::new(runner, 3, interval, Logger::new("test"));

        let started = Instant::now();
        let samples = run_loop.run(&command(), |_| Ok(())).await.unwrap();
        let elapsed = started.elapsed();

        assert_eq!(samples.len(), 3);
        // Two pauses for three runs
        assert!(elapsed >= interval * 2, "elapsed {:?}", elapsed);
        assert!(elapsed < interval * 3 + Duration::from_millis(500), "elapsed {:?}", elapsed);
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            request_count: 7,
            interval_seconds: 0.25,
            ..Config::default()
        };
        let run_loop = RunLoop::from_config(ScriptedRunner::new(vec![]), &config, Logger::new("test"));
        assert_eq!(run_loop.request_count, 7);
        assert_eq!(run_loop.interval, Duration::from_millis(250));
    }
}
