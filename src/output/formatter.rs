//! Core formatting trait and the plain text implementation

use crate::{
    error::Result,
    models::{Config, RequestCommand, RunOutcome, RunRecord, SampleSet},
    stats::Summary,
};
use std::fmt::Write as _;

/// Printed in place of statistics when no run succeeded
pub const NO_RESULTS_MESSAGE: &str = "No valid results recorded.";

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Lines printed once before the first run
    fn format_banner(&self, command: &RequestCommand, config: &Config) -> Result<String>;

    /// One line per finished run
    fn format_run(&self, record: &RunRecord) -> Result<String>;

    /// Final block; `summary` is `None` when the sample set is empty
    fn format_summary(&self, samples: &SampleSet, summary: Option<&Summary>) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone, Default)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Show failure reasons and extended statistics
    pub verbose_mode: bool,
}

impl FormattingOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            enable_color: config.enable_color,
            verbose_mode: config.verbose,
        }
    }
}

/// Run label, zero-padded to two digits
pub(crate) fn run_label(index: u32) -> String {
    format!("Run {:02}", index)
}

/// Interval in seconds; whole values keep one decimal place ("1.0s")
pub(crate) fn interval_label(seconds: f64) -> String {
    format!("{:?}s", seconds)
}

/// Plain text formatter
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_banner(&self, command: &RequestCommand, config: &Config) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "Testing command:")?;
        writeln!(output, "{}", command.display_line())?;
        writeln!(output)?;
        write!(
            output,
            "Running {} times with {} interval...",
            config.request_count,
            interval_label(config.interval_seconds)
        )?;
        if let Some(timeout) = config.timeout() {
            write!(output, " (timeout {}s)", timeout.as_secs())?;
        }
        writeln!(output)?;
        Ok(output)
    }

    fn format_run(&self, record: &RunRecord) -> Result<String> {
        let label = run_label(record.index);
        Ok(match &record.outcome {
            RunOutcome::Success { seconds } => format!("{}: {:.3} sec", label, seconds),
            RunOutcome::Failed(reason) if self.options.verbose_mode => {
                format!("{}: failed ({})", label, reason)
            }
            RunOutcome::Failed(_) => format!("{}: failed", label),
        })
    }

    fn format_summary(&self, samples: &SampleSet, summary: Option<&Summary>) -> Result<String> {
        let mut output = String::new();
        writeln!(output)?;
        writeln!(output, "=== Summary ===")?;

        let summary = match summary {
            Some(summary) => summary,
            None => {
                writeln!(output, "Total requests : 0")?;
                writeln!(output, "Failed requests: {}", samples.failed())?;
                write!(output, "{}", NO_RESULTS_MESSAGE)?;
                return Ok(output);
            }
        };

        writeln!(output, "Total requests : {}", summary.count)?;
        writeln!(output, "Failed requests: {}", summary.failed)?;
        writeln!(output, "Average (avg)  : {:.3} sec", summary.mean)?;
        writeln!(output, "TP90 (90th pct): {:.3} sec", summary.tp90)?;
        write!(output, "TP99 (99th pct): {:.3} sec", summary.tp99)?;

        if self.options.verbose_mode {
            writeln!(output)?;
            writeln!(output, "Min            : {:.3} sec", summary.min)?;
            writeln!(output, "Median (p50)   : {:.3} sec", summary.median)?;
            writeln!(output, "Max            : {:.3} sec", summary.max)?;
            writeln!(output, "Std deviation  : {:.3} sec", summary.std_dev)?;
            write!(output, "Success rate   : {:.1}%", summary.success_rate())?;
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FailureReason;

    fn formatter(verbose: bool) -> PlainFormatter {
        PlainFormatter::new(FormattingOptions {
            enable_color: false,
            verbose_mode: verbose,
        })
    }

    fn samples_of(values: &[f64], failures: u32) -> SampleSet {
        let mut samples: SampleSet = values.iter().copied().collect();
        for _ in 0..failures {
            samples.record(&RunOutcome::failed(FailureReason::Timeout { after_ms: 1000 }));
        }
        samples
    }

    #[test]
    fn test_banner() {
        let command = RequestCommand::parse_line("curl -H 'X-Trace: 1' https://example.com").unwrap();
        let config = Config::default();
        let banner = formatter(false).format_banner(&command, &config).unwrap();

        assert_eq!(
            banner,
            "Testing command:\ncurl -H X-Trace: 1 https://example.com\n\nRunning 120 times with 0.5s interval...\n"
        );
    }

    #[test]
    fn test_interval_keeps_a_decimal() {
        assert_eq!(interval_label(1.0), "1.0s");
        assert_eq!(interval_label(0.0), "0.0s");
        assert_eq!(interval_label(0.25), "0.25s");

        let command = RequestCommand::parse_line("curl https://example.com").unwrap();
        let config = Config {
            interval_seconds: 2.0,
            ..Config::default()
        };
        let banner = formatter(false).format_banner(&command, &config).unwrap();
        assert!(banner.ends_with("Running 120 times with 2.0s interval...\n"));
    }

    #[test]
    fn test_run_lines() {
        let f = formatter(false);
        let ok = RunRecord::new(1, RunOutcome::success(0.12345));
        assert_eq!(f.format_run(&ok).unwrap(), "Run 01: 0.123 sec");

        let failed = RunRecord::new(12, RunOutcome::failed(FailureReason::ExitStatus {
            code: Some(28),
            stderr: String::new(),
        }));
        assert_eq!(f.format_run(&failed).unwrap(), "Run 12: failed");
        assert_eq!(
            formatter(true).format_run(&failed).unwrap(),
            "Run 12: failed (client exited with status 28)"
        );

        let late = RunRecord::new(120, RunOutcome::success(2.0));
        assert_eq!(f.format_run(&late).unwrap(), "Run 120: 2.000 sec");
    }

    #[test]
    fn test_summary_block() {
        let samples = samples_of(&[1.0, 2.0, 3.0, 4.0], 1);
        let summary = Summary::from_samples(&samples).unwrap();
        let text = formatter(false).format_summary(&samples, Some(&summary)).unwrap();

        assert_eq!(
            text,
            "\n=== Summary ===\n\
             Total requests : 4\n\
             Failed requests: 1\n\
             Average (avg)  : 2.500 sec\n\
             TP90 (90th pct): 3.700 sec\n\
             TP99 (99th pct): 3.970 sec"
        );
    }

    #[test]
    fn test_verbose_summary_block() {
        let samples = samples_of(&[1.0, 2.0, 3.0, 4.0], 0);
        let summary = Summary::from_samples(&samples).unwrap();
        let text = formatter(true).format_summary(&samples, Some(&summary)).unwrap();

        assert!(text.contains("Min            : 1.000 sec"));
        assert!(text.contains("Median (p50)   : 2.500 sec"));
        assert!(text.contains("Max            : 4.000 sec"));
        assert!(text.contains("Success rate   : 100.0%"));
    }

    #[test]
    fn test_empty_summary_block() {
        let samples = samples_of(&[], 3);
        let text = formatter(false).format_summary(&samples, None).unwrap();

        assert_eq!(
            text,
            "\n=== Summary ===\nTotal requests : 0\nFailed requests: 3\nNo valid results recorded."
        );
    }
}
