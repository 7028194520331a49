//! Colored formatter implementation with terminal color support
//!
//! Run durations are tinted by latency level; failures and the summary
//! header stand out from the rest of the report.

use crate::{
    error::Result,
    models::{Config, RequestCommand, RunOutcome, RunRecord, SampleSet},
    stats::Summary,
    types::LatencyLevel,
};
use super::formatter::{interval_label, run_label, FormattingOptions, OutputFormatter, NO_RESULTS_MESSAGE};
use colored::*;
use std::fmt::Write as _;

impl LatencyLevel {
    /// Get color for this latency level
    pub fn color(&self) -> Color {
        match self {
            LatencyLevel::Good => Color::Green,
            LatencyLevel::Moderate => Color::Yellow,
            LatencyLevel::Poor => Color::Red,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub error: Color,
    pub label: Color,
    pub highlight: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            error: Color::Red,
            label: Color::Cyan,
            highlight: Color::Magenta,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    fn seconds(&self, seconds: f64) -> ColoredString {
        format!("{:.3} sec", seconds).color(LatencyLevel::from_seconds(seconds).color())
    }

    fn summary_line(&self, output: &mut String, label: &str, value: impl std::fmt::Display) -> Result<()> {
        write!(output, "\n{}: {}", label.color(self.color_scheme.label), value)?;
        Ok(())
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_banner(&self, command: &RequestCommand, config: &Config) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "{}", "Testing command:".color(self.color_scheme.header).bold())?;
        writeln!(output, "{}", command.display_line().color(self.color_scheme.highlight))?;
        writeln!(output)?;
        write!(
            output,
            "Running {} times with {} interval...",
            config.request_count.to_string().bold(),
            interval_label(config.interval_seconds)
        )?;
        if let Some(timeout) = config.timeout() {
            write!(
                output,
                "{}",
                format!(" (timeout {}s)", timeout.as_secs()).color(self.color_scheme.muted)
            )?;
        }
        writeln!(output)?;
        Ok(output)
    }

    fn format_run(&self, record: &RunRecord) -> Result<String> {
        let label = run_label(record.index).color(self.color_scheme.muted);
        Ok(match &record.outcome {
            RunOutcome::Success { seconds } => format!("{}: {}", label, self.seconds(*seconds)),
            RunOutcome::Failed(reason) if self.options.verbose_mode => format!(
                "{}: {} {}",
                label,
                "failed".color(self.color_scheme.error).bold(),
                format!("({})", reason).color(self.color_scheme.muted)
            ),
            RunOutcome::Failed(_) => {
                format!("{}: {}", label, "failed".color(self.color_scheme.error).bold())
            }
        })
    }

    fn format_summary(&self, samples: &SampleSet, summary: Option<&Summary>) -> Result<String> {
        let mut output = String::new();
        write!(output, "\n{}", "=== Summary ===".color(self.color_scheme.header).bold())?;

        let failed_count = |failed: u32| {
            if failed > 0 {
                failed.to_string().color(self.color_scheme.error)
            } else {
                failed.to_string().normal()
            }
        };

        let summary = match summary {
            Some(summary) => summary,
            None => {
                self.summary_line(&mut output, "Total requests ", 0)?;
                self.summary_line(&mut output, "Failed requests", failed_count(samples.failed()))?;
                write!(output, "\n{}", NO_RESULTS_MESSAGE.color(self.color_scheme.error))?;
                return Ok(output);
            }
        };

        self.summary_line(&mut output, "Total requests ", summary.count.to_string().bold())?;
        self.summary_line(&mut output, "Failed requests", failed_count(summary.failed))?;
        self.summary_line(&mut output, "Average (avg)  ", self.seconds(summary.mean))?;
        self.summary_line(&mut output, "TP90 (90th pct)", self.seconds(summary.tp90))?;
        self.summary_line(&mut output, "TP99 (99th pct)", self.seconds(summary.tp99))?;

        if self.options.verbose_mode {
            self.summary_line(&mut output, "Min            ", self.seconds(summary.min))?;
            self.summary_line(&mut output, "Median (p50)   ", self.seconds(summary.median))?;
            self.summary_line(&mut output, "Max            ", self.seconds(summary.max))?;
            self.summary_line(
                &mut output,
                "Std deviation  ",
                format!("{:.3} sec", summary.std_dev),
            )?;
            self.summary_line(
                &mut output,
                "Success rate   ",
                format!("{:.1}%", summary.success_rate()),
            )?;
        }

        Ok(output)
    }
}
