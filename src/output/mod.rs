//! Output formatting and display system
//!
//! Plain, colored and line-delimited JSON renderings of the probe report,
//! plus a coordinator that writes them to stdout as the session progresses.

mod colored;
mod formatter;
mod json;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{FormattingOptions, OutputFormatter, PlainFormatter, NO_RESULTS_MESSAGE};
pub use json::JsonFormatter;

use crate::{
    error::Result,
    models::{Config, RequestCommand, RunRecord, SampleSet},
    stats::Summary,
    types::OutputFormat,
};
use std::io::Write;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter from the output format and color preference
    pub fn create_formatter(config: &Config) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions::from_config(config);

        match config.output_format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Text if options.enable_color => Box::new(ColoredFormatter::new(options)),
            OutputFormat::Text => Box::new(PlainFormatter::new(options)),
        }
    }
}

/// Writes each part of the report as soon as it is available
pub struct OutputCoordinator<W: Write> {
    formatter: Box<dyn OutputFormatter>,
    writer: W,
}

impl<W: Write> OutputCoordinator<W> {
    pub fn new(formatter: Box<dyn OutputFormatter>, writer: W) -> Self {
        Self { formatter, writer }
    }

    pub fn display_banner(&mut self, command: &RequestCommand, config: &Config) -> Result<()> {
        let text = self.formatter.format_banner(command, config)?;
        self.emit(&text)
    }

    /// Flushed immediately so progress is visible during long pauses
    pub fn display_run(&mut self, record: &RunRecord) -> Result<()> {
        let text = self.formatter.format_run(record)?;
        self.emit(&text)
    }

    /// Compute and display the summary; returns it for the caller
    pub fn display_summary(&mut self, samples: &SampleSet) -> Result<Option<Summary>> {
        let summary = Summary::from_samples(samples);
        let text = self.formatter.format_summary(samples, summary.as_ref())?;
        self.emit(&text)?;
        Ok(summary)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn emit(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{}", text)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunOutcome;

    fn plain_config() -> Config {
        Config {
            enable_color: false,
            ..Config::default()
        }
    }

    fn render(config: &Config) -> String {
        let command = RequestCommand::parse_line("curl https://example.com").unwrap();
        let mut coordinator =
            OutputCoordinator::new(OutputFormatterFactory::create_formatter(config), Vec::new());

        let mut samples = SampleSet::new();
        coordinator.display_banner(&command, config).unwrap();
        for (index, seconds) in [0.1, 0.3].into_iter().enumerate() {
            let record = RunRecord::new(index as u32 + 1, RunOutcome::success(seconds));
            samples.record(&record.outcome);
            coordinator.display_run(&record).unwrap();
        }
        let summary = coordinator.display_summary(&samples).unwrap();
        assert_eq!(summary.map(|s| s.count), Some(2));

        String::from_utf8(coordinator.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_report_layout() {
        let output = render(&plain_config());
        let expected = "Testing command:\n\
                        curl https://example.com\n\
                        \n\
                        Running 120 times with 0.5s interval...\n\
                        \n\
                        Run 01: 0.100 sec\n\
                        Run 02: 0.300 sec\n\
                        \n\
                        === Summary ===\n\
                        Total requests : 2\n\
                        Failed requests: 0\n\
                        Average (avg)  : 0.200 sec\n\
                        TP90 (90th pct): 0.280 sec\n\
                        TP99 (99th pct): 0.298 sec\n";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_json_report_is_line_delimited() {
        let config = Config {
            output_format: OutputFormat::Json,
            ..plain_config()
        };
        let output = render(&config);
        let events: Vec<String> = output
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["event"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(events, vec!["start", "run", "run", "summary"]);
    }

    #[test]
    fn test_empty_summary_returns_none() {
        let mut coordinator = OutputCoordinator::new(
            Box::new(PlainFormatter::new(FormattingOptions::default())),
            Vec::new(),
        );
        assert_eq!(coordinator.display_summary(&SampleSet::new()).unwrap(), None);
        let output = String::from_utf8(coordinator.into_inner()).unwrap();
        assert!(output.ends_with("No valid results recorded.\n"));
    }
}
