//! Main application orchestration and execution

use crate::{
    cli::Cli,
    config::{display_config_summary, load_config, validate_config, ValidationLevel},
    error::Result,
    executor::{CurlRunner, RequestRunner, RunLoop},
    logging::Logger,
    models::{Config, RequestCommand},
    output::{OutputCoordinator, OutputFormatterFactory},
    stats::Summary,
};
use std::io::{self, Write};

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    logger: Logger,
}

impl App {
    /// Create a new application instance from a resolved configuration
    pub fn new(config: Config) -> Self {
        let logger = Logger::with_config("app", &config);
        Self { config, logger }
    }

    /// Resolve configuration from CLI arguments, env file and environment
    pub fn from_cli(cli: Cli) -> Result<Self> {
        Ok(Self::new(load_config(cli)?))
    }

    /// Run the probe with curl, writing the report to stdout
    pub async fn run(&self) -> Result<Option<Summary>> {
        // The resolved choice replaces colored's own terminal detection
        colored::control::set_override(self.config.enable_color);
        let runner = CurlRunner::new(self.config.timeout(), self.logger.child("runner"));
        self.run_with(runner, io::stdout()).await
    }

    /// Run the probe with the given runner and report sink.
    ///
    /// Returns `None` when no run succeeded or the command file could not
    /// be used; both cases are reported on `writer` and are not errors.
    pub async fn run_with<R, W>(&self, runner: R, mut writer: W) -> Result<Option<Summary>>
    where
        R: RequestRunner,
        W: Write,
    {
        for warning in validate_config(&self.config)? {
            let builder = match warning.level {
                ValidationLevel::Warning => self.logger.warn(&warning.message),
                ValidationLevel::Info => self.logger.info(&warning.message),
            };
            builder.field("check", "config").log();
        }

        self.logger
            .debug("configuration loaded")
            .field("summary", display_config_summary(&self.config))
            .log();

        let command = match RequestCommand::load(&self.config.command_file) {
            Ok(command) => command,
            Err(e) if e.is_informational() => {
                self.logger
                    .info("nothing to run")
                    .field("command_file", self.config.command_file.display().to_string())
                    .error_info(&e)
                    .log();
                writeln!(writer, "{}", e)?;
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let mut output =
            OutputCoordinator::new(OutputFormatterFactory::create_formatter(&self.config), writer);
        output.display_banner(&command, &self.config)?;

        let run_loop = RunLoop::from_config(runner, &self.config, self.logger.child("run_loop"));
        let samples = run_loop
            .run(&command, |record| output.display_run(record))
            .await?;

        let summary = output.display_summary(&samples)?;
        match &summary {
            Some(summary) => self
                .logger
                .info("summary")
                .field("count", summary.count)
                .field("mean", summary.mean)
                .field("tp90", summary.tp90)
                .field("tp99", summary.tp99)
                .log(),
            None => self
                .logger
                .warn("no successful runs")
                .field("attempted", samples.attempted())
                .log(),
        }

        Ok(summary)
    }
}
