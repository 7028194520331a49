//! The curl invocation read from the command file

use crate::error::{AppError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Tokenized request command, e.g. `curl -H 'Accept: */*' https://example.com`
///
/// Always holds at least one token (the program to run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCommand {
    tokens: Vec<String>,
}

impl RequestCommand {
    /// Build a command from already split tokens
    pub fn new(tokens: Vec<String>) -> Result<Self> {
        if tokens.is_empty() || tokens[0].is_empty() {
            return Err(AppError::no_valid_command());
        }
        Ok(Self { tokens })
    }

    /// Split one line with POSIX shell quoting rules
    pub fn parse_line(line: &str) -> Result<Self> {
        let tokens = shlex::split(line.trim()).ok_or_else(AppError::no_valid_command)?;
        Self::new(tokens)
    }

    /// Parse the first usable line of the file contents.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn from_source(source: &str) -> Result<Self> {
        let line = source
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .ok_or_else(AppError::no_valid_command)?;

        Self::parse_line(line)
    }

    /// Read and parse the command file
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::command_file_not_found(path),
            _ => AppError::command_file(format!(
                "Error: could not read {}: {}",
                path.display(),
                e
            )),
        })?;

        Self::from_source(&source)
    }

    /// Program to execute
    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    /// Arguments after the program
    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens joined by single spaces, as echoed before the first run
    pub fn display_line(&self) -> String {
        self.tokens.join(" ")
    }
}
