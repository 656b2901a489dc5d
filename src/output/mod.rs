//! Output formatting module for nbcheck
//!
//! A finished [`ValidationReport`] can be rendered for people (text), for
//! tooling (json), or as GitHub Actions annotations.

use crate::report::ValidationReport;
use std::io::{self, Write};
use std::str::FromStr;

pub mod formatters;

pub use formatters::*;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render the whole report
    fn format_report(&self, report: &ValidationReport) -> String;
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary with failure blocks
    Text,
    /// Single JSON document
    Json,
    /// GitHub Actions annotation format
    GitHub,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "github" => Ok(OutputFormat::GitHub),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

impl OutputFormat {
    /// Names accepted by [`OutputFormat::from_str`].
    pub const NAMES: &'static [&'static str] = &["text", "json", "github"];

    /// Create a formatter instance for this format
    pub fn create_formatter(&self, use_colors: bool, error_length: usize) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(use_colors, error_length)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::GitHub => Box::new(GitHubFormatter::new()),
        }
    }
}

/// Output writer that handles stdout/quiet routing
pub struct OutputWriter {
    quiet: bool,
}

impl OutputWriter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Write a rendered report followed by a newline
    pub fn writeln(&self, content: &str) -> io::Result<()> {
        if self.quiet || content.is_empty() {
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{content}")?;
        stdout.flush()
    }
}
