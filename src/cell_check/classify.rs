//! Mapping of checker process results to outcomes.
//!
//! All knowledge about the checker's exit code conventions lives here.

use super::config::CheckerConfig;
use super::executor::ToolOutput;

/// Outcome of one checker attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Valid,
    /// The checker rejected the input. `message` is its diagnostic text.
    Invalid { message: String },
    /// The checker did not finish within the configured timeout.
    Timeout,
    /// The checker could not be run, or exited in a way we don't understand.
    ToolError { message: String },
}

impl CheckOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, CheckOutcome::Valid)
    }

    /// Diagnostic text carried by the outcome, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            CheckOutcome::Invalid { message } | CheckOutcome::ToolError { message } => Some(message),
            CheckOutcome::Valid | CheckOutcome::Timeout => None,
        }
    }
}

/// The parts of [`CheckerConfig`] that decide what an exit means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyRules {
    pub reformat_exit_code: Option<i32>,
    pub error_marker: String,
}

impl From<&CheckerConfig> for ClassifyRules {
    fn from(config: &CheckerConfig) -> Self {
        Self {
            reformat_exit_code: config.reformat_exit_code,
            error_marker: config.error_marker.clone(),
        }
    }
}

impl Default for ClassifyRules {
    fn default() -> Self {
        (&CheckerConfig::default()).into()
    }
}

/// Classify a finished checker run.
///
/// rustfmt exits 1 both when the input would be reformatted and when it fails
/// to parse, so the stderr marker takes precedence over the exit code.
pub fn classify(output: &ToolOutput, rules: &ClassifyRules) -> CheckOutcome {
    if !rules.error_marker.is_empty() && output.stderr.contains(&rules.error_marker) {
        return CheckOutcome::Invalid {
            message: output.stderr.clone(),
        };
    }

    match output.exit_code {
        Some(0) => CheckOutcome::Valid,
        Some(code) if Some(code) == rules.reformat_exit_code => CheckOutcome::Valid,
        Some(code) => {
            let message = if output.stderr.trim().is_empty() {
                output.stdout.clone()
            } else {
                output.stderr.clone()
            };
            CheckOutcome::Invalid {
                message: if message.trim().is_empty() {
                    format!("checker exited with code {code}")
                } else {
                    message
                },
            }
        }
        None => CheckOutcome::ToolError {
            message: format!("checker terminated by signal: {}", output.stderr.trim()),
        },
    }
}
