//! Accumulation of per-cell results over a whole run.

use crate::cell_check::CheckOutcome;
use serde::Serialize;

/// Maximum characters of cell code shown in a failure.
pub const DEFAULT_PREVIEW_LENGTH: usize = 100;

/// Appended to truncated text.
pub const TRUNCATION_MARKER: &str = "...";

/// One cell that did not validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub notebook_path: String,
    /// 1-based cell index
    pub cell_index: usize,
    pub code_preview: String,
    pub error_message: String,
}

/// A notebook whose kernel language is not the one being checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedNotebook {
    pub path: String,
    pub reason: String,
}

/// A notebook that could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedNotebook {
    pub path: String,
    pub message: String,
}

/// Results of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub total_checked: usize,
    pub valid_count: usize,
    pub failures: Vec<FailureRecord>,
    pub skipped: Vec<SkippedNotebook>,
    pub malformed: Vec<MalformedNotebook>,
    pub notebooks_checked: usize,
    /// The run stopped early on user interrupt.
    pub interrupted: bool,
    #[serde(skip)]
    preview_length: usize,
    #[serde(skip)]
    timeout_ms: u64,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_LENGTH, 0)
    }
}

impl ValidationReport {
    /// Empty report. `timeout_ms` is only used to word timeout failures.
    pub fn new(preview_length: usize, timeout_ms: u64) -> Self {
        Self {
            total_checked: 0,
            valid_count: 0,
            failures: Vec::new(),
            skipped: Vec::new(),
            malformed: Vec::new(),
            notebooks_checked: 0,
            interrupted: false,
            preview_length,
            timeout_ms,
        }
    }

    /// Record the final outcome of one cell.
    pub fn record(&mut self, notebook_path: &str, cell_index: usize, code: &str, outcome: &CheckOutcome) {
        self.total_checked += 1;

        let error_message = match outcome {
            CheckOutcome::Valid => {
                self.valid_count += 1;
                return;
            }
            CheckOutcome::Invalid { message } | CheckOutcome::ToolError { message } => message.clone(),
            CheckOutcome::Timeout if self.timeout_ms > 0 => {
                format!("Timeout during syntax check (exceeded {} ms)", self.timeout_ms)
            }
            CheckOutcome::Timeout => "Timeout during syntax check".to_string(),
        };

        self.failures.push(FailureRecord {
            notebook_path: notebook_path.to_string(),
            cell_index,
            code_preview: truncate(code, self.preview_length),
            error_message,
        });
    }

    pub fn record_skipped(&mut self, path: &str, reason: impl Into<String>) {
        self.skipped.push(SkippedNotebook {
            path: path.to_string(),
            reason: reason.into(),
        });
    }

    pub fn record_malformed(&mut self, path: &str, message: impl Into<String>) {
        self.malformed.push(MalformedNotebook {
            path: path.to_string(),
            message: message.into(),
        });
    }

    /// True when no cell failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Truncate `text` to at most `max_chars` characters, appending
/// [`TRUNCATION_MARKER`] when anything was cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{TRUNCATION_MARKER}", &text[..byte_idx]),
        None => text.to_string(),
    }
}
