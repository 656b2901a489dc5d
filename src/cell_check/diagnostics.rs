//! Rewriting checker diagnostics so they point at notebook cells.
//!
//! The checker only ever sees a temporary file. Its messages mention that
//! file's path and, for wrapped snippets, line numbers shifted by the harness.

use super::classify::CheckOutcome;
use super::retry::SourceOrigin;
use regex::Regex;
use std::path::Path;

/// Replace `temp_path` with `label` and shift `label:LINE[:COL]` line numbers
/// down by `line_offset`.
pub fn remap(message: &str, temp_path: &Path, label: &str, line_offset: usize) -> String {
    let temp = temp_path.display().to_string();
    if temp.is_empty() {
        return message.to_string();
    }
    let replaced = message.replace(&temp, label);
    if line_offset == 0 {
        return replaced;
    }

    let pattern = format!(r"{}:(\d+)", regex::escape(label));
    let Ok(re) = Regex::new(&pattern) else {
        return replaced;
    };
    re.replace_all(&replaced, |caps: &regex::Captures| {
        let line = caps[1].parse::<usize>().unwrap_or(0);
        format!("{label}:{}", line.saturating_sub(line_offset).max(1))
    })
    .into_owned()
}

/// Apply [`remap`] to the message an outcome carries, if any.
pub fn remap_outcome(outcome: CheckOutcome, temp_path: &Path, origin: &SourceOrigin) -> CheckOutcome {
    match outcome {
        CheckOutcome::Invalid { message } => CheckOutcome::Invalid {
            message: remap(&message, temp_path, &origin.label, origin.line_offset),
        },
        CheckOutcome::ToolError { message } => CheckOutcome::ToolError {
            message: remap(&message, temp_path, &origin.label, origin.line_offset),
        },
        other => other,
    }
}
