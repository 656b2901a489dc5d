//! JSON output formatter

use crate::output::OutputFormatter;
use crate::report::ValidationReport;
use serde_json::json;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ValidationReport) -> String {
        let doc = json!({
            "summary": {
                "total_checked": report.total_checked,
                "valid": report.valid_count,
                "failed": report.failures.len(),
                "notebooks_checked": report.notebooks_checked,
                "notebooks_skipped": report.skipped.len(),
                "notebooks_malformed": report.malformed.len(),
                "interrupted": report.interrupted,
                "success": report.is_success(),
            },
            "failures": report.failures,
            "skipped": report.skipped,
            "malformed": report.malformed,
        });

        serde_json::to_string_pretty(&doc).unwrap_or_default()
    }
}
