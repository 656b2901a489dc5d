//! GitHub Actions annotation format

use crate::output::OutputFormatter;
use crate::report::ValidationReport;

/// GitHub Actions formatter
/// Outputs in the format: ::error file=<file>,title=<title>::<message>
#[derive(Default)]
pub struct GitHubFormatter;

impl GitHubFormatter {
    pub fn new() -> Self {
        Self
    }
}

// Workflow commands are line based; data must escape %, CR and LF.
fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

// Properties additionally escape : and ,
fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

impl OutputFormatter for GitHubFormatter {
    fn format_report(&self, report: &ValidationReport) -> String {
        let mut lines = Vec::new();

        for failure in &report.failures {
            lines.push(format!(
                "::error file={},title={}::{}",
                escape_property(&failure.notebook_path),
                escape_property(&format!("cell {}", failure.cell_index)),
                escape_data(failure.error_message.trim_end())
            ));
        }

        for malformed in &report.malformed {
            lines.push(format!(
                "::error file={},title=malformed notebook::{}",
                escape_property(&malformed.path),
                escape_data(&malformed.message)
            ));
        }

        lines.push(format!(
            "{}/{} code cells validated",
            report.valid_count, report.total_checked
        ));
        lines.join("\n")
    }
}
