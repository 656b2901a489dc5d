//! Default text output formatter with colors

use crate::output::OutputFormatter;
use crate::report::{ValidationReport, truncate};
use colored::*;
use std::fmt::Write;

/// Default human-readable formatter
pub struct TextFormatter {
    use_colors: bool,
    error_length: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            use_colors: true,
            error_length: 200,
        }
    }
}

impl TextFormatter {
    pub fn new(use_colors: bool, error_length: usize) -> Self {
        Self {
            use_colors,
            error_length,
        }
    }

    pub fn without_colors() -> Self {
        Self {
            use_colors: false,
            ..Self::default()
        }
    }

    fn paint(&self, text: &str, style: fn(&str) -> ColoredString) -> String {
        if self.use_colors {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_report(&self, report: &ValidationReport) -> String {
        let mut out = String::new();

        for skipped in &report.skipped {
            let _ = writeln!(
                out,
                "{} {} ({})",
                self.paint("Skipping", |s| s.dimmed()),
                skipped.path,
                skipped.reason
            );
        }

        for malformed in &report.malformed {
            let _ = writeln!(out, "{} {}", self.paint("Malformed:", |s| s.red().bold()), malformed.message);
        }

        if report.interrupted {
            let _ = writeln!(
                out,
                "{} run interrupted, remaining notebooks were not checked",
                self.paint("Warning:", |s| s.yellow().bold())
            );
        }

        let _ = writeln!(
            out,
            "\n{} {}/{} code cells validated",
            self.paint("Summary:", |s| s.bold()),
            report.valid_count,
            report.total_checked
        );

        if report.failures.is_empty() {
            // Closing line follows the exit code: interrupted, then malformed, then success
            if report.interrupted {
                let _ = write!(
                    out,
                    "\n{} No syntax errors in the cells checked before the interrupt",
                    self.paint("Interrupted:", |s| s.yellow().bold())
                );
            } else if !report.malformed.is_empty() {
                let _ = write!(
                    out,
                    "\n{} {} notebook(s) could not be read",
                    self.paint("Failed:", |s| s.red().bold()),
                    report.malformed.len()
                );
            } else {
                let _ = write!(out, "\n{} All code cells have valid syntax!", self.paint("Success:", |s| s.green().bold()));
            }
            return out;
        }

        let _ = writeln!(
            out,
            "\n{} Found {} syntax error(s):",
            self.paint("Failed:", |s| s.red().bold()),
            report.failures.len()
        );
        for failure in &report.failures {
            let _ = writeln!(
                out,
                "\n  {} - Cell {}",
                self.paint(&failure.notebook_path, |s| s.blue().underline()),
                failure.cell_index
            );
            let _ = writeln!(out, "  {} {}", self.paint("Code:", |s| s.cyan()), failure.code_preview);
            let _ = writeln!(
                out,
                "  {} {}",
                self.paint("Error:", |s| s.yellow()),
                truncate(&failure.error_message, self.error_length)
            );
        }

        // Remove trailing newline
        if out.ends_with('\n') {
            out.pop();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_check::CheckOutcome;

    #[test]
    fn test_success_summary() {
        let mut report = ValidationReport::default();
        report.record("nb/a.ipynb", 2, "let x = 1;", &CheckOutcome::Valid);
        report.record_skipped("nb/py.ipynb", "kernel language 'python' is not 'rust'");

        let out = TextFormatter::without_colors().format_report(&report);
        assert!(out.contains("Skipping nb/py.ipynb (kernel language 'python' is not 'rust')"));
        assert!(out.contains("1/1 code cells validated"));
        assert!(out.contains("All code cells have valid syntax!"));
    }

    #[test]
    fn test_failure_block() {
        let mut report = ValidationReport::default();
        report.record(
            "nb/a.ipynb",
            4,
            "fn ( { }",
            &CheckOutcome::Invalid {
                message: "error: expected identifier".to_string(),
            },
        );

        let out = TextFormatter::without_colors().format_report(&report);
        assert!(out.contains("0/1 code cells validated"));
        assert!(out.contains("Found 1 syntax error(s):"));
        assert!(out.contains("nb/a.ipynb - Cell 4"));
        assert!(out.contains("Code: fn ( { }"));
        assert!(out.contains("Error: error: expected identifier"));
    }

    #[test]
    fn test_error_text_is_truncated() {
        let mut report = ValidationReport::default();
        report.record(
            "a.ipynb",
            1,
            "x",
            &CheckOutcome::Invalid {
                message: "e".repeat(500),
            },
        );

        let out = TextFormatter::new(false, 200).format_report(&report);
        assert!(out.contains(&format!("Error: {}...", "e".repeat(200))));
        assert!(!out.contains(&"e".repeat(201)));
    }

    #[test]
    fn test_malformed_and_interrupted_notices() {
        let mut report = ValidationReport::default();
        report.record_malformed("bad.ipynb", "Malformed notebook bad.ipynb: EOF while parsing");
        report.interrupted = true;

        let out = TextFormatter::without_colors().format_report(&report);
        assert!(out.contains("Malformed: Malformed notebook bad.ipynb: EOF while parsing"));
        assert!(out.contains("run interrupted"));
        assert!(out.contains("0/0 code cells validated"));
        assert!(out.contains("Interrupted: No syntax errors in the cells checked before the interrupt"));
        assert!(!out.contains("All code cells have valid syntax!"));
    }

    #[test]
    fn test_malformed_only_is_not_reported_as_success() {
        let mut report = ValidationReport::default();
        report.record("good.ipynb", 1, "let x = 1;", &CheckOutcome::Valid);
        report.record_malformed("bad.ipynb", "Malformed notebook bad.ipynb: missing field `cells`");

        let out = TextFormatter::without_colors().format_report(&report);
        assert!(out.contains("1/1 code cells validated"));
        assert!(out.ends_with("Failed: 1 notebook(s) could not be read"));
        assert!(!out.contains("All code cells have valid syntax!"));
    }
}
