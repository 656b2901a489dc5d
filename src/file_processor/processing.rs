//! Sequential validation of notebooks, one cell at a time.

use crate::cell_check::{CheckOutcome, SyntaxChecker, ToolExecutor, validate_snippet};
use crate::cell_filter::checkable_cells;
use crate::config::Config;
use crate::notebook::NotebookDocument;
use crate::report::ValidationReport;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use super::discovery::{DiscoveryError, DiscoveryOptions, find_notebooks};

/// Validate every checkable cell of one loaded notebook into `report`.
///
/// `interrupt` is polled after each cell. Once set, the cell in flight is
/// finished, the rest are left alone and the report is marked interrupted.
/// A checker that died during an interrupted run does not count as a failure.
pub fn validate_document<C: SyntaxChecker>(
    doc: &NotebookDocument,
    language: &str,
    checker: &C,
    report: &mut ValidationReport,
    interrupt: &AtomicBool,
) {
    let path = doc.path.display().to_string();

    let cells = match checkable_cells(doc, language) {
        Ok(cells) => cells,
        Err(mismatch) => {
            log::info!("Skipping {path} ({mismatch})");
            report.record_skipped(&path, mismatch.to_string());
            return;
        }
    };

    log::info!("Checking {path}...");
    report.notebooks_checked += 1;

    for snippet in cells {
        let verdict = validate_snippet(checker, &snippet.code, &snippet.label(), interrupt);
        log::debug!(
            "[nbcheck] {} -> {:?} after {} attempt(s)",
            snippet.label(),
            verdict.outcome,
            verdict.attempts
        );

        if interrupt.load(Ordering::SeqCst) {
            if !matches!(verdict.outcome, CheckOutcome::ToolError { .. }) {
                report.record(&path, snippet.cell_index, &snippet.code, &verdict.outcome);
            }
            log::warn!("Interrupted, stopping after {}", snippet.label());
            report.interrupted = true;
            return;
        }
        report.record(&path, snippet.cell_index, &snippet.code, &verdict.outcome);
    }
}

/// Load and validate one notebook file. Unreadable or malformed files are
/// recorded in the report rather than returned as errors.
pub fn validate_notebook_file<C: SyntaxChecker>(
    path: &Path,
    language: &str,
    checker: &C,
    report: &mut ValidationReport,
    interrupt: &AtomicBool,
) {
    match NotebookDocument::load(path) {
        Ok(doc) => validate_document(&doc, language, checker, report, interrupt),
        Err(e) => {
            log::warn!("{e}");
            report.record_malformed(e.path(), e.to_string());
        }
    }
}

/// Validate a list of notebook files in order.
///
/// `interrupt` is polled before each notebook and after each cell; once set,
/// the remaining work is left alone and the report is marked interrupted.
pub fn validate_notebooks<C: SyntaxChecker>(
    notebooks: &[PathBuf],
    language: &str,
    checker: &C,
    mut report: ValidationReport,
    interrupt: &AtomicBool,
) -> ValidationReport {
    for path in notebooks {
        if interrupt.load(Ordering::SeqCst) {
            log::warn!("Interrupted, stopping before {}", path.display());
            break;
        }
        validate_notebook_file(path, language, checker, &mut report, interrupt);
    }
    if interrupt.load(Ordering::SeqCst) {
        report.interrupted = true;
    }
    report
}

/// Discover notebooks under `paths` and validate them with the configured checker.
///
/// # Errors
///
/// Only failing to enumerate the inputs is an error; everything that goes
/// wrong per notebook or per cell ends up in the report.
pub fn run(config: &Config, paths: &[PathBuf], interrupt: &AtomicBool) -> Result<ValidationReport, DiscoveryError> {
    let notebooks = find_notebooks(
        paths,
        &DiscoveryOptions {
            exclude: config.exclude.clone(),
            respect_gitignore: config.respect_gitignore,
        },
    )?;
    log::debug!("[nbcheck] Found {} notebook(s)", notebooks.len());

    let executor = ToolExecutor::new(&config.checker);
    let report = ValidationReport::new(config.report.preview_length, executor.timeout_ms());
    Ok(validate_notebooks(
        &notebooks,
        &config.language,
        &executor,
        report,
        interrupt,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_check::SourceOrigin;
    use crate::cell_check::harness::HARNESS_PREFIX;
    use pretty_assertions::assert_eq;
    use std::cell::Cell as Counter;
    use std::fs;
    use tempfile::tempdir;

    /// Accepts anything except text containing `BROKEN`; counts invocations.
    struct MarkerChecker {
        calls: Counter<usize>,
    }

    impl MarkerChecker {
        fn new() -> Self {
            Self { calls: Counter::new(0) }
        }
    }

    impl SyntaxChecker for MarkerChecker {
        fn check(&self, text: &str, _origin: &SourceOrigin) -> CheckOutcome {
            self.calls.set(self.calls.get() + 1);
            if text.contains("BROKEN") {
                CheckOutcome::Invalid {
                    message: "error: BROKEN token".to_string(),
                }
            } else if text.contains("fn top_level") && text.starts_with(HARNESS_PREFIX) {
                CheckOutcome::Invalid {
                    message: "error: nested item".to_string(),
                }
            } else {
                CheckOutcome::Valid
            }
        }
    }

    fn notebook_json(language: &str, cells: &[(&str, &str)]) -> String {
        let cells: Vec<serde_json::Value> = cells
            .iter()
            .map(|(cell_type, source)| serde_json::json!({"cell_type": cell_type, "metadata": {}, "source": [source]}))
            .collect();
        serde_json::json!({
            "cells": cells,
            "metadata": {"kernelspec": {"language": language, "name": language}},
            "nbformat": 4,
            "nbformat_minor": 5
        })
        .to_string()
    }

    #[test]
    fn test_mixed_notebooks() {
        let dir = tempdir().unwrap();
        let rust_nb = dir.path().join("a_rust.ipynb");
        let py_nb = dir.path().join("b_python.ipynb");
        fs::write(
            &rust_nb,
            notebook_json(
                "rust",
                &[
                    ("markdown", "# Intro"),
                    ("code", "let x = 1;"),
                    ("code", ":dep serde"),
                    ("code", "   "),
                    ("code", "fn top_level() {}"),
                    ("code", "BROKEN ( {"),
                ],
            ),
        )
        .unwrap();
        fs::write(&py_nb, notebook_json("python", &[("code", "BROKEN python")])).unwrap();

        let checker = MarkerChecker::new();
        let report = validate_notebooks(
            &[rust_nb.clone(), py_nb.clone()],
            "rust",
            &checker,
            ValidationReport::default(),
            &AtomicBool::new(false),
        );

        assert_eq!(report.total_checked, 3);
        assert_eq!(report.valid_count, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].cell_index, 6);
        assert_eq!(report.failures[0].notebook_path, rust_nb.display().to_string());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].path, py_nb.display().to_string());
        assert_eq!(report.notebooks_checked, 1);
        // 1 for `let`, 2 for the top-level fn, 2 for the broken cell
        assert_eq!(checker.calls.get(), 5);
    }

    #[test]
    fn test_malformed_notebook_does_not_stop_run() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("a_bad.ipynb");
        let good = dir.path().join("b_good.ipynb");
        fs::write(&bad, "{ definitely not json").unwrap();
        fs::write(&good, notebook_json("rust", &[("code", "let x = 1;")])).unwrap();

        let report = validate_notebooks(
            &[bad.clone(), good],
            "rust",
            &MarkerChecker::new(),
            ValidationReport::default(),
            &AtomicBool::new(false),
        );

        assert_eq!(report.malformed.len(), 1);
        assert_eq!(report.malformed[0].path, bad.display().to_string());
        assert_eq!(report.total_checked, 1);
        assert!(report.is_success());
    }

    #[test]
    fn test_interrupt_stops_before_next_notebook() {
        let dir = tempdir().unwrap();
        let nb = dir.path().join("a.ipynb");
        fs::write(&nb, notebook_json("rust", &[("code", "let x = 1;")])).unwrap();

        let report = validate_notebooks(
            &[nb],
            "rust",
            &MarkerChecker::new(),
            ValidationReport::default(),
            &AtomicBool::new(true),
        );

        assert!(report.interrupted);
        assert_eq!(report.total_checked, 0);
    }

    /// Raises the interrupt flag during its first call, like a Ctrl-C arriving
    /// while the checker runs. `killed` makes that call look like a signal death.
    struct InterruptingChecker<'a> {
        flag: &'a AtomicBool,
        killed: bool,
        calls: Counter<usize>,
    }

    impl SyntaxChecker for InterruptingChecker<'_> {
        fn check(&self, _text: &str, _origin: &SourceOrigin) -> CheckOutcome {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() == 1 {
                self.flag.store(true, Ordering::SeqCst);
                if self.killed {
                    return CheckOutcome::ToolError {
                        message: "checker terminated by signal: ".to_string(),
                    };
                }
            }
            CheckOutcome::Valid
        }
    }

    #[test]
    fn test_interrupt_mid_notebook_finishes_current_cell() {
        let dir = tempdir().unwrap();
        let nb = dir.path().join("a.ipynb");
        fs::write(
            &nb,
            notebook_json("rust", &[("code", "let a = 1;"), ("code", "let b = 2;"), ("code", "let c = 3;")]),
        )
        .unwrap();

        let flag = AtomicBool::new(false);
        let checker = InterruptingChecker {
            flag: &flag,
            killed: false,
            calls: Counter::new(0),
        };
        let report = validate_notebooks(&[nb], "rust", &checker, ValidationReport::default(), &flag);

        assert_eq!(checker.calls.get(), 1);
        assert_eq!(report.total_checked, 1);
        assert_eq!(report.valid_count, 1);
        assert!(report.interrupted);
    }

    #[test]
    fn test_checker_killed_by_interrupt_is_not_a_failure() {
        let dir = tempdir().unwrap();
        let nb = dir.path().join("a.ipynb");
        fs::write(&nb, notebook_json("rust", &[("code", "let a = 1;"), ("code", "let b = 2;")])).unwrap();

        let flag = AtomicBool::new(false);
        let checker = InterruptingChecker {
            flag: &flag,
            killed: true,
            calls: Counter::new(0),
        };
        let report = validate_notebooks(&[nb], "rust", &checker, ValidationReport::default(), &flag);

        // No raw retry and nothing recorded for the killed cell
        assert_eq!(checker.calls.get(), 1);
        assert_eq!(report.total_checked, 0);
        assert!(report.failures.is_empty());
        assert!(report.interrupted);
        assert_eq!(crate::exit_codes::for_report(&report), crate::exit_codes::INTERRUPTED);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dir = tempdir().unwrap();
        let nb = dir.path().join("a.ipynb");
        fs::write(&nb, notebook_json("rust", &[("code", "let x = 1;"), ("code", "BROKEN")])).unwrap();

        let run_once = || {
            validate_notebooks(
                std::slice::from_ref(&nb),
                "rust",
                &MarkerChecker::new(),
                ValidationReport::default(),
                &AtomicBool::new(false),
            )
        };
        assert_eq!(run_once(), run_once());
    }
}
