/// Exit codes for nbcheck, following Ruff's convention
///
/// These exit codes allow users and CI/CD systems to distinguish between
/// different types of failures.
/// Success - Every checked code cell parsed
pub const SUCCESS: i32 = 0;

/// Syntax failures found - One or more code cells did not validate
pub const VIOLATIONS_FOUND: i32 = 1;

/// Tool error - Configuration error, unreadable input, or malformed notebooks
pub const TOOL_ERROR: i32 = 2;

/// Interrupted - The run was stopped with Ctrl-C before it finished
pub const INTERRUPTED: i32 = 130;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{INTERRUPTED, SUCCESS, TOOL_ERROR, VIOLATIONS_FOUND};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with violations found code (1)
    pub fn violations_found() -> ! {
        std::process::exit(VIOLATIONS_FOUND);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }

    /// Exit with interrupted code (130)
    pub fn interrupted() -> ! {
        std::process::exit(INTERRUPTED);
    }
}

/// Exit code for a finished run.
///
/// Syntax failures take precedence; malformed notebooks alone are a tool error;
/// an interrupted run never reports success.
pub fn for_report(report: &crate::report::ValidationReport) -> i32 {
    if !report.failures.is_empty() {
        VIOLATIONS_FOUND
    } else if report.interrupted {
        INTERRUPTED
    } else if !report.malformed.is_empty() {
        TOOL_ERROR
    } else {
        SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_check::CheckOutcome;
    use crate::report::ValidationReport;

    #[test]
    fn test_exit_code_precedence() {
        let mut report = ValidationReport::default();
        assert_eq!(for_report(&report), SUCCESS);

        report.record_malformed("bad.ipynb", "not json");
        assert_eq!(for_report(&report), TOOL_ERROR);

        report.interrupted = true;
        assert_eq!(for_report(&report), INTERRUPTED);

        report.record("a.ipynb", 1, "x", &CheckOutcome::Timeout);
        assert_eq!(for_report(&report), VIOLATIONS_FOUND);
    }

    #[test]
    fn test_skips_alone_succeed() {
        let mut report = ValidationReport::default();
        report.record_skipped("py.ipynb", "kernel language 'python' is not 'rust'");
        assert_eq!(for_report(&report), SUCCESS);
    }
}
