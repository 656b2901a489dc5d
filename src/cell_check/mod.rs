//! Syntax checking of notebook cells with an external tool.
//!
//! # Overview
//!
//! Each checkable cell goes through at most two checker invocations:
//!
//! 1. The cell text wrapped in a function harness ([`harness`]), since most
//!    cells are statements that only parse inside a function body.
//! 2. If that is rejected, the raw cell text, which recovers cells that are
//!    complete top-level items ([`retry`]).
//!
//! The checker itself ([`executor`]) runs against a temporary file with a
//! timeout, and its exit is interpreted by [`classify`].
//!
//! # Configuration
//!
//! ```toml
//! [checker]
//! command = ["rustfmt", "--check"]  # temp file path is appended
//! timeout = 10000                   # ms per invocation
//! reformat-exit-code = 1            # "would reformat" still means it parsed
//! error-marker = "error: "
//! ```

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod executor;
pub mod harness;
pub mod retry;

pub use classify::{CheckOutcome, ClassifyRules, classify};
pub use config::CheckerConfig;
pub use executor::{ExecutorError, ToolExecutor, ToolOutput};
pub use retry::{CellVerdict, RetryState, SourceOrigin, SyntaxChecker, validate_snippet};
