//! nbcheck: syntax-check the code cells of Jupyter notebooks with an external checker.
//!
//! The pipeline is load ([`notebook`]), filter ([`cell_filter`]), check
//! ([`cell_check`]), aggregate ([`report`]) and render ([`output`]).
//! [`file_processor`] ties these together for a set of input paths.

pub mod cell_check;
pub mod cell_filter;
pub mod config;
pub mod exit_codes;
pub mod file_processor;
pub mod init;
pub mod notebook;
pub mod output;
pub mod report;

pub use cell_check::{CheckOutcome, SyntaxChecker, ToolExecutor};
pub use config::Config;
pub use notebook::NotebookDocument;
pub use report::ValidationReport;
