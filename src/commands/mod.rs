//! Command handlers for the nbcheck CLI.
//!
//! Each subcommand has its own module with a public handler function
//! that `main()` dispatches to.

pub mod check;
pub mod init;
pub mod schema;
pub mod version;
