//! Notebook discovery and the validation run loop.

mod discovery;
mod processing;

pub use discovery::*;
pub use processing::*;
