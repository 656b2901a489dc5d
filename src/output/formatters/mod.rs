//! Output formatter implementations

pub mod github;
pub mod json;
pub mod text;

pub use github::GitHubFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;
