//! Configuration types for the external syntax checker.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How to invoke the external checker and how to read its answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct CheckerConfig {
    /// Command to run (first element is the binary, rest are arguments).
    /// The path of the file to check is appended as the last argument.
    #[serde(default = "default_command")]
    pub command: Vec<String>,

    /// Timeout per checker invocation in milliseconds (default: 10000)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Non-zero exit code meaning "parsed, but would be reformatted" (default: 1)
    #[serde(default = "default_reformat_exit_code")]
    pub reformat_exit_code: Option<i32>,

    /// Text on the checker's stderr that marks a parse failure (default: "error: ")
    #[serde(default = "default_error_marker")]
    pub error_marker: String,

    /// Suffix of the temporary file handed to the checker (default: ".rs")
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,

    /// Directory for temporary files (default: the system temp directory)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

fn default_command() -> Vec<String> {
    vec!["rustfmt".to_string(), "--check".to_string()]
}

fn default_timeout() -> u64 {
    10_000
}

fn default_reformat_exit_code() -> Option<i32> {
    Some(1)
}

fn default_error_marker() -> String {
    "error: ".to_string()
}

fn default_file_suffix() -> String {
    ".rs".to_string()
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            timeout: default_timeout(),
            reformat_exit_code: default_reformat_exit_code(),
            error_marker: default_error_marker(),
            file_suffix: default_file_suffix(),
            temp_dir: None,
        }
    }
}
