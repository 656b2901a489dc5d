//! Configuration loading for nbcheck.
//!
//! Settings come from `.nbcheck.toml` (or `nbcheck.toml`), found by walking up
//! from the current directory, or from an explicit `--config` path. Command
//! line flags are applied on top by the binary.

use crate::cell_check::CheckerConfig;
use crate::output::OutputFormat;
use crate::report::DEFAULT_PREVIEW_LENGTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config file names searched for, in order of precedence.
pub const CONFIG_FILES: &[&str] = &[".nbcheck.toml", "nbcheck.toml"];

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Kernel language whose notebooks are checked (default: "rust")
    #[serde(default = "default_language")]
    pub language: String,

    /// Files or directories to scan when none are given on the command line
    #[serde(default = "default_paths")]
    pub paths: Vec<String>,

    /// Glob patterns of files or directories to skip
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Respect .gitignore files when scanning directories (default: true)
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Output format: "text", "json" or "github" (default: "text")
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// External checker settings
    #[serde(default)]
    pub checker: CheckerConfig,

    /// Failure report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Settings for how failures are printed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ReportConfig {
    /// Maximum characters of cell code shown per failure (default: 100)
    #[serde(default = "default_preview_length")]
    pub preview_length: usize,

    /// Maximum characters of checker diagnostics shown per failure (default: 200)
    #[serde(default = "default_error_length")]
    pub error_length: usize,
}

fn default_language() -> String {
    "rust".to_string()
}

fn default_paths() -> Vec<String> {
    vec!["notebooks".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_output_format() -> String {
    "text".to_string()
}

fn default_preview_length() -> usize {
    DEFAULT_PREVIEW_LENGTH
}

fn default_error_length() -> usize {
    200
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_length: default_preview_length(),
            error_length: default_error_length(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            paths: default_paths(),
            exclude: Vec::new(),
            respect_gitignore: true,
            output_format: default_output_format(),
            checker: CheckerConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config file at {path}: {message}")]
    ParseError { path: String, message: String },

    /// Invalid value in an otherwise well-formed file
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

impl Config {
    /// Parse configuration from TOML text. `path` is only used in errors.
    pub fn from_toml_str(content: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            source: e,
            path: path_str.clone(),
        })?;
        Self::from_toml_str(&content, &path_str)
    }

    /// Check invariants serde can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.language.trim().is_empty() {
            return Err(ConfigError::InvalidValue("language must not be empty".to_string()));
        }
        if self.checker.command.is_empty() {
            return Err(ConfigError::InvalidValue("checker.command must not be empty".to_string()));
        }
        if self.checker.timeout == 0 {
            return Err(ConfigError::InvalidValue(
                "checker.timeout must be greater than 0 milliseconds".to_string(),
            ));
        }
        self.output_format
            .parse::<OutputFormat>()
            .map_err(ConfigError::InvalidValue)?;
        Ok(())
    }
}

/// Load configuration.
///
/// With an explicit path, that file must exist and parse. Otherwise the first
/// config file found walking up from `start_dir` is used, falling back to
/// defaults when there is none.
pub fn load_config(explicit: Option<&Path>, start_dir: &Path) -> Result<(Config, Option<PathBuf>), ConfigError> {
    if let Some(path) = explicit {
        return Ok((Config::from_file(path)?, Some(path.to_path_buf())));
    }

    match discover_config_upward(start_dir) {
        Some(path) => {
            log::debug!("[nbcheck-config] Using config file: {}", path.display());
            Ok((Config::from_file(&path)?, Some(path)))
        }
        None => {
            log::debug!("[nbcheck-config] No config file found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

/// Find the nearest config file at or above `start_dir`.
pub fn discover_config_upward(start_dir: &Path) -> Option<PathBuf> {
    const MAX_DEPTH: usize = 100;

    let mut current = if start_dir.is_relative() {
        std::env::current_dir()
            .map(|cwd| cwd.join(start_dir))
            .unwrap_or_else(|_| start_dir.to_path_buf())
    } else {
        start_dir.to_path_buf()
    };

    for _ in 0..MAX_DEPTH {
        log::debug!("[nbcheck-config] Searching for config in: {}", current.display());
        for name in CONFIG_FILES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        // Stop at the repository root
        if current.join(".git").exists() {
            break;
        }
        if !current.pop() {
            break;
        }
    }

    None
}
