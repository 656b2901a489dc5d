//! This module provides initialization utilities for nbcheck, such as creating a default configuration file.

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Error type for initialization operations
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Failed to access file {path}: {source}")]
    IoError { source: io::Error, path: String },
}

/// Contents written by `nbcheck init`.
pub const DEFAULT_CONFIG: &str = r#"# nbcheck configuration file

# Kernel language whose notebooks are checked; other notebooks are skipped
language = "rust"

# Files or directories scanned when no paths are given on the command line
paths = ["notebooks"]

# Glob patterns of files or directories to skip
exclude = []

# Respect .gitignore files when scanning directories
respect-gitignore = true

# Output format: "text", "json" or "github"
output-format = "text"

[checker]
# Checker command; the temporary source file path is appended as the last argument
command = ["rustfmt", "--check"]
# Time limit per checker invocation, in milliseconds
timeout = 10000
# Exit code meaning "parsed, but would be reformatted"
reformat-exit-code = 1
# A line of stderr containing this marker means the source did not parse
error-marker = "error: "
# Suffix of the temporary source file
file-suffix = ".rs"

[report]
# Characters of cell code shown per failure
preview-length = 100
# Characters of checker diagnostics shown per failure in text output
error-length = 200
"#;

/// Create a default configuration file at the specified path.
///
/// Returns `true` if the file was created, or `false` if it already exists.
///
/// # Errors
///
/// Returns an error if the file cannot be created due to permissions or other I/O errors.
pub fn create_default_config(path: &Path) -> Result<bool, InitError> {
    if path.exists() {
        return Ok(false);
    }

    fs::write(path, DEFAULT_CONFIG).map_err(|e| InitError::IoError {
        source: e,
        path: path.display().to_string(),
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_matches_defaults() {
        let config = Config::from_toml_str(DEFAULT_CONFIG, "default").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_create_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".nbcheck.toml");

        assert!(create_default_config(&path).unwrap());
        fs::write(&path, "language = \"python\"\n").unwrap();
        assert!(!create_default_config(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "language = \"python\"\n");
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let err = create_default_config(&dir.path().join("missing").join(".nbcheck.toml")).unwrap_err();
        assert!(matches!(err, InitError::IoError { .. }));
    }
}
