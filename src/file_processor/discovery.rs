//! Notebook discovery and path utilities

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension of notebook documents.
pub const NOTEBOOK_EXTENSION: &str = "ipynb";

/// Errors that prevent enumerating the input at all
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Cannot read directory {path}: {source}")]
    Unreadable { path: String, source: io::Error },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

/// Options controlling the directory walk.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    pub exclude: Vec<String>,
    pub respect_gitignore: bool,
}

/// Expands directory-style patterns to also match files within them.
/// Pattern "dir/path" becomes ["dir/path", "dir/path/**"].
///
/// Patterns containing glob characters (*, ?, [) are returned unchanged.
fn expand_directory_pattern(pattern: &str) -> Vec<String> {
    if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
        return vec![pattern.to_string()];
    }

    let base = pattern.trim_end_matches('/');
    vec![base.to_string(), format!("{base}/**")]
}

fn is_notebook(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == NOTEBOOK_EXTENSION)
}

/// Find the notebooks under `paths`.
///
/// Explicit files are taken as given (whatever their extension). Directories
/// are walked recursively; hidden entries such as `.ipynb_checkpoints` are
/// skipped. The result is sorted and deduplicated so that repeated runs see
/// notebooks in the same order.
///
/// # Errors
///
/// Fails if a path does not exist, a directory cannot be listed, or an
/// exclude pattern is invalid.
pub fn find_notebooks(paths: &[PathBuf], options: &DiscoveryOptions) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut notebooks = Vec::new();
    let mut dirs = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(DiscoveryError::NotFound(path.display().to_string()));
        }
        if path.is_file() {
            notebooks.push(clean_path(path));
        } else {
            // Probe once so an unreadable root is fatal instead of a skipped walk entry
            std::fs::read_dir(path).map_err(|e| DiscoveryError::Unreadable {
                path: path.display().to_string(),
                source: e,
            })?;
            dirs.push(path.clone());
        }
    }

    if let Some((first, rest)) = dirs.split_first() {
        let mut walk_builder = WalkBuilder::new(first);
        for dir in rest {
            walk_builder.add(dir);
        }

        if !options.exclude.is_empty() {
            let mut override_builder = OverrideBuilder::new(".");
            for pattern in options.exclude.iter().flat_map(|p| expand_directory_pattern(p)) {
                let exclude_rule = if pattern.starts_with('!') {
                    pattern.clone()
                } else {
                    format!("!{pattern}")
                };
                override_builder
                    .add(&exclude_rule)
                    .map_err(|e| DiscoveryError::InvalidPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    })?;
            }
            let overrides = override_builder.build().map_err(|e| DiscoveryError::InvalidPattern {
                pattern: options.exclude.join(","),
                message: e.to_string(),
            })?;
            walk_builder.overrides(overrides);
        }

        let use_gitignore = options.respect_gitignore;
        walk_builder.ignore(use_gitignore); // Enable/disable .ignore
        walk_builder.git_ignore(use_gitignore); // Enable/disable .gitignore
        walk_builder.git_global(use_gitignore); // Enable/disable global gitignore
        walk_builder.git_exclude(use_gitignore); // Enable/disable .git/info/exclude
        walk_builder.parents(use_gitignore); // Enable/disable parent ignores
        walk_builder.hidden(true); // Skip hidden files and directories
        walk_builder.require_git(false); // Process git ignores even if no repo detected

        for result in walk_builder.build() {
            match result {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() && is_notebook(path) {
                        notebooks.push(clean_path(path));
                    }
                }
                Err(err) => log::warn!("Error walking directory: {err}"),
            }
        }
    }

    notebooks.sort();
    notebooks.dedup();
    Ok(notebooks)
}

/// Drop a leading `./` so reported paths read naturally.
fn clean_path(path: &Path) -> PathBuf {
    path.strip_prefix(".").map(Path::to_path_buf).unwrap_or_else(|_| path.to_path_buf())
}
