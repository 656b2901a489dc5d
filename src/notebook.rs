//! Notebook document loading.
//!
//! Only the fields the checker needs are read: `cells[*].cell_type`,
//! `cells[*].source` and `metadata.kernelspec.language`. Everything else in the
//! document (outputs, execution counts, widget state) is ignored.

use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading a notebook document
#[derive(Debug, Error)]
pub enum NotebookError {
    /// The file could not be read
    #[error("Failed to read notebook {path}: {source}")]
    Io { source: io::Error, path: String },

    /// The file is not JSON, or has no `cells` array
    #[error("Malformed notebook {path}: {message}")]
    Malformed { path: String, message: String },
}

impl NotebookError {
    pub fn path(&self) -> &str {
        match self {
            Self::Io { path, .. } | Self::Malformed { path, .. } => path,
        }
    }
}

/// Type of a notebook cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    Code,
    Markdown,
    #[default]
    #[serde(other)]
    Other,
}

/// One cell of a notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub cell_type: CellType,
    /// Source lines in document order. Lines keep their trailing newline.
    pub source: Vec<String>,
    /// 1-based position among all cells of the document.
    pub index: usize,
}

impl Cell {
    /// The cell's full text, lines concatenated in order.
    pub fn text(&self) -> String {
        self.source.concat()
    }
}

/// A parsed notebook.
#[derive(Debug, Clone)]
pub struct NotebookDocument {
    pub path: PathBuf,
    pub cells: Vec<Cell>,
    /// `metadata.kernelspec.language`, if declared
    pub kernel_language: Option<String>,
}

// The on-disk shape. `source` is an array of lines in nbformat 4, but older
// writers and hand-edited files use a single string.
#[derive(Deserialize)]
struct RawNotebook {
    cells: Vec<RawCell>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
}

#[derive(Deserialize)]
struct RawMetadata {
    #[serde(default)]
    kernelspec: Option<RawKernelSpec>,
}

#[derive(Deserialize)]
struct RawKernelSpec {
    #[serde(default)]
    language: Option<String>,
}

#[derive(Deserialize)]
struct RawCell {
    #[serde(default)]
    cell_type: CellType,
    #[serde(default)]
    source: RawSource,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSource {
    Lines(Vec<String>),
    Text(String),
}

impl Default for RawSource {
    fn default() -> Self {
        RawSource::Lines(Vec::new())
    }
}

impl From<RawSource> for Vec<String> {
    fn from(source: RawSource) -> Self {
        match source {
            RawSource::Lines(lines) => lines,
            RawSource::Text(text) if text.is_empty() => Vec::new(),
            RawSource::Text(text) => text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }
}

impl NotebookDocument {
    /// Load a notebook from disk.
    ///
    /// # Errors
    ///
    /// Returns [`NotebookError::Io`] if the file cannot be read and
    /// [`NotebookError::Malformed`] if it is not a notebook document.
    pub fn load(path: &Path) -> Result<Self, NotebookError> {
        let content = std::fs::read_to_string(path).map_err(|e| NotebookError::Io {
            source: e,
            path: path.display().to_string(),
        })?;
        Self::from_json_str(path, &content)
    }

    /// Parse a notebook from its JSON text. `path` is only used for reporting.
    pub fn from_json_str(path: &Path, content: &str) -> Result<Self, NotebookError> {
        let raw: RawNotebook = serde_json::from_str(content).map_err(|e| NotebookError::Malformed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let cells = raw
            .cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| Cell {
                cell_type: cell.cell_type,
                source: cell.source.into(),
                index: i + 1,
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            cells,
            kernel_language: raw
                .metadata
                .and_then(|m| m.kernelspec)
                .and_then(|k| k.language),
        })
    }
}
