//! Selection of the cells worth handing to the syntax checker.

use crate::notebook::{Cell, CellType, NotebookDocument};
use std::fmt;
use std::path::Path;

/// The text of one code cell plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckableSnippet<'a> {
    pub notebook_path: &'a Path,
    /// 1-based cell index within the notebook
    pub cell_index: usize,
    pub code: String,
}

impl CheckableSnippet<'_> {
    /// `<notebook>#cell<N>`, used to label checker diagnostics.
    pub fn label(&self) -> String {
        format!("{}#cell{}", self.notebook_path.display(), self.cell_index)
    }
}

/// The notebook declares a kernel language other than the one being checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelMismatch {
    pub declared: Option<String>,
    pub expected: String,
}

impl fmt::Display for KernelMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.declared {
            Some(lang) => write!(f, "kernel language '{lang}' is not '{}'", self.expected),
            None => write!(f, "no kernel language declared (expected '{}')", self.expected),
        }
    }
}

/// Iterator over the checkable cells of a notebook.
///
/// Cloning forks the cursor. Calling [`checkable_cells`] again starts over.
#[derive(Clone)]
pub struct CheckableCells<'a> {
    path: &'a Path,
    cells: std::slice::Iter<'a, Cell>,
}

impl<'a> Iterator for CheckableCells<'a> {
    type Item = CheckableSnippet<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for cell in self.cells.by_ref() {
            if cell.cell_type != CellType::Code {
                continue;
            }
            let code = cell.text();
            if !is_checkable_source(&code) {
                continue;
            }
            return Some(CheckableSnippet {
                notebook_path: self.path,
                cell_index: cell.index,
                code,
            });
        }
        None
    }
}

/// Empty cells and `:`-prefixed kernel directives (e.g. `:dep foo`) are not code.
pub fn is_checkable_source(code: &str) -> bool {
    let trimmed = code.trim_start();
    !trimmed.is_empty() && !trimmed.starts_with(':')
}

/// Select the code cells of `doc` to check against `target_language`.
///
/// # Errors
///
/// Returns [`KernelMismatch`] when the notebook's declared kernel language does
/// not match `target_language` (case-insensitive). The whole notebook is then
/// skipped.
pub fn checkable_cells<'a>(
    doc: &'a NotebookDocument,
    target_language: &str,
) -> Result<CheckableCells<'a>, KernelMismatch> {
    let matches = doc
        .kernel_language
        .as_deref()
        .is_some_and(|lang| lang.eq_ignore_ascii_case(target_language));

    if !matches {
        return Err(KernelMismatch {
            declared: doc.kernel_language.clone(),
            expected: target_language.to_string(),
        });
    }

    Ok(CheckableCells {
        path: &doc.path,
        cells: doc.cells.iter(),
    })
}
