//! Shared fixtures for the CLI tests: notebook writers and scripted checkers.
#![allow(dead_code)]

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Cell specification for [`write_notebook`]: `(cell_type, source)`.
pub type CellSpec<'a> = (&'a str, &'a str);

/// Write a notebook with the given kernel language and cells.
pub fn write_notebook(path: &Path, language: Option<&str>, cells: &[CellSpec]) {
    let cells: Vec<_> = cells
        .iter()
        .map(|(cell_type, source)| {
            json!({
                "cell_type": cell_type,
                "metadata": {},
                "source": source.split_inclusive('\n').collect::<Vec<_>>(),
            })
        })
        .collect();
    let metadata = match language {
        Some(lang) => json!({ "kernelspec": { "name": lang, "display_name": lang, "language": lang } }),
        None => json!({}),
    };
    let doc = json!({ "cells": cells, "metadata": metadata, "nbformat": 4, "nbformat_minor": 5 });
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
}

/// Write an executable POSIX shell script.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Checker that rejects any source containing `BROKEN`, reporting it at line 2
/// of the file it was given, and rejects inner attributes inside the wrapping
/// function. Every invocation is appended to `calls.log`.
#[cfg(unix)]
pub fn marker_checker(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "marker-check.sh",
        r#"for f; do :; done
echo "$f" >> "$(dirname "$0")/calls.log"
if head -n 1 "$f" | grep -q '^fn __check__' && grep -q '^#!\[' "$f"; then
  echo "error: an inner attribute is not permitted in this context" >&2
  exit 1
fi
if grep -q BROKEN "$f"; then
  echo "error: expected item, found \`BROKEN\`" >&2
  echo " --> $f:2:1" >&2
  exit 1
fi
exit 0"#,
    )
}

/// Checker that never finishes on its own.
#[cfg(unix)]
pub fn sleeping_checker(dir: &Path) -> PathBuf {
    write_script(dir, "sleep-check.sh", "exec sleep 30")
}

/// Number of checker invocations recorded by [`marker_checker`].
pub fn call_count(dir: &Path) -> usize {
    fs::read_to_string(dir.join("calls.log"))
        .map(|log| log.lines().count())
        .unwrap_or(0)
}

/// Project directory with a `.git` marker so config discovery stops inside it,
/// and a `.nbcheck.toml` pointing the checker at `checker` with temp files in `scratch/`.
pub fn project_with_config(root: &Path, checker: &Path, extra: &str) -> PathBuf {
    fs::create_dir_all(root.join(".git")).unwrap();
    let scratch = root.join("scratch");
    fs::create_dir_all(&scratch).unwrap();
    let config = format!(
        "{extra}\n[checker]\ncommand = [{:?}]\ntemp-dir = {:?}\n",
        checker.display().to_string(),
        scratch.display().to_string()
    );
    fs::write(root.join(".nbcheck.toml"), config).unwrap();
    scratch
}
