//! Checker execution engine.
//!
//! Each check writes the text to a fresh temporary file, runs the configured
//! command against it with a timeout, and classifies the result. The temporary
//! file is owned by a [`NamedTempFile`] guard for the duration of one
//! invocation, so it is removed on every return path.

use super::classify::{CheckOutcome, ClassifyRules, classify};
use super::config::CheckerConfig;
use super::diagnostics;
use super::retry::{SourceOrigin, SyntaxChecker};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Prefix of every temporary file the executor creates.
pub const TEMP_FILE_PREFIX: &str = "nbcheck-";

/// Captured result of one checker run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

/// Error while running the checker.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("No checker command configured")]
    EmptyCommand,

    #[error("Checker '{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    #[error("Failed to spawn '{tool}': {source}")]
    Spawn { tool: String, source: io::Error },

    #[error("Checker '{tool}' timed out after {timeout_ms}ms")]
    Timeout { tool: String, timeout_ms: u64 },

    #[error("Failed to prepare temporary file: {0}")]
    TempFile(io::Error),

    #[error("I/O error: {message}")]
    Io { message: String },
}

/// Runs the external checker.
pub struct ToolExecutor {
    command: Vec<String>,
    timeout_ms: u64,
    rules: ClassifyRules,
    file_suffix: String,
    temp_dir: Option<PathBuf>,
}

impl ToolExecutor {
    pub fn new(config: &CheckerConfig) -> Self {
        Self {
            command: config.command.clone(),
            timeout_ms: config.timeout,
            rules: ClassifyRules::from(config),
            file_suffix: config.file_suffix.clone(),
            temp_dir: config.temp_dir.clone(),
        }
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    fn timeout_error(&self, tool: &str) -> ExecutorError {
        ExecutorError::Timeout {
            tool: tool.to_string(),
            timeout_ms: self.timeout_ms,
        }
    }

    /// Write `text` to a temporary file and run the checker on it.
    ///
    /// Returns the raw output together with the temporary path that was used,
    /// so callers can scrub it from diagnostics. The file no longer exists when
    /// this returns.
    pub fn run_on_text(&self, text: &str) -> Result<(ToolOutput, PathBuf), ExecutorError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_FILE_PREFIX).suffix(&self.file_suffix);
        let mut file: NamedTempFile = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ExecutorError::TempFile)?;

        file.write_all(text.as_bytes()).map_err(ExecutorError::TempFile)?;
        file.flush().map_err(ExecutorError::TempFile)?;

        let path = file.path().to_path_buf();
        let output = self.run_on_file(&path)?;
        // `file` drops here and deletes the temp file; early returns above drop it too.
        Ok((output, path))
    }

    /// Run the checker on an existing file, waiting at most the configured timeout.
    pub fn run_on_file(&self, path: &Path) -> Result<ToolOutput, ExecutorError> {
        let Some((tool_name, base_args)) = self.command.split_first() else {
            return Err(ExecutorError::EmptyCommand);
        };

        let mut cmd = Command::new(tool_name);
        cmd.args(base_args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ExecutorError::ToolNotFound {
                    tool: tool_name.clone(),
                }
            } else {
                ExecutorError::Spawn {
                    tool: tool_name.clone(),
                    source: e,
                }
            }
        })?;

        let stdout_rx = spawn_reader(child.stdout.take());
        let stderr_rx = spawn_reader(child.stderr.take());

        // One budget covers both the process and draining its pipes.
        let deadline = Instant::now() + Duration::from_millis(self.timeout_ms);
        let status = loop {
            if let Some(status) = child.try_wait().map_err(|e| ExecutorError::Io {
                message: format!("Failed to poll '{tool_name}': {e}"),
            })? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(self.timeout_error(tool_name));
            }
            thread::sleep(Duration::from_millis(10));
        };

        // A background grandchild can keep the pipes open after the checker
        // exits; readers still running at the deadline are left detached.
        let (Some(stdout), Some(stderr)) = (
            collect_output(stdout_rx, deadline).map_err(|message| ExecutorError::Io { message })?,
            collect_output(stderr_rx, deadline).map_err(|message| ExecutorError::Io { message })?,
        ) else {
            return Err(self.timeout_error(tool_name));
        };

        Ok(ToolOutput {
            stdout,
            stderr,
            exit_code: status.code(),
        })
    }
}

impl SyntaxChecker for ToolExecutor {
    fn check(&self, text: &str, origin: &SourceOrigin) -> CheckOutcome {
        match self.run_on_text(text) {
            Ok((output, temp_path)) => {
                let outcome = classify(&output, &self.rules);
                log::debug!("[nbcheck] {} exited with {:?}: {:?}", origin.label, output.exit_code, outcome);
                diagnostics::remap_outcome(outcome, &temp_path, origin)
            }
            Err(ExecutorError::Timeout { tool, timeout_ms }) => {
                log::debug!("[nbcheck] {tool} timed out after {timeout_ms}ms on {}", origin.label);
                CheckOutcome::Timeout
            }
            Err(e) => CheckOutcome::ToolError { message: e.to_string() },
        }
    }
}

fn read_pipe_to_string<R: Read>(mut pipe: R) -> io::Result<String> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).to_string())
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<mpsc::Receiver<io::Result<String>>> {
    pipe.map(|pipe| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // The receiver is gone once the deadline passed; nothing to report to.
            let _ = tx.send(read_pipe_to_string(pipe));
        });
        rx
    })
}

/// Wait for a reader until `deadline`. `Ok(None)` means the deadline passed.
fn collect_output(rx: Option<mpsc::Receiver<io::Result<String>>>, deadline: Instant) -> Result<Option<String>, String> {
    let Some(rx) = rx else {
        return Ok(Some(String::new()));
    };
    match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
        Ok(Ok(output)) => Ok(Some(output)),
        Ok(Err(e)) => Err(format!("Failed to read output: {e}")),
        Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err("Output reader thread panicked".to_string()),
    }
}
