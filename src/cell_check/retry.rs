//! Two-attempt validation of a single cell.
//!
//! A cell is first checked inside the function harness. If that attempt is
//! rejected or the checker errors, the raw text is checked on its own, which
//! recovers cells that are already complete items (a `fn`, `struct` or `use`
//! that the harness would otherwise nest). A timeout ends the cell right away,
//! and so does a checker failure once the run has been interrupted.

use super::classify::CheckOutcome;
use super::harness::{self, HARNESS_PREFIX_LINES};
use std::sync::atomic::{AtomicBool, Ordering};

/// Where a checked text came from, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOrigin {
    /// `<notebook>#cell<N>`
    pub label: String,
    /// Lines added in front of the cell text before checking
    pub line_offset: usize,
}

/// Anything that can judge a piece of source text.
pub trait SyntaxChecker {
    fn check(&self, text: &str, origin: &SourceOrigin) -> CheckOutcome;
}

/// Which attempt a cell is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryState {
    TryWrapped,
    /// Carries the wrapped attempt's outcome for message fallback.
    TryRaw { wrapped: CheckOutcome },
    Done(CheckOutcome),
}

impl RetryState {
    /// Advance after an attempt finished with `outcome`.
    pub fn next(self, outcome: CheckOutcome) -> RetryState {
        match self {
            RetryState::TryWrapped => match outcome {
                CheckOutcome::Valid | CheckOutcome::Timeout => RetryState::Done(outcome),
                CheckOutcome::Invalid { .. } | CheckOutcome::ToolError { .. } => {
                    RetryState::TryRaw { wrapped: outcome }
                }
            },
            RetryState::TryRaw { wrapped } => RetryState::Done(with_fallback_message(outcome, wrapped)),
            done @ RetryState::Done(_) => done,
        }
    }
}

// An empty diagnostic from the raw attempt is useless; report the wrapped one instead.
fn with_fallback_message(raw: CheckOutcome, wrapped: CheckOutcome) -> CheckOutcome {
    let raw_is_blank = raw.message().is_some_and(|m| m.trim().is_empty());
    if !raw_is_blank {
        return raw;
    }
    let Some(fallback) = wrapped.message() else {
        return raw;
    };
    let fallback = fallback.to_string();
    match raw {
        CheckOutcome::Invalid { .. } => CheckOutcome::Invalid { message: fallback },
        CheckOutcome::ToolError { .. } => CheckOutcome::ToolError { message: fallback },
        other => other,
    }
}

/// Final judgement on one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellVerdict {
    pub outcome: CheckOutcome,
    /// Number of checker invocations made (1 or 2)
    pub attempts: usize,
}

/// Validate one cell's code with the wrapped-then-raw strategy.
///
/// Once `interrupt` is set a `ToolError` is final; the checker has usually
/// been killed by the same Ctrl-C.
pub fn validate_snippet<C: SyntaxChecker>(
    checker: &C,
    code: &str,
    label: &str,
    interrupt: &AtomicBool,
) -> CellVerdict {
    let mut state = RetryState::TryWrapped;
    let mut attempts = 0;

    loop {
        let outcome = match &state {
            RetryState::TryWrapped => checker.check(
                &harness::wrap(code),
                &SourceOrigin {
                    label: label.to_string(),
                    line_offset: HARNESS_PREFIX_LINES,
                },
            ),
            RetryState::TryRaw { .. } => checker.check(
                code,
                &SourceOrigin {
                    label: label.to_string(),
                    line_offset: 0,
                },
            ),
            RetryState::Done(outcome) => {
                return CellVerdict {
                    outcome: outcome.clone(),
                    attempts,
                };
            }
        };
        attempts += 1;
        state = match outcome {
            CheckOutcome::ToolError { .. } if interrupt.load(Ordering::SeqCst) => RetryState::Done(outcome),
            outcome => state.next(outcome),
        };
    }
}
