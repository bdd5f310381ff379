//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], the errors of the run loop and of
//! history navigation. An unmatched bracket is *not* among them: that is a
//! regular way for a program to end and is reported through
//! [`Outcome::Malformed`](super::executor::Outcome::Malformed).

use thiserror::Error;

/// Errors raised while running a program or navigating its history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The configured step budget ran out before the program halted
    #[error("Step limit exceeded: program still running after {limit} steps")]
    StepLimitExceeded { limit: u64 },

    /// Snapshot history limit exceeded
    #[error("Snapshot memory limit exceeded: {current} bytes used, limit is {limit}")]
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History/snapshot operation failed
    #[error("History operation failed: {message}")]
    HistoryOperationFailed { message: String },
}

impl RuntimeError {
    /// Whether the history recorded so far is still complete and navigable
    pub fn keeps_history(&self) -> bool {
        !matches!(self, RuntimeError::HistoryOperationFailed { .. })
    }
}
