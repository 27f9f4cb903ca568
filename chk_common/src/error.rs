//! Error types for checked-error operations.
//!
//! [`CheckedError`] is the single domain error: a declared, expected
//! failure with no payload. [`ScopeError`] is what a job run inside a
//! [`SafeScope`](crate::scope::SafeScope) reports back to its joiner.

use thiserror::Error;

/// A declared, expected failure.
///
/// Carries no payload. Created at the point of failure and discarded
/// once handled or propagated to the process boundary.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[error("checked error")]
pub struct CheckedError;

/// Result of an operation that declares a [`CheckedError`] failure channel.
pub type Checked<T> = Result<T, CheckedError>;

/// Errors reported by jobs run inside a safe scope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// The job failed with a checked error; the scope was cancelled.
    #[error("job failed: {0}")]
    Checked(#[from] CheckedError),

    /// The scope was already cancelled when the job was due to start.
    #[error("scope cancelled: {reason}")]
    Cancelled {
        /// Reason recorded when the scope was cancelled.
        reason: String,
    },
}

impl ScopeError {
    /// Returns the checked error behind this failure, if any.
    pub fn checked(&self) -> Option<CheckedError> {
        match self {
            Self::Checked(e) => Some(*e),
            Self::Cancelled { .. } => None,
        }
    }
}
