//! Constants shared by the chk workspace.
//!
//! Single source of truth for the messages and values the scenarios
//! emit and check against.

/// Line emitted by the guaranteed cleanup in `handle_and_suppress`.
pub const CLEANUP_MESSAGE: &str = "This will get called no matter what";

/// Line that would follow a call to `raise_error` if it could return.
/// Never emitted; tests assert its absence.
pub const UNREACHABLE_MESSAGE: &str = "I won't get run";

/// Value returned by `compute_then_declare_error`.
pub const COMPUTED_VALUE: i32 = 10;

/// Reason recorded when a safe scope is cancelled by a checked error.
pub const CHECKED_CANCEL_REASON: &str = "checked error thrown";

/// Prefix of the line the safe-scope scenario emits for its refused job.
pub const CANCELLED_JOB_PREFIX: &str = "second job canceled: ";

/// Default service name when no configuration file is given.
pub const DEFAULT_SERVICE_NAME: &str = "chk";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_distinct() {
        assert_ne!(CLEANUP_MESSAGE, UNREACHABLE_MESSAGE);
        assert!(!CHECKED_CANCEL_REASON.is_empty());
        assert!(!DEFAULT_SERVICE_NAME.is_empty());
    }
}
