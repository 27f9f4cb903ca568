//! Guaranteed cleanup.
//!
//! A [`Finally`] guard runs its action exactly once when it goes out of
//! scope: on normal return, on an early `return`/`?`, and while a panic
//! unwinds through the enclosing frame.
//!
//! ```rust
//! use chk_common::finally::defer;
//!
//! let mut closed = false;
//! {
//!     let _close = defer(|| closed = true);
//!     // ... work that may return early or unwind ...
//! }
//! assert!(closed);
//! ```

use std::fmt;

/// Scope guard that runs `action` when dropped.
#[must_use = "the cleanup runs when the guard is dropped; binding it to `_` drops it immediately"]
pub struct Finally<F: FnOnce()> {
    action: Option<F>,
}

impl<F: FnOnce()> Finally<F> {
    /// Create a guard for `action`.
    pub fn new(action: F) -> Self {
        Self {
            action: Some(action),
        }
    }

    /// Drop the guard without running its action.
    pub fn dismiss(mut self) {
        self.action = None;
    }
}

impl<F: FnOnce()> Drop for Finally<F> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

impl<F: FnOnce()> fmt::Debug for Finally<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Finally")
            .field("armed", &self.action.is_some())
            .finish()
    }
}

/// Shorthand for [`Finally::new`].
pub fn defer<F: FnOnce()>(action: F) -> Finally<F> {
    Finally::new(action)
}

/// Run `body`, then `cleanup`.
///
/// `cleanup` also runs if `body` unwinds; the unwind then continues.
pub fn try_finally<R>(body: impl FnOnce() -> R, cleanup: impl FnOnce()) -> R {
    let _cleanup = defer(cleanup);
    body()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn runs_on_scope_exit() {
        let runs = Cell::new(0);
        {
            let _guard = defer(|| runs.set(runs.get() + 1));
            assert_eq!(runs.get(), 0);
        }
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn runs_on_early_return() {
        let runs = Cell::new(0);
        let early = |fail: bool| -> Result<u8, ()> {
            let _guard = defer(|| runs.set(runs.get() + 1));
            if fail {
                return Err(());
            }
            Ok(1)
        };

        assert_eq!(early(true), Err(()));
        assert_eq!(early(false), Ok(1));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn runs_during_unwind() {
        let runs = Cell::new(0);
        let result: std::thread::Result<()> = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = defer(|| runs.set(runs.get() + 1));
            panic::resume_unwind(Box::new("boom"));
        }));

        assert!(result.is_err());
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn dismissed_guard_never_runs() {
        let runs = Cell::new(0);
        let guard = defer(|| runs.set(runs.get() + 1));
        guard.dismiss();
        assert_eq!(runs.get(), 0);
    }

    #[test]
    fn try_finally_returns_body_value() {
        let cleaned = Cell::new(false);
        let value = try_finally(|| 42, || cleaned.set(true));
        assert_eq!(value, 42);
        assert!(cleaned.get());
    }

    #[test]
    fn try_finally_cleans_up_before_unwind_continues() {
        let cleaned = Cell::new(false);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            try_finally(
                || -> u8 { panic::resume_unwind(Box::new("boom")) },
                || cleaned.set(true),
            )
        }));

        assert!(result.is_err());
        assert!(cleaned.get());
    }

    #[test]
    fn debug_reports_armed_state() {
        let guard = defer(|| {});
        assert_eq!(format!("{guard:?}"), "Finally { armed: true }");
        guard.dismiss();
    }
}
