//! Caller-side handling of checked errors.
//!
//! A caller that honours the declared failure channel gets a
//! [`Checked`] value back. A caller that ignores it lets the error
//! escape as an *unchecked* unwind whose payload is the
//! [`CheckedError`] itself. [`call_safely`] folds both shapes back into
//! a [`Checked`] value.
//!
//! ```rust
//! use chk_common::catch::{call_not_safe, call_safely};
//! use chk_common::functions::{compute_then_declare_error, forward_error};
//! use chk_common::CheckedError;
//!
//! assert_eq!(call_safely(|| Ok(compute_then_declare_error())), Ok(10));
//! assert_eq!(call_safely(|| Ok(call_not_safe(forward_error))), Err(CheckedError));
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{Checked, CheckedError};

/// A block that runs once and may fail with a [`CheckedError`].
pub trait CheckedBlock<T> {
    fn invoke(self) -> Checked<T>;
}

impl<T, F> CheckedBlock<T> for F
where
    F: FnOnce() -> Checked<T>,
{
    fn invoke(self) -> Checked<T> {
        self()
    }
}

impl CheckedError {
    /// Raise this error as an unchecked unwind.
    ///
    /// The panic hook is not invoked; the payload is `self`.
    pub fn throw_unchecked(self) -> ! {
        panic::resume_unwind(Box::new(self))
    }

    /// Returns `true` if an unwind payload is an escaped checked error.
    pub fn is_unwind_payload(payload: &(dyn Any + Send)) -> bool {
        payload.is::<CheckedError>()
    }
}

/// Run `block` from a caller that does not check.
///
/// A returned [`CheckedError`] escapes as an unchecked unwind.
pub fn call_not_safe<T>(block: impl CheckedBlock<T>) -> T {
    match block.invoke() {
        Ok(value) => value,
        Err(e) => e.throw_unchecked(),
    }
}

/// Run `block` and turn any checked failure into `Err`.
///
/// Catches both a returned [`CheckedError`] and one escaping as an
/// unchecked unwind. Any other unwind is resumed unchanged.
pub fn call_safely<T>(block: impl CheckedBlock<T>) -> Checked<T> {
    // The block is consumed; nothing it captured is observed after an unwind.
    match panic::catch_unwind(AssertUnwindSafe(|| block.invoke())) {
        Ok(result) => result,
        Err(payload) => match payload.downcast::<CheckedError>() {
            Ok(e) => Err(*e),
            Err(other) => panic::resume_unwind(other),
        },
    }
}
