//! The five checked-error operations.
//!
//! Operations that can fail return [`Checked`]; operations that cannot
//! return plain values. The failure channel is part of the signature, so
//! the compiler forces every caller to handle or forward it.
//!
//! | Operation                      | Returns                | Fails |
//! |--------------------------------|------------------------|-------|
//! | [`raise_error`]                | `Checked<Infallible>`  | always |
//! | [`compute_then_declare_error`] | `i32`                  | never |
//! | [`forward_error`]              | `Checked<()>`          | always |
//! | [`handle_and_suppress`]        | `()`                   | never |
//! | [`do_nothing_harmful`]         | `()`                   | never |

use std::convert::Infallible;

use crate::console::Console;
use crate::consts::{CLEANUP_MESSAGE, COMPUTED_VALUE};
use crate::error::{Checked, CheckedError};
use crate::finally::defer;

/// Always fails with [`CheckedError`].
///
/// The success type is uninhabited: a caller can match `Ok(never)` with
/// `match never {}` and the compiler proves that arm dead.
pub fn raise_error() -> Checked<Infallible> {
    Err(CheckedError)
}

/// Returns [`COMPUTED_VALUE`]. Never fails.
pub fn compute_then_declare_error() -> i32 {
    COMPUTED_VALUE
}

/// Forwards the failure of [`raise_error`] unchanged.
pub fn forward_error() -> Checked<()> {
    match raise_error()? {}
}

/// Calls [`raise_error`], suppresses the failure and always emits
/// [`CLEANUP_MESSAGE`] exactly once, even if the call unwinds.
pub fn handle_and_suppress(console: &mut dyn Console) {
    let _cleanup = defer(|| console.emit(CLEANUP_MESSAGE));

    match raise_error() {
        Ok(never) => match never {},
        Err(CheckedError) => {
            // Suppressed.
        }
    }
}

/// Performs nothing. The throwing call is deliberately left out.
pub fn do_nothing_harmful() {}
