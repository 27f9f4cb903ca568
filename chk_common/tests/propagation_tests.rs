//! # Checked-Error Propagation Tests
//!
//! End-to-end behavior of the five operations as seen by a caller:
//!
//! - Failure channel of each operation
//! - Guaranteed cleanup on every exit path
//! - Idempotence across repeated calls
//! - Unchecked escapes crossing a caller that does not check

use chk_common::consts::{CLEANUP_MESSAGE, UNREACHABLE_MESSAGE};
use chk_common::prelude::*;
use std::panic::{self, AssertUnwindSafe};

// ─── Operations ─────────────────────────────────────────────────────

#[test]
fn raise_error_fails_with_checked_error() {
    assert_eq!(raise_error(), Err(CheckedError));
}

#[test]
fn compute_returns_ten() {
    assert_eq!(compute_then_declare_error(), 10);
}

#[test]
fn forward_error_is_not_wrapped() {
    let forwarded: Box<dyn std::error::Error> = Box::new(forward_error().unwrap_err());
    assert_eq!(forwarded.downcast_ref::<CheckedError>(), Some(&CheckedError));
    assert_eq!(forwarded.to_string(), CheckedError.to_string());
}

#[test]
fn handle_and_suppress_returns_and_cleans_up_once() {
    let mut console = Transcript::new();
    handle_and_suppress(&mut console);

    assert_eq!(console.count(CLEANUP_MESSAGE), 1);
    assert_eq!(console.count(UNREACHABLE_MESSAGE), 0);
    assert_eq!(console.len(), 1);
}

#[test]
fn do_nothing_harmful_returns_unit_and_emits_nothing() {
    let () = do_nothing_harmful();

    let report = chk_common::scenario::run(Scenario::Nothing);
    assert_eq!(report.outcome, Scenario::Nothing.expected());
    assert!(report.lines.is_empty());
}

// ─── Idempotence ────────────────────────────────────────────────────

#[test]
fn repeated_calls_produce_identical_outcomes() {
    for _ in 0..5 {
        assert_eq!(raise_error(), Err(CheckedError));
        assert_eq!(compute_then_declare_error(), 10);
        assert_eq!(forward_error(), Err(CheckedError));
        do_nothing_harmful();

        let mut console = Transcript::new();
        handle_and_suppress(&mut console);
        assert_eq!(console.lines(), [CLEANUP_MESSAGE]);
    }
}

#[test]
fn repeated_scenario_reports_are_identical() {
    for scenario in Scenario::ALL {
        let first = chk_common::scenario::run(scenario);
        let second = chk_common::scenario::run(scenario);
        assert_eq!(first, second, "scenario {scenario} is not idempotent");
    }
}

// ─── Guaranteed Cleanup ─────────────────────────────────────────────

#[test]
fn cleanup_runs_when_failure_propagates() {
    let mut console = Transcript::new();
    let result = {
        let _cleanup = defer(|| console.emit(CLEANUP_MESSAGE));
        forward_error()
    };

    assert_eq!(result, Err(CheckedError));
    assert_eq!(console.count(CLEANUP_MESSAGE), 1);
}

#[test]
fn cleanup_runs_when_unchecked_escape_unwinds() {
    let mut console = Transcript::new();
    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        try_finally(
            || call_not_safe(forward_error),
            || console.emit(CLEANUP_MESSAGE),
        )
    }));

    let payload = unwound.unwrap_err();
    assert!(payload.is::<CheckedError>());
    assert_eq!(console.count(CLEANUP_MESSAGE), 1);
}

// ─── Unchecked Escapes ──────────────────────────────────────────────

#[test]
fn call_safely_recovers_escape_through_non_checking_caller() {
    // A caller that ignores the declared channel, wrapped by one that does not.
    fn ignores_declaration() {
        call_not_safe(forward_error);
    }

    assert_eq!(
        call_safely(|| {
            ignores_declaration();
            Ok(())
        }),
        Err(CheckedError)
    );
}

#[test]
fn declared_value_survives_call_safely() {
    assert_eq!(call_safely(|| Ok(compute_then_declare_error())), Ok(10));
}
