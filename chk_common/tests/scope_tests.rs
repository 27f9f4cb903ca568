//! # Safe Scope Tests
//!
//! Supervisor behavior across several jobs and clones of one scope.

use chk_common::consts::CHECKED_CANCEL_REASON;
use chk_common::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn jobs_before_failure_complete_and_later_jobs_are_refused() {
    let scope = SafeScope::new("pipeline");
    let runs = Arc::new(AtomicUsize::new(0));

    let counted = |runs: &Arc<AtomicUsize>| {
        let runs = Arc::clone(runs);
        move || -> Checked<()> {
            runs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    };

    assert_eq!(scope.launch(counted(&runs)).join(), Ok(()));
    assert_eq!(scope.launch(counted(&runs)).join(), Ok(()));
    assert_eq!(
        scope.launch(forward_error).join(),
        Err(ScopeError::Checked(CheckedError))
    );

    let refused = scope.launch(counted(&runs)).join();
    assert!(matches!(refused, Err(ScopeError::Cancelled { .. })));
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[test]
fn clones_observe_cancellation() {
    let scope = SafeScope::new("shared");
    let observer = scope.clone();

    let _ = scope.launch(forward_error).join();

    assert!(observer.is_cancelled());
    assert_eq!(
        observer.cancellation_reason().as_deref(),
        Some(CHECKED_CANCEL_REASON)
    );
}

#[test]
fn deferred_result_after_cancellation_is_cancelled() {
    let scope = SafeScope::new("deferred");
    scope.cancel("stopped by test");

    let deferred = scope.spawn_for_result(|| Ok(compute_then_declare_error()));
    assert_eq!(
        deferred.join(),
        Err(ScopeError::Cancelled {
            reason: "stopped by test".to_string()
        })
    );
}

#[test]
fn independent_scopes_do_not_share_cancellation() {
    let failing = SafeScope::new("failing");
    let healthy = SafeScope::new("healthy");

    let _ = failing.launch(forward_error).join();

    assert!(failing.is_cancelled());
    assert!(!healthy.is_cancelled());
    assert_eq!(
        healthy.spawn_for_result(|| Ok(compute_then_declare_error())).join(),
        Ok(10)
    );
}
