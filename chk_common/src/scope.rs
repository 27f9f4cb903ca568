//! # Safe Scope
//!
//! Supervisor that runs checked blocks on worker threads and handles
//! their failures in one place.
//!
//! # Handling
//!
//! - **Checked failure** (returned or escaped unchecked): logged at WARN,
//!   the scope is cancelled with [`CHECKED_CANCEL_REASON`], the job
//!   reports [`ScopeError::Checked`].
//! - **Scope already cancelled** when a job starts: the block is not run,
//!   the job reports [`ScopeError::Cancelled`].
//! - **Any other panic**: rethrown to whoever joins the job.
//!
//! Cancellation is sticky. Running blocks are not interrupted; a block
//! that wants to stop early can poll [`SafeScope::is_cancelled`] on a
//! clone of the scope.

use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::catch::{CheckedBlock, call_safely};
use crate::consts::CHECKED_CANCEL_REASON;
use crate::error::{CheckedError, ScopeError};

#[derive(Debug)]
struct ScopeState {
    name: String,
    cancelled: AtomicBool,
    reason: Mutex<Option<String>>,
    next_job: AtomicU64,
}

/// Shared handle to a supervisor scope. Clones refer to the same scope.
#[derive(Debug, Clone)]
pub struct SafeScope {
    inner: Arc<ScopeState>,
}

impl SafeScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ScopeState {
                name: name.into(),
                cancelled: AtomicBool::new(false),
                reason: Mutex::new(None),
                next_job: AtomicU64::new(0),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Reason given by the first successful [`cancel`](Self::cancel).
    pub fn cancellation_reason(&self) -> Option<String> {
        self.inner.reason.lock().clone()
    }

    /// Cancel the scope.
    ///
    /// Returns `false` if it was already cancelled; the first reason is kept.
    pub fn cancel(&self, reason: impl Into<String>) -> bool {
        let mut slot = self.inner.reason.lock();
        if slot.is_some() {
            return false;
        }
        let reason = reason.into();
        info!("Safe scope '{}' cancelled: {}", self.name(), reason);
        *slot = Some(reason);
        self.inner.cancelled.store(true, Ordering::Release);
        true
    }

    /// Run `block` on a worker thread.
    pub fn launch<B>(&self, block: B) -> Job
    where
        B: CheckedBlock<()> + Send + 'static,
    {
        self.spawn_for_result(block)
    }

    /// Run `block` on a worker thread and keep its value.
    pub fn spawn_for_result<T, B>(&self, block: B) -> Deferred<T>
    where
        T: Send + 'static,
        B: CheckedBlock<T> + Send + 'static,
    {
        let id = self.inner.next_job.fetch_add(1, Ordering::Relaxed);
        debug!("Launching job {} in safe scope '{}'", id, self.name());

        let scope = self.clone();
        let handle = thread::spawn(move || scope.run_job(id, block));
        Deferred { id, handle }
    }

    fn run_job<T>(&self, id: u64, block: impl CheckedBlock<T>) -> Result<T, ScopeError> {
        if let Some(reason) = self.cancellation_reason() {
            info!("Job {} canceled: safe scope '{}' is cancelled", id, self.name());
            return Err(ScopeError::Cancelled { reason });
        }

        call_safely(block).map_err(|e| self.handle_checked(id, e))
    }

    fn handle_checked(&self, id: u64, error: CheckedError) -> ScopeError {
        warn!(
            "Job {}: {} caught in safe scope '{}'",
            id,
            error,
            self.name()
        );
        self.cancel(CHECKED_CANCEL_REASON);
        ScopeError::Checked(error)
    }
}

/// Handle to a job started with [`SafeScope::spawn_for_result`].
#[derive(Debug)]
pub struct Deferred<T> {
    id: u64,
    handle: JoinHandle<Result<T, ScopeError>>,
}

/// Handle to a job started with [`SafeScope::launch`].
pub type Job = Deferred<()>;

impl<T> Deferred<T> {
    /// Sequence number of the job within its scope.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the job.
    ///
    /// A panic that is not a checked error is resumed on the calling thread.
    pub fn join(self) -> Result<T, ScopeError> {
        match self.handle.join() {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}
