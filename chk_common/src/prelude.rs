//! Prelude module for common re-exports.
//!
//! ```rust
//! use chk_common::prelude::*;
//! ```

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{Checked, CheckedError, ScopeError};

// ─── Operations ─────────────────────────────────────────────────────
pub use crate::functions::{
    compute_then_declare_error, do_nothing_harmful, forward_error, handle_and_suppress,
    raise_error,
};

// ─── Cleanup & Output ───────────────────────────────────────────────
pub use crate::console::{Console, Stdout, Transcript};
pub use crate::finally::{Finally, defer, try_finally};

// ─── Callers ────────────────────────────────────────────────────────
pub use crate::catch::{CheckedBlock, call_not_safe, call_safely};
pub use crate::scope::{Deferred, Job, SafeScope};

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, DemoConfig, LogLevel, SharedConfig};

// ─── Scenarios ──────────────────────────────────────────────────────
pub use crate::scenario::{Outcome, Report, Scenario};
