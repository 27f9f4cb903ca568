//! chk Common Library
//!
//! Checked-error operations and the caller-side machinery around them:
//! a declared failure channel, guaranteed cleanup, unchecked escapes and
//! a supervisor scope that handles failures centrally.
//!
//! # Module Structure
//!
//! - [`error`] - [`CheckedError`] and [`ScopeError`]
//! - [`functions`] - The five checked-error operations
//! - [`finally`] - Guaranteed cleanup guard
//! - [`console`] - Output sink used by operations that print
//! - [`catch`] - `call_safely` / `call_not_safe` and unchecked escapes
//! - [`scope`] - [`SafeScope`](scope::SafeScope) supervisor
//! - [`scenario`] - Named scenarios and their reports
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! chk = { package = "chk_common", path = "../chk_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use chk_common::prelude::*;
//!
//! assert_eq!(forward_error(), Err(CheckedError));
//! ```

pub mod catch;
pub mod config;
pub mod console;
pub mod consts;
pub mod error;
pub mod finally;
pub mod functions;
pub mod prelude;
pub mod scenario;
pub mod scope;

pub use error::{Checked, CheckedError, ScopeError};
