//! Named scenarios and their reports.
//!
//! Each [`Scenario`] exercises one operation (or caller-side helper)
//! against a fresh [`Transcript`] and records what happened in a
//! [`Report`]. [`Report::is_expected`] checks the outcome against the
//! behavior every scenario is required to show.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::catch::{call_not_safe, call_safely};
use crate::console::Transcript;
use crate::consts::{
    CANCELLED_JOB_PREFIX, CHECKED_CANCEL_REASON, CLEANUP_MESSAGE, COMPUTED_VALUE,
    UNREACHABLE_MESSAGE,
};
use crate::error::{Checked, CheckedError, ScopeError};
use crate::functions::{
    compute_then_declare_error, do_nothing_harmful, forward_error, handle_and_suppress,
    raise_error,
};
use crate::scope::SafeScope;

/// A runnable demonstration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// `raise_error`: always fails.
    Raise,
    /// `compute_then_declare_error`: returns 10.
    Compute,
    /// `forward_error`: forwards the failure unchanged.
    Forward,
    /// `handle_and_suppress`: suppresses, cleans up once.
    Handle,
    /// `do_nothing_harmful`: nothing at all.
    Nothing,
    /// An unchecked escape recovered by `call_safely`.
    CallSafely,
    /// A failing job cancels its safe scope; the next job is refused.
    SafeScope,
}

impl Scenario {
    /// Every scenario, in run order.
    pub const ALL: [Scenario; 7] = [
        Scenario::Raise,
        Scenario::Compute,
        Scenario::Forward,
        Scenario::Handle,
        Scenario::Nothing,
        Scenario::CallSafely,
        Scenario::SafeScope,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raise => "raise",
            Self::Compute => "compute",
            Self::Forward => "forward",
            Self::Handle => "handle",
            Self::Nothing => "nothing",
            Self::CallSafely => "call_safely",
            Self::SafeScope => "safe_scope",
        }
    }

    /// Outcome this scenario must produce.
    pub const fn expected(self) -> Outcome {
        match self {
            Self::Raise | Self::Forward | Self::CallSafely | Self::SafeScope => Outcome::Failed {
                error: CheckedError,
            },
            Self::Compute => Outcome::Returned {
                value: Some(COMPUTED_VALUE),
            },
            Self::Handle | Self::Nothing => Outcome::Returned { value: None },
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a scenario name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scenario '{0}' (expected one of: raise, compute, forward, handle, nothing, call_safely, safe_scope)")]
pub struct ScenarioParseError(pub String);

impl FromStr for Scenario {
    type Err = ScenarioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.as_str() == s)
            .ok_or_else(|| ScenarioParseError(s.to_string()))
    }
}

/// What a scenario's operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Returned normally, with a value if the operation produces one.
    Returned { value: Option<i32> },
    /// Failed with a checked error.
    Failed {
        #[serde(serialize_with = "serialize_display")]
        error: CheckedError,
    },
}

fn serialize_display<S: Serializer>(error: &CheckedError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl From<Checked<Option<i32>>> for Outcome {
    fn from(result: Checked<Option<i32>>) -> Self {
        match result {
            Ok(value) => Self::Returned { value },
            Err(error) => Self::Failed { error },
        }
    }
}

/// Result of one scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub scenario: Scenario,
    pub outcome: Outcome,
    /// Console lines emitted during the run.
    pub lines: Vec<String>,
}

impl Report {
    /// Returns `true` if outcome and emitted lines match the scenario's contract.
    pub fn is_expected(&self) -> bool {
        if self.outcome != self.scenario.expected() {
            return false;
        }
        if self.lines.iter().any(|l| l == UNREACHABLE_MESSAGE) {
            return false;
        }
        match self.scenario {
            Scenario::Handle => self.lines == [CLEANUP_MESSAGE],
            Scenario::SafeScope => match self.lines.as_slice() {
                [line] => line.strip_prefix(CANCELLED_JOB_PREFIX) == Some(CHECKED_CANCEL_REASON),
                _ => false,
            },
            _ => self.lines.is_empty(),
        }
    }
}

/// Run `scenario` once.
pub fn run(scenario: Scenario) -> Report {
    debug!("Running scenario '{}'", scenario);

    let mut console = Transcript::new();
    let result: Checked<Option<i32>> = match scenario {
        Scenario::Raise => raise_error().map(|never| match never {}),
        Scenario::Compute => Ok(Some(compute_then_declare_error())),
        Scenario::Forward => forward_error().map(|()| None),
        Scenario::Handle => {
            handle_and_suppress(&mut console);
            Ok(None)
        }
        Scenario::Nothing => {
            do_nothing_harmful();
            Ok(None)
        }
        Scenario::CallSafely => call_safely(|| Ok(call_not_safe(forward_error))).map(|()| None),
        Scenario::SafeScope => run_safe_scope(&mut console),
    };

    let report = Report {
        scenario,
        outcome: result.into(),
        lines: console.into_lines(),
    };
    debug!("Scenario '{}' finished: {:?}", scenario, report.outcome);
    report
}

fn run_safe_scope(console: &mut Transcript) -> Checked<Option<i32>> {
    use crate::console::Console;

    let scope = SafeScope::new("scenario");
    let first = scope.launch(forward_error).join();

    if let Err(ScopeError::Cancelled { reason }) = scope.launch(|| Ok(())).join() {
        console.emit(&format!("{CANCELLED_JOB_PREFIX}{reason}"));
    }

    match first {
        Ok(()) | Err(ScopeError::Cancelled { .. }) => Ok(None),
        Err(ScopeError::Checked(e)) => Err(e),
    }
}
