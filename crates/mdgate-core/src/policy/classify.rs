//! Outcome classification and failure policy.
//!
//! This module turns the result of one invocation into a build verdict.
//!
//! Classification (exit code contract of phpmd):
//!
//!   - exit 0                         → SUCCESS
//!   - exit 2                         → VIOLATIONS_FOUND
//!   - launch failure or any other    → TOOL_ERROR
//!
//! Verdict:
//!
//!   - SUCCESS            → continue
//!   - TOOL_ERROR         → fail if `fail_on_error`, else log and continue
//!   - VIOLATIONS_FOUND   → fail if `fail_on_rule_violation`, else continue
//!
//! The two flags are independent of each other.

use serde::Serialize;

use crate::error::LaunchError;
use crate::exec::invoke::InvocationResult;

/// Exit status of a clean run.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit status phpmd uses when it ran fine and found violations.
pub const EXIT_VIOLATION: i32 = 2;

/// Build failure message for violations.
pub const VIOLATION_MESSAGE: &str = "Stopping build since PHPMD found rule violations in the code";

/// What happened when the analysis ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Success,
    ToolError {
        exit_code: Option<i32>,
        diagnostic: String,
    },
    ViolationsFound,
}

impl Outcome {
    /// Classify an invocation, including one that never started.
    pub fn from_invocation(result: &Result<InvocationResult, LaunchError>) -> Self {
        match result {
            Err(e) => Outcome::ToolError {
                exit_code: None,
                diagnostic: e.to_string(),
            },
            Ok(r) => match r.exit_code {
                Some(EXIT_SUCCESS) => Outcome::Success,
                Some(EXIT_VIOLATION) => Outcome::ViolationsFound,
                exit_code => Outcome::ToolError {
                    exit_code,
                    diagnostic: r
                        .diagnostic
                        .clone()
                        .unwrap_or_else(|| crate::exec::invoke::UNKNOWN_ERROR.to_string()),
                },
            },
        }
    }

    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Outcome::Success => Some(EXIT_SUCCESS),
            Outcome::ViolationsFound => Some(EXIT_VIOLATION),
            Outcome::ToolError { exit_code, .. } => *exit_code,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "SUCCESS"),
            Outcome::ToolError { .. } => write!(f, "TOOL_ERROR"),
            Outcome::ViolationsFound => write!(f, "VIOLATIONS_FOUND"),
        }
    }
}

/// Whether the enclosing build continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Continue,
    Fail { message: String },
}

impl Verdict {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Verdict::Fail { .. })
    }
}

/// The two independent failure switches of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FailurePolicy {
    pub fail_on_error: bool,
    pub fail_on_rule_violation: bool,
}

impl FailurePolicy {
    pub fn new(fail_on_error: bool, fail_on_rule_violation: bool) -> Self {
        Self {
            fail_on_error,
            fail_on_rule_violation,
        }
    }

    /// Decide the verdict for `outcome`. Tool errors are logged either way.
    pub fn decide(&self, outcome: &Outcome) -> Verdict {
        match outcome {
            Outcome::Success => Verdict::Continue,
            Outcome::ToolError { diagnostic, .. } => {
                log::error!("{diagnostic}");
                if self.fail_on_error {
                    Verdict::Fail {
                        message: diagnostic.clone(),
                    }
                } else {
                    Verdict::Continue
                }
            }
            Outcome::ViolationsFound => {
                if self.fail_on_rule_violation {
                    Verdict::Fail {
                        message: VIOLATION_MESSAGE.to_string(),
                    }
                } else {
                    Verdict::Continue
                }
            }
        }
    }
}
