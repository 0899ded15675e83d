use serde::Serialize;

use crate::SCHEMA_VERSION;
use crate::policy::{FailurePolicy, Outcome, Verdict};

/// Record of one task run.
///
/// Describes how phpmd was invoked and what the task decided. It never
/// contains the analysis report itself.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub schema_version: String,
    pub tool: ToolInfo,
    pub invocation: InvocationInfo,
    pub outcome: Outcome,
    pub policy: FailurePolicy,
    pub verdict: Verdict,
}

impl RunReport {
    pub fn new(
        tool: ToolInfo,
        invocation: InvocationInfo,
        outcome: Outcome,
        policy: FailurePolicy,
    ) -> Self {
        let verdict = policy.decide(&outcome);
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            tool,
            invocation,
            outcome,
            policy,
            verdict,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.verdict.is_fatal()
    }
}

/// Tool metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl Default for ToolInfo {
    fn default() -> Self {
        Self {
            name: crate::TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// How the analysis was run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mechanism {
    Process,
    InProcess,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvocationInfo {
    pub mechanism: Mechanism,
    /// Full argument vector; empty for in-process runs.
    pub command: Vec<String>,
    pub source_count: usize,
}
