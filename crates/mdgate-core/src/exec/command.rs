//! Serializes a validated request into the tool's argument vector.
//!
//! Shape (positional, then flags):
//!
//! ```text
//! <exe> <sources> <format> <rulesets> [--reportfile <path>] [--minimumpriority <n>]
//! ```

use crate::config::model::AnalysisRequest;
use crate::exec::resolve::ResolvedExecutable;
use crate::util::join::{ambiguous_entries, join_list};

/// Flag preceding the report output path.
pub const OPTION_REPORT_FILE: &str = "--reportfile";

/// Flag preceding the minimum rule priority.
pub const OPTION_MIN_PRIORITY: &str = "--minimumpriority";

/// Build the full command line, executable first.
pub fn build_command(executable: &ResolvedExecutable, request: &AnalysisRequest) -> Vec<String> {
    let mut command = vec![
        executable.path().to_string_lossy().into_owned(),
        join_list(&request.sources),
        request.report_format.clone(),
        join_list(&request.rule_sets),
    ];

    if let Some(report_file) = &request.report_file {
        command.push(OPTION_REPORT_FILE.to_string());
        command.push(report_file.clone());
    }
    if let Some(priority) = request.minimum_priority {
        command.push(OPTION_MIN_PRIORITY.to_string());
        command.push(priority.to_string());
    }

    command
}

/// Log every source or rule set entry that phpmd will split apart.
pub fn warn_ambiguous(request: &AnalysisRequest) {
    for (kind, items) in [("source file", &request.sources), ("rule set", &request.rule_sets)] {
        for entry in ambiguous_entries(items) {
            log::warn!("{kind} `{entry}` contains a comma and will be split by phpmd");
        }
    }
}
