use crate::policy::{Outcome, Verdict};
use crate::report::model::RunReport;

pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", report.tool.name, report.tool.version));
    if !report.invocation.command.is_empty() {
        out.push_str(&format!("Command: {}\n", report.invocation.command.join(" ")));
    }
    out.push_str(&format!("Sources: {}\n", report.invocation.source_count));
    out.push_str(&format!("Outcome: {}\n", report.outcome));
    if let Some(code) = report.outcome.exit_code() {
        out.push_str(&format!("Exit code: {code}\n"));
    }
    if let Outcome::ToolError { diagnostic, .. } = &report.outcome {
        out.push_str(&format!("Diagnostic: {diagnostic}\n"));
    }
    match &report.verdict {
        Verdict::Continue => out.push_str("Verdict: continue\n"),
        Verdict::Fail { message } => out.push_str(&format!("Verdict: fail ({message})\n")),
    }
    out
}

/// Pretty JSON rendering of the run report.
pub fn render_json(report: &RunReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FailurePolicy;
    use crate::report::model::{InvocationInfo, Mechanism, ToolInfo};

    fn report(outcome: Outcome, policy: FailurePolicy) -> RunReport {
        RunReport::new(
            ToolInfo::default(),
            InvocationInfo {
                mechanism: Mechanism::Process,
                command: vec!["/usr/bin/phpmd".into(), "/a/Foo.php".into(), "xml".into()],
                source_count: 1,
            },
            outcome,
            policy,
        )
    }

    #[test]
    fn text_lists_command_and_verdict() {
        let text = render_text(&report(Outcome::Success, FailurePolicy::default()));
        assert!(text.starts_with(&format!("mdgate {}\n", env!("CARGO_PKG_VERSION"))));
        assert!(text.contains("Command: /usr/bin/phpmd /a/Foo.php xml"));
        assert!(text.contains("Outcome: SUCCESS"));
        assert!(text.contains("Exit code: 0"));
        assert!(text.contains("Verdict: continue"));
    }

    #[test]
    fn text_shows_diagnostic_and_failure() {
        let outcome = Outcome::ToolError {
            exit_code: Some(1),
            diagnostic: "bad ruleset".into(),
        };
        let text = render_text(&report(outcome, FailurePolicy::new(true, false)));
        assert!(text.contains("Diagnostic: bad ruleset"));
        assert!(text.contains("Verdict: fail (bad ruleset)"));
    }

    #[test]
    fn json_is_valid() {
        let report = report(Outcome::ViolationsFound, FailurePolicy::default());
        let json = render_json(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["outcome"]["kind"], "VIOLATIONS_FOUND");
    }
}
