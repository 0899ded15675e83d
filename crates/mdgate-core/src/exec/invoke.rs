//! Running the analysis.
//!
//! Two mechanisms sit behind [`Invoker`]: [`ExternalProcess`] spawns the
//! resolved executable and blocks until it exits, [`InProcess`] hands the
//! request to an [`Analyzer`] linked into the host.

use std::process::{Command, Stdio};

use serde::Serialize;

use crate::config::model::AnalysisRequest;
use crate::error::LaunchError;
use crate::exec::command::{build_command, warn_ambiguous};
use crate::exec::resolve::ResolvedExecutable;

/// Diagnostic used when a failing run leaves nothing on stderr.
pub const UNKNOWN_ERROR: &str = "Unknown error.";

/// Exit code plus diagnostic text of a completed run.
///
/// `exit_code` is `None` when the process was terminated by a signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvocationResult {
    pub exit_code: Option<i32>,
    pub diagnostic: Option<String>,
}

impl InvocationResult {
    pub fn success() -> Self {
        Self {
            exit_code: Some(0),
            diagnostic: None,
        }
    }

    pub fn failed(exit_code: Option<i32>, diagnostic: impl Into<String>) -> Self {
        Self {
            exit_code,
            diagnostic: Some(diagnostic.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// A way of running the analysis for a validated request.
pub trait Invoker {
    fn invoke(&self, request: &AnalysisRequest) -> Result<InvocationResult, LaunchError>;

    /// The command line this invoker runs, if it runs one.
    fn command_line(&self, _request: &AnalysisRequest) -> Vec<String> {
        Vec::new()
    }
}

/// In-process analysis entry point returning the tool's exit code.
pub trait Analyzer {
    fn analyze(&self, request: &AnalysisRequest) -> anyhow::Result<i32>;
}

impl<F> Analyzer for F
where
    F: Fn(&AnalysisRequest) -> anyhow::Result<i32>,
{
    fn analyze(&self, request: &AnalysisRequest) -> anyhow::Result<i32> {
        self(request)
    }
}

/// Runs the resolved executable as a child process.
#[derive(Debug, Clone)]
pub struct ExternalProcess {
    executable: ResolvedExecutable,
}

impl ExternalProcess {
    pub fn new(executable: ResolvedExecutable) -> Self {
        Self { executable }
    }
}

impl Invoker for ExternalProcess {
    fn invoke(&self, request: &AnalysisRequest) -> Result<InvocationResult, LaunchError> {
        warn_ambiguous(request);
        run_command(&self.command_line(request))
    }

    fn command_line(&self, request: &AnalysisRequest) -> Vec<String> {
        build_command(&self.executable, request)
    }
}

/// Calls an [`Analyzer`] on the current thread.
pub struct InProcess<'a> {
    analyzer: &'a dyn Analyzer,
}

impl<'a> InProcess<'a> {
    pub fn new(analyzer: &'a dyn Analyzer) -> Self {
        Self { analyzer }
    }
}

impl Invoker for InProcess<'_> {
    fn invoke(&self, request: &AnalysisRequest) -> Result<InvocationResult, LaunchError> {
        let code = self
            .analyzer
            .analyze(request)
            .map_err(|e| LaunchError::Analyzer(format!("{e:#}")))?;

        Ok(match code {
            0 => InvocationResult::success(),
            code => InvocationResult::failed(Some(code), UNKNOWN_ERROR),
        })
    }
}

/// Spawn `argv[0]` with the remaining arguments and wait for it.
///
/// stdin is closed, stdout is inherited, stderr is captured and only read
/// back when the exit status is non-zero.
pub fn run_command(argv: &[String]) -> Result<InvocationResult, LaunchError> {
    let (program, args) = argv.split_first().ok_or(LaunchError::EmptyCommand)?;
    log::debug!("running {argv:?}");

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            program: program.clone(),
            source,
        })?;

    let output = child
        .wait_with_output()
        .map_err(|source| LaunchError::Wait {
            program: program.clone(),
            source,
        })?;

    if output.status.success() {
        return Ok(InvocationResult::success());
    }

    Ok(InvocationResult::failed(
        output.status.code(),
        error_message(&output.stderr),
    ))
}

fn error_message(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim_end();
    if text.is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            sources: vec!["/a/Foo.php".into()],
            rule_sets: vec!["cleancode".into()],
            report_format: "xml".into(),
            report_file: Some("/tmp/r.xml".into()),
            minimum_priority: None,
        }
    }

    #[test]
    fn empty_stderr_becomes_unknown_error() {
        assert_eq!(error_message(b""), UNKNOWN_ERROR);
        assert_eq!(error_message(b" \n"), UNKNOWN_ERROR);
        assert_eq!(error_message(b"bad ruleset\n"), "bad ruleset");
    }

    #[test]
    fn empty_command_is_a_launch_error() {
        assert!(matches!(run_command(&[]), Err(LaunchError::EmptyCommand)));
    }

    #[test]
    fn missing_program_is_a_launch_error() {
        let err = run_command(&argv(&["/no/such/dir/phpmd", "a.php"])).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_has_no_diagnostic() {
        let result = run_command(&argv(&["/bin/sh", "-c", "echo noise >&2; exit 0"])).unwrap();
        assert_eq!(result, InvocationResult::success());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_captures_stderr() {
        let result =
            run_command(&argv(&["/bin/sh", "-c", "echo 'Cannot find ruleset' >&2; exit 1"]))
                .unwrap();
        assert_eq!(result.exit_code, Some(1));
        assert_eq!(result.diagnostic.as_deref(), Some("Cannot find ruleset"));
    }

    #[cfg(unix)]
    #[test]
    fn silent_failure_reports_unknown_error() {
        let result = run_command(&argv(&["/bin/sh", "-c", "exit 2"])).unwrap();
        assert_eq!(result.exit_code, Some(2));
        assert_eq!(result.diagnostic.as_deref(), Some(UNKNOWN_ERROR));
    }

    #[cfg(unix)]
    #[test]
    fn arguments_reach_the_process_unsplit() {
        // $1 is the joined source list; a literal comma must survive.
        let script = r#"[ "$1" = "/a/x.php,/a/y.php" ] && exit 0; echo "got $1" >&2; exit 1"#;
        let result = run_command(&argv(&[
            "/bin/sh",
            "-c",
            script,
            "sh",
            "/a/x.php,/a/y.php",
        ]))
        .unwrap();
        assert!(result.is_success(), "{result:?}");
    }

    #[test]
    fn external_process_exposes_its_command_line() {
        let invoker = ExternalProcess::new(ResolvedExecutable::new("/usr/bin/phpmd"));
        assert_eq!(
            invoker.command_line(&request()),
            vec![
                "/usr/bin/phpmd",
                "/a/Foo.php",
                "xml",
                "cleancode",
                "--reportfile",
                "/tmp/r.xml"
            ]
        );
    }

    #[test]
    fn in_process_maps_exit_codes() {
        let violations = |_: &AnalysisRequest| -> anyhow::Result<i32> { Ok(2) };
        let result = InProcess::new(&violations).invoke(&request()).unwrap();
        assert_eq!(result.exit_code, Some(2));

        let clean = |_: &AnalysisRequest| -> anyhow::Result<i32> { Ok(0) };
        assert!(InProcess::new(&clean).invoke(&request()).unwrap().is_success());
    }

    #[test]
    fn in_process_error_is_a_launch_error() {
        let broken = |_: &AnalysisRequest| -> anyhow::Result<i32> {
            Err(anyhow::anyhow!("analyzer crashed"))
        };
        let err = InProcess::new(&broken).invoke(&request()).unwrap_err();
        assert_eq!(err.to_string(), "analyzer crashed");
    }
}
