//! The build step: validate, locate, invoke, decide.

use crate::config::model::{AnalysisRequest, TaskConfiguration};
use crate::error::{LaunchError, TaskError};
use crate::exec::invoke::{Analyzer, ExternalProcess, InProcess, InvocationResult, Invoker};
use crate::exec::resolve::ExecutableResolver;
use crate::policy::{FailurePolicy, Outcome, Verdict};
use crate::report::model::{InvocationInfo, Mechanism, RunReport, ToolInfo};

/// How the analysis is carried out.
pub enum Backend {
    /// Spawn phpmd, located by the resolver.
    Process(ExecutableResolver),
    /// Call an analyzer linked into the host.
    InProcess(Box<dyn Analyzer>),
}

impl Backend {
    pub fn in_process(analyzer: impl Analyzer + 'static) -> Self {
        Backend::InProcess(Box::new(analyzer))
    }
}

/// A configured phpmd build step.
pub struct Task {
    config: TaskConfiguration,
    backend: Backend,
    tool: ToolInfo,
}

impl Task {
    pub fn new(config: TaskConfiguration, backend: Backend) -> Self {
        Self {
            config,
            backend,
            tool: ToolInfo::default(),
        }
    }

    pub fn with_tool(mut self, tool: ToolInfo) -> Self {
        self.tool = tool;
        self
    }

    /// Run once and report what happened.
    ///
    /// Configuration errors and a missing executable are returned as `Err`
    /// before anything is spawned. Every other result, fatal or not, is
    /// described by the returned report.
    pub fn run(&self) -> Result<RunReport, TaskError> {
        let request = self.config.request()?;
        let policy = FailurePolicy::new(
            self.config.fail_on_error(),
            self.config.fail_on_rule_violation(),
        );

        let (invocation, result) = match &self.backend {
            Backend::Process(resolver) => {
                let invoker = ExternalProcess::new(resolver.resolve()?);
                invoke(&invoker, Mechanism::Process, &request)
            }
            Backend::InProcess(analyzer) => {
                let invoker = InProcess::new(analyzer.as_ref());
                invoke(&invoker, Mechanism::InProcess, &request)
            }
        };

        let outcome = Outcome::from_invocation(&result);
        log::debug!("phpmd outcome: {outcome}");
        Ok(RunReport::new(self.tool.clone(), invocation, outcome, policy))
    }

    /// Run once; a fatal verdict becomes `TaskError::BuildFailed`.
    pub fn execute(&self) -> Result<(), TaskError> {
        match self.run()?.verdict {
            Verdict::Continue => Ok(()),
            Verdict::Fail { message } => Err(TaskError::BuildFailed { message }),
        }
    }
}

fn invoke(
    invoker: &dyn Invoker,
    mechanism: Mechanism,
    request: &AnalysisRequest,
) -> (InvocationInfo, Result<InvocationResult, LaunchError>) {
    log::info!(
        "running phpmd on {} source file(s) with rule sets {:?}",
        request.sources.len(),
        request.rule_sets
    );
    let info = InvocationInfo {
        mechanism,
        command: invoker.command_line(request),
        source_count: request.sources.len(),
    };
    (info, invoker.invoke(request))
}
