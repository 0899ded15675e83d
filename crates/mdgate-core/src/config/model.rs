//! Task configuration model.
//!
//! The host populates a `TaskConfiguration` through explicit setters, then
//! asks for an `AnalysisRequest`. Validation runs as part of that call and
//! is the only way to obtain a request, so downstream components never see
//! an unvalidated configuration.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::fileset::{FileSet, absolute};
use crate::error::ConfigError;
use crate::util::join::SEPARATOR;

/// Report formatter: output format plus the file the report is written to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSpec {
    format: Option<String>,
    output: Option<PathBuf>,
}

impl ReportSpec {
    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = Some(format.into());
    }

    /// Stores the output path made absolute against the current directory.
    pub fn set_output(&mut self, output: impl AsRef<Path>) {
        self.output = Some(absolute(output.as_ref()));
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if is_blank(self.format.as_deref()) {
            return Err(ConfigError::MissingReportFormat);
        }
        let output = self.output.as_ref().map(|p| p.to_string_lossy());
        if is_blank(output.as_deref()) {
            return Err(ConfigError::MissingReportFile);
        }
        Ok(())
    }
}

/// A built-in rule set name or a rule set file path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSetRef(String);

impl RuleSetRef {
    pub fn new(text: &str) -> Self {
        Self(text.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything a task run needs, accumulated during configuration.
#[derive(Debug, Default)]
pub struct TaskConfiguration {
    report: ReportSpec,
    rule_sets: Vec<RuleSetRef>,
    file_sets: Vec<Box<dyn FileSet>>,
    minimum_priority: Option<u32>,
    fail_on_error: bool,
    fail_on_rule_violation: bool,
}

impl TaskConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_report_format(&mut self, format: impl Into<String>) -> &mut Self {
        self.report.set_format(format);
        self
    }

    pub fn set_report_file(&mut self, output: impl AsRef<Path>) -> &mut Self {
        self.report.set_output(output);
        self
    }

    pub fn add_rule_set(&mut self, text: &str) -> &mut Self {
        self.rule_sets.push(RuleSetRef::new(text));
        self
    }

    /// Adds one rule set per comma-separated piece of `list`.
    ///
    /// Empty pieces are kept; they fail validation.
    pub fn set_rule_set_files(&mut self, list: &str) -> &mut Self {
        for piece in list.split(SEPARATOR) {
            self.add_rule_set(piece);
        }
        self
    }

    pub fn add_file_set(&mut self, file_set: impl FileSet + 'static) -> &mut Self {
        self.file_sets.push(Box::new(file_set));
        self
    }

    /// Rules with a lower priority value than `priority` are not used.
    pub fn set_minimum_priority(&mut self, priority: u32) -> &mut Self {
        self.minimum_priority = Some(priority);
        self
    }

    pub fn set_fail_on_error(&mut self, fail: bool) -> &mut Self {
        self.fail_on_error = fail;
        self
    }

    pub fn set_fail_on_rule_violation(&mut self, fail: bool) -> &mut Self {
        self.fail_on_rule_violation = fail;
        self
    }

    pub fn report(&self) -> &ReportSpec {
        &self.report
    }

    pub fn rule_sets(&self) -> &[RuleSetRef] {
        &self.rule_sets
    }

    pub fn minimum_priority(&self) -> Option<u32> {
        self.minimum_priority
    }

    pub fn fail_on_error(&self) -> bool {
        self.fail_on_error
    }

    pub fn fail_on_rule_violation(&self) -> bool {
        self.fail_on_rule_violation
    }

    /// Check required fields, first failure wins.
    ///
    /// Order: report format, report file, rule sets, source files. Safe to
    /// call repeatedly; file-sets are resolved each time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.request().map(|_| ())
    }

    /// Validate and produce the read-only request handed to an invoker.
    pub fn request(&self) -> Result<AnalysisRequest, ConfigError> {
        self.report.validate()?;
        self.validate_rule_sets()?;
        let sources = self.sources()?;

        Ok(AnalysisRequest {
            sources,
            rule_sets: self.rule_sets.iter().map(|r| r.as_str().to_string()).collect(),
            report_format: self.report.format().unwrap_or_default().to_string(),
            report_file: self
                .report
                .output()
                .map(|p| p.to_string_lossy().into_owned()),
            minimum_priority: self.minimum_priority,
        })
    }

    fn validate_rule_sets(&self) -> Result<(), ConfigError> {
        if self.rule_sets.is_empty() {
            return Err(ConfigError::NoRuleSets);
        }
        match self.rule_sets.iter().position(|r| r.as_str().is_empty()) {
            Some(index) => Err(ConfigError::EmptyRuleSet { index }),
            None => Ok(()),
        }
    }

    /// Flatten every registered file-set, in registration order.
    fn sources(&self) -> Result<Vec<String>, ConfigError> {
        let mut sources = Vec::new();
        for set in &self.file_sets {
            sources.extend(
                set.files()?
                    .into_iter()
                    .map(|p| p.to_string_lossy().into_owned()),
            );
        }
        if sources.is_empty() {
            return Err(ConfigError::NoSourceFiles);
        }
        Ok(sources)
    }
}

/// A validated configuration, ready to be turned into an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub sources: Vec<String>,
    pub rule_sets: Vec<String>,
    pub report_format: String,
    pub report_file: Option<String>,
    pub minimum_priority: Option<u32>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
