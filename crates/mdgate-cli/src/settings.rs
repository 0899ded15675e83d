//! Effective task settings.
//!
//! Overrides precedence: CLI > task file > defaults. List options given on
//! the command line replace the task file's list as a whole; `--source` and
//! `--file` together replace both `[[fileset]]` and `files`. The
//! `--fail-on-*` / `--no-fail-on-*` pairs override the file either way; the
//! last one given wins.

use mdgate_core::config::file::{FileSetCfg, FormatterCfg, TaskFile};
use mdgate_core::config::fileset::absolute;
use mdgate_core::exec::{ExecPolicy, ExecutableResolver, HostProbe, SearchPath};
use mdgate_core::report::model::ToolInfo;
use mdgate_core::{Backend, ConfigError, DEFAULT_BINARY, Task};

use crate::args::Args;

pub const DEFAULT_INCLUDE: &str = "**/*.php";

/// Merge the command line over the task file (if any).
pub fn merge(args: &Args) -> Result<TaskFile, ConfigError> {
    let mut file = match &args.config {
        Some(path) => TaskFile::load(path)?,
        None => TaskFile::default(),
    };

    if args.format.is_some() || args.report_file.is_some() {
        let formatter = file.formatter.get_or_insert_with(FormatterCfg::default);
        if let Some(format) = &args.format {
            formatter.kind = Some(format.clone());
        }
        if let Some(path) = &args.report_file {
            formatter.to_file = Some(absolute(path));
        }
    }

    if !args.rulesets.is_empty() {
        file.rulesets = args.rulesets.clone();
    }

    if !args.sources.is_empty() || !args.files.is_empty() {
        let include = if args.includes.is_empty() {
            vec![DEFAULT_INCLUDE.to_string()]
        } else {
            args.includes.clone()
        };
        file.filesets = args
            .sources
            .iter()
            .map(|dir| FileSetCfg {
                dir: absolute(dir),
                include: include.clone(),
                exclude: args.excludes.clone(),
            })
            .collect();
        file.files = args.files.iter().map(|f| absolute(f)).collect();
    }

    if args.minimum_priority.is_some() {
        file.minimum_priority = args.minimum_priority;
    }
    if let Some(fail) = switch(args.fail_on_error, args.no_fail_on_error) {
        file.fail_on_error = Some(fail);
    }
    if let Some(fail) = switch(args.fail_on_rule_violation, args.no_fail_on_rule_violation) {
        file.fail_on_rule_violation = Some(fail);
    }
    if let Some(path) = &args.phpmd {
        file.binary = Some(absolute(path));
    }
    if args.binary_name.is_some() {
        file.binary_name = args.binary_name.clone();
    }
    if args.require_exec_bit {
        file.require_exec_bit = Some(true);
    }

    Ok(file)
}

/// `--flag` / `--no-flag` pair; clap keeps at most one of them set.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Locate phpmd: an explicit path wins, otherwise search `path`.
pub fn resolver(file: &TaskFile, path: SearchPath) -> ExecutableResolver {
    let resolver = match file.binary_path() {
        Some(binary) => ExecutableResolver::explicit(binary),
        None => {
            let name = file.binary_name.as_deref().unwrap_or(DEFAULT_BINARY);
            ExecutableResolver::search(name, path)
        }
    };
    let policy = if file.require_exec_bit.unwrap_or(false) {
        ExecPolicy::PermissionBits
    } else {
        ExecPolicy::Unrestricted
    };
    resolver.with_probe(HostProbe::new(policy))
}

pub fn build_task(args: &Args) -> Result<Task, ConfigError> {
    let file = merge(args)?;
    let config = file.into_configuration()?;
    let tool = ToolInfo {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let backend = Backend::Process(resolver(&file, SearchPath::from_env()));
    Ok(Task::new(config, backend).with_tool(tool))
}
