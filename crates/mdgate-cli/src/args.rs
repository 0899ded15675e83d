use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "mdgate",
    version,
    about = "Run PHP Mess Detector as a build step"
)]
pub struct Args {
    /// TOML task file (mdgate.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Report format handed to phpmd (xml, text, html, ...)
    #[arg(long)]
    pub format: Option<String>,

    /// Where phpmd writes its report
    #[arg(long)]
    pub report_file: Option<PathBuf>,

    /// Rule set name or file; repeatable, comma lists accepted
    #[arg(long = "ruleset", value_name = "RULESET")]
    pub rulesets: Vec<String>,

    /// Directory to scan for sources; repeatable
    #[arg(long = "source", value_name = "DIR")]
    pub sources: Vec<PathBuf>,

    /// Include glob for --source directories [default: **/*.php]
    #[arg(long = "include", value_name = "GLOB")]
    pub includes: Vec<String>,

    /// Exclude glob for --source directories
    #[arg(long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// Single source file; repeatable
    #[arg(long = "file", value_name = "FILE")]
    pub files: Vec<PathBuf>,

    #[arg(long)]
    pub minimum_priority: Option<u32>,

    /// Fail the build when phpmd itself fails
    #[arg(long, overrides_with = "no_fail_on_error")]
    pub fail_on_error: bool,

    /// Keep going when phpmd itself fails
    #[arg(long, overrides_with = "fail_on_error")]
    pub no_fail_on_error: bool,

    /// Fail the build when phpmd reports violations
    #[arg(long, overrides_with = "no_fail_on_rule_violation")]
    pub fail_on_rule_violation: bool,

    /// Keep going when phpmd reports violations
    #[arg(long, overrides_with = "fail_on_rule_violation")]
    pub no_fail_on_rule_violation: bool,

    /// Explicit phpmd executable; skips the PATH search
    #[arg(long, value_name = "PATH")]
    pub phpmd: Option<PathBuf>,

    /// Executable base name searched on PATH [default: phpmd]
    #[arg(long)]
    pub binary_name: Option<String>,

    /// Only accept PATH candidates with an execute permission bit
    #[arg(long)]
    pub require_exec_bit: bool,

    /// Summary format
    #[arg(long, default_value = "text")]
    pub summary: SummaryFormat,

    /// Write the summary to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum SummaryFormat {
    Json,
    Text,
}
