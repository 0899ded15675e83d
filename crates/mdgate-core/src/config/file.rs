//! TOML task file (`mdgate.toml`).
//!
//! ```toml
//! rulesets = ["cleancode", "codesize,rules/naming.xml"]
//! minimum_priority = 3
//! fail_on_error = true
//! fail_on_rule_violation = true
//! binary = "vendor/bin/phpmd"   # optional, skips the PATH search
//!
//! [formatter]
//! type = "xml"
//! to_file = "build/phpmd.xml"
//!
//! [[fileset]]
//! dir = "src"
//! include = ["**/*.php"]
//! exclude = ["**/Generated/**"]
//! ```
//!
//! Each `rulesets` entry may itself be a comma-separated list. Relative
//! paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::config::fileset::{FileList, GlobFileSet};
use crate::config::model::TaskConfiguration;
use crate::error::ConfigError;

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FormatterCfg {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub to_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileSetCfg {
    pub dir: PathBuf,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Root of a task file.
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct TaskFile {
    pub formatter: Option<FormatterCfg>,
    #[serde(default)]
    pub rulesets: Vec<String>,
    #[serde(default, rename = "fileset")]
    pub filesets: Vec<FileSetCfg>,
    #[serde(default)]
    pub files: Vec<PathBuf>,
    pub minimum_priority: Option<u32>,
    pub fail_on_error: Option<bool>,
    pub fail_on_rule_violation: Option<bool>,
    pub binary: Option<PathBuf>,
    pub binary_name: Option<String>,
    pub require_exec_bit: Option<bool>,

    #[serde(skip)]
    base_dir: PathBuf,
}

impl TaskFile {
    /// Read and parse a task file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::TaskFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::parse(&text, base_dir).map_err(|source| ConfigError::TaskFileParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse task file text; relative paths resolve against `base_dir`.
    pub fn parse(text: &str, base_dir: impl Into<PathBuf>) -> Result<Self, toml::de::Error> {
        let mut file: TaskFile = toml::from_str(text)?;
        file.base_dir = base_dir.into();
        Ok(file)
    }

    /// Explicit executable path, if configured.
    pub fn binary_path(&self) -> Option<PathBuf> {
        self.binary.as_ref().map(|p| self.resolve(p))
    }

    /// Resolve `path` against the task file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Apply every configured value to `config`.
    pub fn apply(&self, config: &mut TaskConfiguration) -> Result<(), ConfigError> {
        if let Some(formatter) = &self.formatter {
            if let Some(kind) = &formatter.kind {
                config.set_report_format(kind.as_str());
            }
            if let Some(to_file) = &formatter.to_file {
                config.set_report_file(self.resolve(to_file));
            }
        }

        for rule_set in &self.rulesets {
            config.set_rule_set_files(rule_set);
        }

        for set in &self.filesets {
            config.add_file_set(GlobFileSet::new(
                self.resolve(&set.dir),
                &set.include,
                &set.exclude,
            )?);
        }
        if !self.files.is_empty() {
            config.add_file_set(FileList::new(self.files.iter().map(|f| self.resolve(f))));
        }

        if let Some(priority) = self.minimum_priority {
            config.set_minimum_priority(priority);
        }
        if let Some(fail) = self.fail_on_error {
            config.set_fail_on_error(fail);
        }
        if let Some(fail) = self.fail_on_rule_violation {
            config.set_fail_on_rule_violation(fail);
        }

        Ok(())
    }

    /// Build a fresh configuration from this file alone.
    pub fn into_configuration(&self) -> Result<TaskConfiguration, ConfigError> {
        let mut config = TaskConfiguration::new();
        self.apply(&mut config)?;
        Ok(config)
    }
}
