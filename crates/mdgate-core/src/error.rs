//! Error taxonomy for a single task run.
//!
//! Configuration and resolution errors are always fatal. Launch errors are
//! folded into the run outcome and only become fatal through the failure
//! policy (see `policy`).

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or incomplete task configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Attribute formatter@type must be defined.")]
    MissingReportFormat,

    #[error("Attribute formatter@toFile must be defined.")]
    MissingReportFile,

    #[error("At least 1 rule set must be specified.")]
    NoRuleSets,

    #[error("RuleSet cannot be empty.")]
    EmptyRuleSet { index: usize },

    #[error("At least 1 FileSet must be specified.")]
    NoSourceFiles,

    #[error(transparent)]
    FileSet(#[from] FileSetError),

    #[error("cannot read task file {}: {source}", path.display())]
    TaskFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid task file {}: {source}", path.display())]
    TaskFileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Host file-set resolution failure.
#[derive(Debug, Error)]
pub enum FileSetError {
    #[error("fileset directory does not exist: {}", .0.display())]
    MissingDir(PathBuf),

    #[error("invalid fileset pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to scan fileset directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// The analysis executable could not be located.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Cannot locate {name} binary.")]
    NotFound { name: String, searched: Vec<PathBuf> },
}

/// The analysis could not be started or did not complete normally.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command line is empty")]
    EmptyCommand,

    #[error("{0}")]
    Analyzer(String),
}

/// Fatal error surfaced to the host build.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ExecutableNotFound(#[from] ResolveError),

    #[error("{message}")]
    BuildFailed { message: String },
}

impl TaskError {
    /// Configuration and resolution problems, as opposed to a failed analysis.
    pub fn is_setup_error(&self) -> bool {
        matches!(self, Self::Config(_) | Self::ExecutableNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_messages_match_task_attributes() {
        assert_eq!(
            ConfigError::MissingReportFormat.to_string(),
            "Attribute formatter@type must be defined."
        );
        assert_eq!(
            ConfigError::MissingReportFile.to_string(),
            "Attribute formatter@toFile must be defined."
        );
        assert_eq!(
            ConfigError::EmptyRuleSet { index: 3 }.to_string(),
            "RuleSet cannot be empty."
        );
    }

    #[test]
    fn task_file_errors_keep_their_cause() {
        use std::error::Error as _;

        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ConfigError::TaskFileRead {
            path: PathBuf::from("/p/mdgate.toml"),
            source,
        };
        assert_eq!(err.to_string(), "cannot read task file /p/mdgate.toml: gone");
        assert_eq!(err.source().unwrap().to_string(), "gone");
    }

    #[test]
    fn setup_errors_are_distinguished_from_build_failures() {
        assert!(TaskError::from(ConfigError::NoRuleSets).is_setup_error());
        assert!(
            TaskError::from(ResolveError::NotFound {
                name: "phpmd".into(),
                searched: vec![],
            })
            .is_setup_error()
        );
        assert!(
            !TaskError::BuildFailed {
                message: "x".into()
            }
            .is_setup_error()
        );
    }
}
