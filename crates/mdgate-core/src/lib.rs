//! mdgate core library.
//!
//! Runs PHP Mess Detector (phpmd) as a build step: a `TaskConfiguration` is
//! validated into a request, the phpmd executable is located, the command
//! line is built and run, and the exit status is mapped onto a build
//! verdict by the task's failure policy.

pub mod config;
pub mod error;
pub mod exec;
pub mod policy;
pub mod report;
pub mod task;
pub mod util;

pub use error::{ConfigError, TaskError};
pub use task::{Backend, Task};

pub const TOOL_NAME: &str = "mdgate";

/// Base name of the phpmd command line script.
pub const DEFAULT_BINARY: &str = "phpmd";

/// JSON schema version of mdgate run reports.
pub const SCHEMA_VERSION: &str = "0.1.0";
