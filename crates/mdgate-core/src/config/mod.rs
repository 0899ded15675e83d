//! Task configuration: the model, host file-sets, and the TOML task file.

pub mod file;
pub mod fileset;
pub mod model;

pub use fileset::{FileList, FileSet, GlobFileSet};
pub use model::{AnalysisRequest, ReportSpec, RuleSetRef, TaskConfiguration};
