//! Locating, building, and running the analysis command.

pub mod command;
pub mod invoke;
pub mod resolve;

pub use command::build_command;
pub use invoke::{Analyzer, ExternalProcess, InProcess, InvocationResult, Invoker};
pub use resolve::{
    ExecPolicy, ExecutableResolver, HostProbe, Probe, ResolvedExecutable, SearchPath,
};
