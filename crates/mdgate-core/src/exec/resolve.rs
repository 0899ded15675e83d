//! Locating the analysis executable.
//!
//! Search order is directory-major: for every directory on the search path,
//! in order, try `<name>.bat`, `<name>.php`, then `<name>`. The first
//! candidate that exists and passes the execute policy wins.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ResolveError;

/// Suffixes tried in each directory, highest priority first.
pub const NAME_VARIANTS: [&str; 3] = [".bat", ".php", ""];

/// Absolute path of the executable that will be launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedExecutable {
    pub path: PathBuf,
}

impl ResolvedExecutable {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Ordered list of directories searched for executables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath(Vec<PathBuf>);

impl SearchPath {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self(dirs.into_iter().map(Into::into).collect())
    }

    /// Directories from `PATH`. Unset or blank yields an empty search path.
    pub fn from_env() -> Self {
        Self::parse(std::env::var_os("PATH").as_deref())
    }

    /// Split a raw path-list value with the platform separator.
    pub fn parse(value: Option<&OsStr>) -> Self {
        match value {
            Some(v) if !v.to_string_lossy().trim().is_empty() => {
                Self(std::env::split_paths(v).collect())
            }
            _ => Self::default(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether the host allows a found file to be executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecPolicy {
    /// No policy enforced; every existing file is executable.
    #[default]
    Unrestricted,
    /// Require an execute permission bit (Unix). Other platforms allow all.
    PermissionBits,
}

/// Filesystem and security checks used during the search.
pub trait Probe: std::fmt::Debug {
    fn is_file(&self, path: &Path) -> bool;
    fn can_execute(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostProbe {
    pub policy: ExecPolicy,
}

impl HostProbe {
    pub fn new(policy: ExecPolicy) -> Self {
        Self { policy }
    }
}

impl Probe for HostProbe {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn can_execute(&self, path: &Path) -> bool {
        match self.policy {
            ExecPolicy::Unrestricted => true,
            ExecPolicy::PermissionBits => has_execute_bit(path),
        }
    }
}

#[cfg(unix)]
fn has_execute_bit(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn has_execute_bit(_path: &Path) -> bool {
    true
}

#[derive(Debug)]
enum Mode {
    Search { name: String, path: SearchPath },
    Explicit(PathBuf),
}

/// Finds the executable, either by searching or from a caller-given path.
#[derive(Debug)]
pub struct ExecutableResolver {
    mode: Mode,
    probe: Box<dyn Probe>,
}

impl ExecutableResolver {
    /// Search `path` for `name` and its variants.
    pub fn search(name: impl Into<String>, path: SearchPath) -> Self {
        Self {
            mode: Mode::Search {
                name: name.into(),
                path,
            },
            probe: Box::new(HostProbe::default()),
        }
    }

    /// Use `path` as-is, without searching.
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            mode: Mode::Explicit(path.into()),
            probe: Box::new(HostProbe::default()),
        }
    }

    pub fn with_probe(mut self, probe: impl Probe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn resolve(&self) -> Result<ResolvedExecutable, ResolveError> {
        match &self.mode {
            Mode::Explicit(path) => Ok(ResolvedExecutable::new(path.clone())),
            Mode::Search { name, path } => self.search_dirs(name, path),
        }
    }

    fn search_dirs(
        &self,
        name: &str,
        path: &SearchPath,
    ) -> Result<ResolvedExecutable, ResolveError> {
        for dir in path.dirs() {
            for suffix in NAME_VARIANTS {
                let candidate = dir.join(format!("{name}{suffix}"));
                if self.probe.is_file(&candidate) && self.probe.can_execute(&candidate) {
                    log::debug!("resolved {name} to {}", candidate.display());
                    return Ok(ResolvedExecutable::new(candidate));
                }
            }
        }

        Err(ResolveError::NotFound {
            name: name.to_string(),
            searched: path.dirs().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    /// In-memory filesystem: `files` exist, `denied` fail the exec check.
    #[derive(Debug, Default)]
    struct FakeProbe {
        files: HashSet<PathBuf>,
        denied: HashSet<PathBuf>,
    }

    impl FakeProbe {
        fn with_files(files: &[&str]) -> Self {
            Self {
                files: files.iter().map(PathBuf::from).collect(),
                ..Default::default()
            }
        }

        fn deny(mut self, path: &str) -> Self {
            self.denied.insert(PathBuf::from(path));
            self
        }
    }

    impl Probe for FakeProbe {
        fn is_file(&self, path: &Path) -> bool {
            self.files.contains(path)
        }

        fn can_execute(&self, path: &Path) -> bool {
            !self.denied.contains(path)
        }
    }

    fn resolver(dirs: &[&str], probe: FakeProbe) -> ExecutableResolver {
        ExecutableResolver::search("phpmd", SearchPath::new(dirs.iter().copied()))
            .with_probe(probe)
    }

    #[test]
    fn bat_wins_over_php_in_same_directory() {
        let probe = FakeProbe::with_files(&["/opt/bin/phpmd.bat", "/opt/bin/phpmd.php"]);
        let found = resolver(&["/opt/bin"], probe).resolve().unwrap();
        assert_eq!(found.path(), Path::new("/opt/bin/phpmd.bat"));
    }

    #[test]
    fn php_wins_over_bare_name() {
        let probe = FakeProbe::with_files(&["/opt/bin/phpmd", "/opt/bin/phpmd.php"]);
        let found = resolver(&["/opt/bin"], probe).resolve().unwrap();
        assert_eq!(found.path(), Path::new("/opt/bin/phpmd.php"));
    }

    #[test]
    fn earlier_directory_wins_regardless_of_variant() {
        let probe = FakeProbe::with_files(&["/usr/bin/phpmd", "/usr/local/bin/phpmd.bat"]);
        let found = resolver(&["/usr/bin", "/usr/local/bin"], probe)
            .resolve()
            .unwrap();
        assert_eq!(found.path(), Path::new("/usr/bin/phpmd"));
    }

    #[test]
    fn denied_candidate_is_skipped() {
        let probe = FakeProbe::with_files(&["/opt/bin/phpmd.bat", "/opt/bin/phpmd"])
            .deny("/opt/bin/phpmd.bat");
        let found = resolver(&["/opt/bin"], probe).resolve().unwrap();
        assert_eq!(found.path(), Path::new("/opt/bin/phpmd"));
    }

    #[test]
    fn empty_search_path_is_not_found() {
        let err = resolver(&[], FakeProbe::default()).resolve().unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
        assert_eq!(err.to_string(), "Cannot locate phpmd binary.");
    }

    #[test]
    fn no_variant_anywhere_is_not_found() {
        let probe = FakeProbe::with_files(&["/opt/bin/phpcs"]);
        let err = resolver(&["/opt/bin", "/usr/bin"], probe)
            .resolve()
            .unwrap_err();
        let ResolveError::NotFound { searched, .. } = err;
        assert_eq!(searched.len(), 2);
    }

    #[test]
    fn explicit_path_bypasses_search() {
        let found = ExecutableResolver::explicit("/custom/phpmd")
            .with_probe(FakeProbe::default())
            .resolve()
            .unwrap();
        assert_eq!(found.path(), Path::new("/custom/phpmd"));
    }

    #[test]
    fn blank_path_variable_is_empty() {
        assert!(SearchPath::parse(None).is_empty());
        assert!(SearchPath::parse(Some(OsStr::new("  "))).is_empty());
    }

    #[test]
    fn path_variable_keeps_directory_order() {
        let joined = std::env::join_paths(["/first", "/second"]).unwrap();
        let path = SearchPath::parse(Some(joined.as_os_str()));
        assert_eq!(
            path.dirs(),
            &[PathBuf::from("/first"), PathBuf::from("/second")]
        );
    }

    #[test]
    fn host_probe_finds_real_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("phpmd.php"), "<?php\n").unwrap();
        fs::write(dir.path().join("phpmd.bat"), "@echo off\n").unwrap();

        let found = ExecutableResolver::search("phpmd", SearchPath::new([dir.path()]))
            .resolve()
            .unwrap();
        assert_eq!(found.path(), dir.path().join("phpmd.bat"));
    }

    #[cfg(unix)]
    #[test]
    fn permission_policy_requires_execute_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("phpmd.bat");
        let exec = dir.path().join("phpmd");
        fs::write(&plain, "").unwrap();
        fs::write(&exec, "").unwrap();
        fs::set_permissions(&exec, fs::Permissions::from_mode(0o755)).unwrap();

        let found = ExecutableResolver::search("phpmd", SearchPath::new([dir.path()]))
            .with_probe(HostProbe::new(ExecPolicy::PermissionBits))
            .resolve()
            .unwrap();
        assert_eq!(found.path(), exec.as_path());
    }
}
