//! Host file-set resolution.
//!
//! A file-set turns some pattern description into a list of absolute file
//! paths. The task only consumes the resolved list; order is whatever the
//! file-set reports and is never sorted or deduplicated afterwards.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::error::FileSetError;

/// A collection of source files registered with a task.
pub trait FileSet: std::fmt::Debug {
    /// Resolve to file paths, in the order the set defines.
    fn files(&self) -> Result<Vec<PathBuf>, FileSetError>;
}

/// An explicit, already-resolved list of files.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    files: Vec<PathBuf>,
}

impl FileList {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl FileSet for FileList {
    fn files(&self) -> Result<Vec<PathBuf>, FileSetError> {
        Ok(self.files.iter().map(|p| absolute(p)).collect())
    }
}

/// Files below a base directory selected by include/exclude globs.
///
/// Patterns match the path relative to `dir`. With no include pattern every
/// regular file is included. Directory entries are visited in file-name
/// order so the same tree always yields the same list.
#[derive(Debug, Clone)]
pub struct GlobFileSet {
    dir: PathBuf,
    includes: Option<GlobSet>,
    excludes: GlobSet,
}

impl GlobFileSet {
    pub fn new<S: AsRef<str>>(
        dir: impl Into<PathBuf>,
        includes: &[S],
        excludes: &[S],
    ) -> Result<Self, FileSetError> {
        let includes = if includes.is_empty() {
            None
        } else {
            Some(build_globset(includes)?)
        };

        Ok(Self {
            dir: absolute(&dir.into()),
            includes,
            excludes: build_globset(excludes)?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn selects(&self, rel: &Path) -> bool {
        let included = self.includes.as_ref().is_none_or(|set| set.is_match(rel));
        included && !self.excludes.is_match(rel)
    }
}

impl FileSet for GlobFileSet {
    fn files(&self) -> Result<Vec<PathBuf>, FileSetError> {
        if !self.dir.is_dir() {
            return Err(FileSetError::MissingDir(self.dir.clone()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&self.dir) else {
                continue;
            };
            if self.selects(rel) {
                files.push(self.dir.join(rel));
            }
        }

        log::debug!(
            "fileset {} resolved to {} file(s)",
            self.dir.display(),
            files.len()
        );
        Ok(files)
    }
}

fn build_globset<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet, FileSetError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let glob = Glob::new(pattern).map_err(|source| FileSetError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| FileSetError::Pattern {
        pattern: patterns
            .iter()
            .map(|p| p.as_ref())
            .collect::<Vec<_>>()
            .join(" "),
        source,
    })
}

/// `path` made absolute against the current directory, or unchanged if that fails.
pub fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
