//! Classify path arguments against the workspace root and create the
//! sanctioned ones as directory trees.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::InitError;
use crate::paths::{clean, is_absolute};
use crate::profile::{PlatformProfile, WINDOWS_DRIVE};

/// Permission bits requested for every created directory (before umask).
pub(crate) const DIR_MODE: u32 = 0o755;

/// An argument after rewriting and cleaning, with its safety verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PreparedPath {
    pub(crate) normalized: Vec<u8>,
    pub(crate) sanctioned: bool,
}

impl PreparedPath {
    pub(crate) fn to_path_buf(&self) -> PathBuf {
        path_from_bytes(&self.normalized)
    }
}

/// What a successful run did, in argument order.
#[derive(Debug, Default)]
pub(crate) struct RunReport {
    pub(crate) created: Vec<PathBuf>,
    pub(crate) skipped: Vec<PathBuf>,
}

pub(crate) struct Initializer {
    profile: PlatformProfile,
}

impl Initializer {
    pub(crate) fn new(profile: PlatformProfile) -> Self {
        Self { profile }
    }

    /// Clean a raw argument, apply the drive rewrite, and classify it.
    pub(crate) fn prepare(&self, raw: impl AsRef<[u8]>) -> PreparedPath {
        let mut normalized = clean(self.profile.style, raw.as_ref());
        if self.profile.rewrites_leading_backslash()
            && normalized.starts_with(b"\\")
            && !normalized.starts_with(b"\\\\")
        {
            normalized = [WINDOWS_DRIVE.as_bytes(), &normalized[..]].concat();
        }
        let sanctioned = self.is_sanctioned(&normalized);
        PreparedPath {
            normalized,
            sanctioned,
        }
    }

    /// Relative paths are always sanctioned; absolute ones only under the root.
    pub(crate) fn is_sanctioned(&self, normalized: &[u8]) -> bool {
        !is_absolute(self.profile.style, normalized)
            || normalized.starts_with(self.profile.workspace_root.as_bytes())
            || normalized == self.profile.root_without_separator().as_bytes()
    }

    /// Create every sanctioned path in order, stopping at the first failure.
    ///
    /// `paths` excludes the program path; indices count from 1 so they match
    /// the process argument positions.
    pub(crate) fn run<I, S>(&self, paths: I) -> Result<RunReport, InitError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut report = RunReport::default();
        for (offset, arg) in paths.into_iter().enumerate() {
            let index = offset + 1;
            let raw = argument_bytes(arg.into(), index)?;
            let prepared = self.prepare(&raw);
            let path = prepared.to_path_buf();
            if !prepared.sanctioned {
                debug!(index, path = %path.display(), "skipped unsanctioned path");
                report.skipped.push(path);
                continue;
            }
            create_dir_tree(&path).map_err(|source| InitError::CreateDir {
                path: path.clone(),
                source,
            })?;
            debug!(index, path = %path.display(), "created");
            report.created.push(path);
        }
        Ok(report)
    }
}

#[cfg(unix)]
fn argument_bytes(arg: OsString, _index: usize) -> Result<Vec<u8>, InitError> {
    use std::os::unix::ffi::OsStringExt;
    Ok(arg.into_vec())
}

#[cfg(not(unix))]
fn argument_bytes(arg: OsString, index: usize) -> Result<Vec<u8>, InitError> {
    arg.into_string()
        .map(String::into_bytes)
        .map_err(|arg| InitError::NonUtf8Argument {
            index,
            lossy: arg.to_string_lossy().into_owned(),
        })
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(OsStr::from_bytes(bytes))
}

// Input was valid UTF-8 and cleaning only splits at ASCII bytes.
#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Create `path` and any missing ancestors. Existing directories are fine.
pub(crate) fn create_dir_tree(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}
