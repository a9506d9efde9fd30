//! Fatal errors that abort workspace initialization.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum InitError {
    /// A sanctioned path could not be materialized.
    #[error("failed to mkdir {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Windows arguments must be valid Unicode to be classified. Unix
    /// arguments are classified as raw bytes and never hit this.
    #[cfg_attr(unix, allow(dead_code))]
    #[error("argument {index} is not valid UTF-8: {lossy:?}")]
    NonUtf8Argument { index: usize, lossy: String },
}

impl InitError {
    /// Process exit status for this failure.
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            InitError::CreateDir { .. } => 1,
            InitError::NonUtf8Argument { .. } => 2,
        }
    }
}
