//! Error type for configuration reads.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a configuration read failed.
///
/// Malformed lines, comments and oversized input are never errors; they're skipped or truncated
/// while the scan carries on.
#[derive(Error, Debug)]
pub enum ReadError {
    /// The path doesn't exist.
    #[error("configuration file not found: {}", .path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The file exists but couldn't be opened, e.g. for lack of permissions.
    #[error("cannot open configuration file {}: {source}", .path.display())]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// An I/O error occurred part way through the scan.
    #[error("error reading configuration: {0}")]
    Read(#[from] io::Error),
}

impl ReadError {
    /// Maps a failed [`File::open`](std::fs::File::open) to the matching variant.
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Open { path, source },
        }
    }
}
