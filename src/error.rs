//! Error type for burrow.
//!
//! Every navigator, file operation and process handoff failure is expressed as a
//! [BurrowError]. Apart from a failed process handoff, none of them are fatal: the
//! state machine turns them into timed status messages.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unified error type for burrow operations.
#[derive(Debug, Error)]
pub enum BurrowError {
    /// User supplied input was rejected before touching the filesystem.
    #[error("{0}")]
    Validation(String),

    /// The path vanished between listing and access.
    #[error("No such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    /// The operating system denied the operation.
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// A rename destination is already occupied.
    #[error("Already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Any other filesystem failure.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Unique name resolution ran out of candidates.
    #[error("No free name for {} after {attempts} attempts", path.display())]
    ResourceExhausted { path: PathBuf, attempts: u32 },

    /// No usable editor is configured.
    #[error("{0}")]
    EditorUnavailable(String),

    /// Launching the shell or replacing the process failed.
    #[error("Cannot start shell '{shell}': {source}")]
    Handoff {
        shell: String,
        #[source]
        source: io::Error,
    },
}

impl BurrowError {
    /// Classifies an [io::Error] raised while operating on `path`.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => BurrowError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => BurrowError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::AlreadyExists => BurrowError::AlreadyExists(path.to_path_buf()),
            _ => BurrowError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, BurrowError>;
