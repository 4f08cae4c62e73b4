//! Error types for dirstream
//!
//! Two small hierarchies:
//! - `ListError` for failures of a running listing
//! - `ConfigError` for pattern and CLI validation
//!
//! An inaccessible directory is always an error, never an empty result;
//! only an empty or fully-filtered directory produces an empty success.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of a single listing attempt
#[derive(Error, Debug)]
pub enum ListError {
    /// Target directory does not exist
    #[error("Directory not found: '{path}'")]
    NotFound { path: PathBuf },

    /// Target directory exists but cannot be read
    #[error("Permission denied: '{path}'")]
    PermissionDenied { path: PathBuf },

    /// Target path exists but is not a directory
    #[error("Not a directory: '{path}'")]
    NotADirectory { path: PathBuf },

    /// Opening or advancing the directory reader failed
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The per-entry callback panicked on the background task
    #[error("Entry handler panicked during listing")]
    HandlerPanic,

    /// The background task was aborted or lost before it finished
    #[error("Listing task failed before completion")]
    TaskFailed,
}

impl ListError {
    /// Map an error from opening a directory reader into the taxonomy
    pub(crate) fn open(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => ListError::NotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => ListError::PermissionDenied {
                path: path.to_path_buf(),
            },
            io::ErrorKind::NotADirectory => ListError::NotADirectory {
                path: path.to_path_buf(),
            },
            _ => ListError::ReadDir {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// True if the failure means the target directory was inaccessible
    pub fn is_access_failure(&self) -> bool {
        matches!(
            self,
            ListError::NotFound { .. }
                | ListError::PermissionDenied { .. }
                | ListError::NotADirectory { .. }
        )
    }
}

/// Pattern and CLI validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Pattern text could not be compiled
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Result type alias for ListError
pub type Result<T> = std::result::Result<T, ListError>;
