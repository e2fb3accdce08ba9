//! Error types for storage operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A new file was requested but the path is already taken.
    #[error("file already exists: {}", path.display())]
    AlreadyExists {
        /// The path that already exists.
        path: PathBuf,
    },

    /// An existing file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying OS error.
        source: io::Error,
    },

    /// Repositioning the cursor failed.
    #[error("seek to offset {offset} failed: {source}")]
    Seek {
        /// The requested absolute offset.
        offset: u64,
        /// The underlying OS error.
        source: io::Error,
    },

    /// Another process holds the advisory lock on the file.
    #[error("file is locked by another process")]
    Locked,
}
