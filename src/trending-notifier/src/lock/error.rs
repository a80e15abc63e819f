//! Run lock error types.

use thiserror::Error;

/// Errors that can occur while taking the run lock.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another run holds the lock.
    #[error("Another instance is already running (lock file: {path})")]
    AlreadyRunning { path: String },

    /// The lock file could not be created or written.
    #[error("Failed to create lock file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
