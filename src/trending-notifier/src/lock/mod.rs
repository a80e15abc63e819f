//! Single-instance guard.
//!
//! A run holds an exclusive advisory lock on `{dir}/{name}.lock` for its whole
//! lifetime, so a second run on the same host fails fast instead of sending a
//! duplicate report. The operating system drops the lock when the holding
//! process exits for any reason. A lock file with no holder is free to take.

mod error;

pub use error::LockError;

use std::fs::{File, OpenOptions, TryLockError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default lock name used by the CLI.
pub const DEFAULT_LOCK_NAME: &str = "trending-notifier";

/// RAII guard for the run lock. Dropping it unlocks the file.
///
/// The file itself stays on disk. Removing it while another process has it
/// open would let two runs lock different inodes under the same path.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
    file: File,
}

impl RunLock {
    /// Takes the lock `name` in the system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::AlreadyRunning`] if the lock is held, or
    /// [`LockError::IoError`] if the file cannot be opened or locked.
    pub fn acquire(name: &str) -> Result<Self, LockError> {
        Self::acquire_in(&std::env::temp_dir(), name)
    }

    /// Takes the lock `name` inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`LockError::AlreadyRunning`] if the lock is held, or
    /// [`LockError::IoError`] if the file cannot be opened or locked.
    pub fn acquire_in(dir: &Path, name: &str) -> Result<Self, LockError> {
        let path = dir.join(format!("{name}.lock"));
        let io_error = |source| LockError::IoError {
            path: path.display().to_string(),
            source,
        };

        // No truncation on open; the pid of a live holder must survive
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(io_error)?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(LockError::AlreadyRunning {
                    path: path.display().to_string(),
                });
            }
            Err(TryLockError::Error(source)) => return Err(io_error(source)),
        }

        file.set_len(0).map_err(io_error)?;
        writeln!(file, "{}", std::process::id()).map_err(io_error)?;

        debug!(path = %path.display(), "Run lock acquired");
        Ok(Self { path, file })
    }

    /// Returns the path of the lock file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        match self.file.unlock() {
            Ok(()) => debug!(path = %self.path.display(), "Run lock released"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to unlock lock file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn acquire_creates_file_with_pid() {
        let temp = TempDir::new().unwrap();
        let lock = RunLock::acquire_in(temp.path(), "notifier").unwrap();

        assert_eq!(lock.path(), temp.path().join("notifier.lock"));
        let contents = fs::read_to_string(lock.path()).unwrap();
        assert_eq!(contents.trim(), std::process::id().to_string());
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let temp = TempDir::new().unwrap();
        let _held = RunLock::acquire_in(temp.path(), "notifier").unwrap();

        let second = RunLock::acquire_in(temp.path(), "notifier");
        assert!(matches!(second, Err(LockError::AlreadyRunning { .. })));
    }

    #[test]
    fn drop_releases_lock() {
        let temp = TempDir::new().unwrap();
        drop(RunLock::acquire_in(temp.path(), "notifier").unwrap());

        assert!(RunLock::acquire_in(temp.path(), "notifier").is_ok());
    }

    #[test]
    fn leftover_file_without_holder_is_free() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("notifier.lock");
        fs::write(&path, "999999\n").unwrap();

        let lock = RunLock::acquire_in(temp.path(), "notifier").unwrap();

        let contents = fs::read_to_string(lock.path()).unwrap();
        assert_eq!(contents.trim(), std::process::id().to_string());
    }

    #[test]
    fn distinct_names_do_not_conflict() {
        let temp = TempDir::new().unwrap();
        let _a = RunLock::acquire_in(temp.path(), "a").unwrap();
        assert!(RunLock::acquire_in(temp.path(), "b").is_ok());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let result = RunLock::acquire_in(&temp.path().join("absent"), "notifier");
        assert!(matches!(result, Err(LockError::IoError { .. })));
    }
}
