//! RAII lock guard implementation.

use std::fs::File;
use std::path::{Path, PathBuf};

/// RAII guard for a held lock.
///
/// The lock lives as long as the open file handle. Releasing closes the
/// handle; the lock file itself stays on disk.
#[derive(Debug)]
pub struct LockGuard {
    /// Path to the lock file.
    path: PathBuf,

    /// Open handle carrying the lock, `None` once released.
    file: Option<File>,
}

impl LockGuard {
    pub(super) fn new(path: PathBuf, file: File) -> Self {
        Self {
            path,
            file: Some(file),
        }
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock. Calling this more than once is a no-op.
    pub fn release(&mut self) {
        if let Some(file) = self.file.take() {
            drop(file);
            tracing::debug!(path = %self.path.display(), "released lock");
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        self.release();
    }
}
