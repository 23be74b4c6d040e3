//! Advisory whole-file lock backend.

use super::{LockBackend, LockGuard};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Lock backend using an advisory exclusive lock on the whole file.
///
/// Locks are per open file handle, so two independent opens of the same path
/// conflict even inside one process.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdvisoryLock;

impl LockBackend for AdvisoryLock {
    fn try_acquire(&self, path: &Path) -> io::Result<Option<LockGuard>> {
        let file = open_lock_file(path)?;

        match file.try_lock_exclusive() {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "acquired advisory lock");
                Ok(Some(LockGuard::new(path.to_path_buf(), file)))
            }
            Err(e) if is_contended(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Open (creating if needed) the lock file without touching its contents.
fn open_lock_file(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }

    options.open(path)
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
