//! Exclusive-open lock backend for platforms without advisory locks.

use super::{LockBackend, LockGuard};
use std::fs::OpenOptions;
use std::io;
use std::os::windows::fs::OpenOptionsExt;
use std::path::Path;

/// `ERROR_SHARING_VIOLATION`: another handle has the file open.
const ERROR_SHARING_VIOLATION: i32 = 32;

/// Lock backend that opens the file with a share mode of zero.
///
/// While the handle is open every other open of the path fails, which gives
/// the same mutual exclusion as an advisory lock.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExclusiveOpenLock;

impl LockBackend for ExclusiveOpenLock {
    fn try_acquire(&self, path: &Path) -> io::Result<Option<LockGuard>> {
        let opened = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .share_mode(0)
            .open(path);

        match opened {
            Ok(file) => {
                tracing::debug!(path = %path.display(), "acquired exclusive handle");
                Ok(Some(LockGuard::new(path.to_path_buf(), file)))
            }
            Err(e) if e.raw_os_error() == Some(ERROR_SHARING_VIOLATION) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
