//! Locking subsystem for lockrun.
//!
//! A lock is identified by a filesystem path. The file is created if needed
//! but its contents are never read or written, and it is never removed.
//!
//! # Backends
//!
//! - [`AdvisoryLock`]: whole-file advisory lock (`flock` on Unix). Default on
//!   Unix.
//! - [`ExclusiveOpenLock`]: opens the file with no sharing allowed, so any
//!   other open of the same path fails while we hold it. Default on Windows.
//!
//! Both are released by the OS if the holder dies, however it dies, so crash
//! safety needs no cleanup protocol. Graceful paths release through
//! [`LockGuard`], which also releases on drop.

mod advisory;
#[cfg(windows)]
mod exclusive;
mod guard;
mod preflight;


use std::io;
use std::path::Path;

pub use advisory::AdvisoryLock;
#[cfg(windows)]
pub use exclusive::ExclusiveOpenLock;
pub use guard::LockGuard;
pub use preflight::preflight;

/// A way of taking an exclusive, non-blocking lock on a path.
pub trait LockBackend {
    /// Check that `path` can be used as a lock without creating the lock.
    fn preflight(&self, path: &Path) -> crate::error::Result<()> {
        preflight(path)
    }

    /// Make a single, non-blocking attempt to take the lock.
    ///
    /// Returns `Ok(None)` when another holder owns the lock. `Err` is reserved
    /// for OS failures unrelated to contention.
    fn try_acquire(&self, path: &Path) -> io::Result<Option<LockGuard>>;
}

/// The backend used by default on this platform.
#[cfg(not(windows))]
pub type PlatformLock = AdvisoryLock;

/// The backend used by default on this platform.
#[cfg(windows)]
pub type PlatformLock = ExclusiveOpenLock;
