//! Lock acquisition policy.
//!
//! Drives a [`LockBackend`] until the lock is taken or the [`RetryPolicy`]
//! says to stop:
//!
//! ```text
//! Trying --ok--> Acquired
//!   |
//!   +-busy, no wait----------------> Failed
//!   +-busy, retries exhausted------> GivenUp(Retries)
//!   +-busy, wait budget spent------> GivenUp(Deadline)
//!   +-busy--> Waiting --sleep--> Trying
//! ```
//!
//! An OS error from the backend counts as a busy lock. It is reported as a
//! warning unless the policy is quiet.

#[cfg(test)]
mod tests;

use crate::config::RetryPolicy;
use crate::locks::{LockBackend, LockGuard};
use std::io;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

/// Why a waiting policy stopped trying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveUp {
    /// More failed attempts than `max_retries`.
    Retries,
    /// `max_wait` elapsed since the policy started.
    Deadline,
}

/// Terminal state of the acquisition policy.
#[derive(Debug)]
pub enum Outcome<G> {
    /// The lock is held; `attempts` counts every try including the last.
    Acquired { guard: G, attempts: u32 },
    /// Busy on the only attempt (wait disabled).
    Failed,
    /// Waiting was enabled but ran out of retries or time.
    GivenUp { attempts: u32, reason: GiveUp },
}

/// Acquire `path` through `backend`, sleeping between attempts as needed.
pub fn acquire<B: LockBackend>(
    backend: &B,
    path: &Path,
    policy: &RetryPolicy,
) -> Outcome<LockGuard> {
    drive(policy, || backend.try_acquire(path), thread::sleep)
}

/// Run the state machine over an arbitrary attempt function.
///
/// `sleep` is called with the configured interval whenever the policy waits,
/// cut short so the last retry lands at the end of the wait budget.
pub fn drive<G>(
    policy: &RetryPolicy,
    mut attempt: impl FnMut() -> io::Result<Option<G>>,
    mut sleep: impl FnMut(Duration),
) -> Outcome<G> {
    let started = Instant::now();
    let mut failed: u32 = 0;

    loop {
        let acquired = attempt().unwrap_or_else(|e| {
            if policy.quiet {
                tracing::debug!(error = %e, "cannot lock");
            } else {
                tracing::warn!(error = %e, "cannot lock");
            }
            None
        });

        if let Some(guard) = acquired {
            return Outcome::Acquired {
                guard,
                attempts: failed + 1,
            };
        }

        failed += 1;

        if !policy.wait {
            return Outcome::Failed;
        }

        if policy.max_retries > 0 && failed > policy.max_retries {
            return Outcome::GivenUp {
                attempts: failed,
                reason: GiveUp::Retries,
            };
        }

        let mut pause = policy.sleep_interval;
        if let Some(limit) = policy.max_wait_limit() {
            let remaining = limit.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                tracing::debug!(attempts = failed, "wait budget of {:?} spent", limit);
                return Outcome::GivenUp {
                    attempts: failed,
                    reason: GiveUp::Deadline,
                };
            }
            pause = pause.min(remaining);
        }

        tracing::debug!("locked: sleeping {:?}, after attempt #{}", pause, failed);
        sleep(pause);
    }
}
