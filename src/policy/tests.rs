//! Tests for the acquisition policy.

use super::*;
use crate::locks::PlatformLock;
use std::cell::Cell;
use tempfile::TempDir;

fn waiting(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        wait: true,
        sleep_interval: Duration::from_millis(1),
        max_retries,
        ..RetryPolicy::immediate()
    }
}

/// Attempt function that is busy `busy_for` times, then succeeds.
fn busy_then_free(busy_for: u32, calls: &Cell<u32>) -> impl FnMut() -> io::Result<Option<()>> + '_ {
    move || {
        calls.set(calls.get() + 1);
        Ok((calls.get() > busy_for).then_some(()))
    }
}

#[test]
fn test_free_lock_is_acquired_first_try() {
    let calls = Cell::new(0);
    let outcome = drive(&RetryPolicy::immediate(), busy_then_free(0, &calls), |_| {});

    assert!(matches!(outcome, Outcome::Acquired { attempts: 1, .. }));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_no_wait_makes_exactly_one_attempt() {
    let calls = Cell::new(0);
    let sleeps = Cell::new(0);
    let outcome = drive(&RetryPolicy::immediate(), busy_then_free(u32::MAX, &calls), |_| {
        sleeps.set(sleeps.get() + 1)
    });

    assert!(matches!(outcome, Outcome::Failed));
    assert_eq!(calls.get(), 1);
    assert_eq!(sleeps.get(), 0);
}

#[test]
fn test_no_wait_quiet_still_one_attempt() {
    let calls = Cell::new(0);
    let policy = RetryPolicy {
        quiet: true,
        ..RetryPolicy::immediate()
    };

    let outcome = drive(&policy, busy_then_free(u32::MAX, &calls), |_| {});

    assert!(matches!(outcome, Outcome::Failed));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_retries_bound_attempts() {
    for retries in 1..=5 {
        let calls = Cell::new(0);
        let outcome = drive(&waiting(retries), busy_then_free(u32::MAX, &calls), |_| {});

        match outcome {
            Outcome::GivenUp { attempts, reason } => {
                assert_eq!(reason, GiveUp::Retries);
                assert_eq!(attempts, retries + 1);
            }
            other => panic!("expected GivenUp, got {:?}", other),
        }
        assert_eq!(calls.get(), retries + 1);
    }
}

#[test]
fn test_wait_acquires_after_contention_clears() {
    let calls = Cell::new(0);
    let slept = Cell::new(Duration::ZERO);
    let policy = RetryPolicy {
        sleep_interval: Duration::from_secs(7),
        ..waiting(5)
    };

    let outcome = drive(&policy, busy_then_free(3, &calls), |d| {
        slept.set(slept.get() + d)
    });

    assert!(matches!(outcome, Outcome::Acquired { attempts: 4, .. }));
    assert_eq!(slept.get(), Duration::from_secs(21));
}

#[test]
fn test_unlimited_retries_keep_going() {
    let calls = Cell::new(0);
    let outcome = drive(&waiting(0), busy_then_free(50, &calls), |_| {});

    assert!(matches!(outcome, Outcome::Acquired { attempts: 51, .. }));
}

#[test]
fn test_os_error_counts_as_busy() {
    let calls = Cell::new(0);
    let outcome: Outcome<()> = drive(
        &waiting(2),
        || {
            calls.set(calls.get() + 1);
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        },
        |_| {},
    );

    assert!(matches!(
        outcome,
        Outcome::GivenUp {
            attempts: 3,
            reason: GiveUp::Retries
        }
    ));
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_wait_budget_stops_unlimited_retries() {
    let calls = Cell::new(0);
    let policy = RetryPolicy {
        sleep_interval: Duration::from_millis(20),
        max_wait: Duration::from_millis(100),
        ..waiting(0)
    };

    let outcome = drive(&policy, busy_then_free(u32::MAX, &calls), thread::sleep);

    match outcome {
        Outcome::GivenUp { attempts, reason } => {
            assert_eq!(reason, GiveUp::Deadline);
            assert!(attempts >= 2, "gave up after only {} attempts", attempts);
            assert!(attempts <= 7, "kept trying for {} attempts", attempts);
        }
        other => panic!("expected GivenUp, got {:?}", other),
    }
}

#[test]
fn test_sleep_is_cut_short_by_wait_budget() {
    let calls = Cell::new(0);
    let policy = RetryPolicy {
        sleep_interval: Duration::from_secs(30),
        max_wait: Duration::from_millis(50),
        ..waiting(0)
    };
    let started = Instant::now();

    let outcome = drive(&policy, busy_then_free(u32::MAX, &calls), thread::sleep);

    assert!(matches!(
        outcome,
        Outcome::GivenUp {
            attempts: 2,
            reason: GiveUp::Deadline
        }
    ));
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_last_retry_lands_at_wait_budget() {
    let calls = Cell::new(0);
    let policy = RetryPolicy {
        sleep_interval: Duration::from_secs(30),
        max_wait: Duration::from_millis(50),
        ..waiting(0)
    };

    let outcome = drive(&policy, busy_then_free(1, &calls), thread::sleep);

    assert!(matches!(outcome, Outcome::Acquired { attempts: 2, .. }));
}

#[test]
fn test_wait_budget_does_not_block_first_attempt() {
    let calls = Cell::new(0);
    let policy = RetryPolicy {
        max_wait: Duration::from_nanos(1),
        ..waiting(0)
    };

    let outcome = drive(&policy, busy_then_free(0, &calls), |_| {});

    assert!(matches!(outcome, Outcome::Acquired { .. }));
}

#[test]
fn test_acquire_against_real_lock() {
    let temp_dir = TempDir::new().unwrap();
    let lock_path = temp_dir.path().join("job.lock");
    let backend = PlatformLock::default();

    let held = acquire(&backend, &lock_path, &RetryPolicy::immediate());
    assert!(matches!(held, Outcome::Acquired { .. }));

    let second = acquire(&backend, &lock_path, &waiting(2));
    assert!(matches!(
        second,
        Outcome::GivenUp {
            attempts: 3,
            reason: GiveUp::Retries
        }
    ));

    drop(held);
    let third = acquire(&backend, &lock_path, &RetryPolicy::immediate());
    assert!(matches!(third, Outcome::Acquired { .. }));
}
