// SPDX-License-Identifier: AGPL-3.0-or-later

//! A process-wide scheduler of one-shot, cancelable deadlines (component C2
//! of the access-node core). Each scheduled timer owns a lightweight Tokio
//! task parked on `sleep_until`; cancellation races the task via a
//! three-state atomic so the caller can tell whether it reclaimed the
//! timer's argument or lost the argument to the firing callback.

use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

const PENDING: u8 = 0;
const FIRED: u8 = 1;
const CANCELLED: u8 = 2;

/// Outcome of a `TimerHandle::cancel` call. This distinction is what lets
/// `crate::heartbeat` decide who owns the timer's argument block (Invariant
/// 4 of the session-slot data model).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// The callback will never run; the caller now owns whatever it passed
    /// to `schedule`.
    Cancelled,
    /// The callback is running or has already run; the caller must not
    /// touch the argument it passed to `schedule`.
    AlreadyFired,
}

struct TimerState {
    status: AtomicU8,
    abort: CancellationToken,
}

/// A handle to a scheduled timer. Cloning is cheap (it's an `Arc` clone);
/// any clone can cancel the timer.
#[derive(Clone)]
pub struct TimerHandle {
    inner: Arc<TimerState>,
}

impl TimerHandle {
    /// Attempts to cancel the timer before it fires. See `CancelOutcome`.
    /// Idempotent: cancelling an already-cancelled timer returns `Cancelled`
    /// again rather than `AlreadyFired`.
    pub fn cancel(&self) -> CancelOutcome {
        match self.inner.status.compare_exchange(
            PENDING,
            CANCELLED,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => {
                self.inner.abort.cancel();
                CancelOutcome::Cancelled
            },
            Err(FIRED) => CancelOutcome::AlreadyFired,
            Err(_) => CancelOutcome::Cancelled,
        }
    }
}

/// Schedules one-shot callbacks at absolute deadlines. Stateless aside from
/// what Tokio's runtime already tracks — kept as a named type so call sites
/// read as "go through the timer service" and so tests can swap in
/// `tokio::time::pause`/`advance` around it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimerService;

impl TimerService {
    pub fn new() -> Self {
        Self
    }

    /// Schedules `callback` to run at `deadline`, unless cancelled first via
    /// the returned handle. `callback` runs outside of any lock the caller
    /// might be holding — it is invoked from a freshly spawned task.
    pub fn schedule<F>(&self, deadline: Instant, callback: F) -> TimerHandle
    where F: FnOnce() + Send + 'static {
        let inner = Arc::new(TimerState {
            status: AtomicU8::new(PENDING),
            abort: CancellationToken::new(),
        });
        let task_state = inner.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {},
                _ = task_state.abort.cancelled() => return,
            }

            if task_state
                .status
                .compare_exchange(PENDING, FIRED, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                callback();
            }
        });

        TimerHandle { inner }
    }
}
