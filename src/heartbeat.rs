// SPDX-License-Identifier: AGPL-3.0-or-later

//! The heartbeat supervisor (component C3): arms a per-user expiry timer on
//! every sign-in, park, and explicit heartbeat, and tears the session down
//! if it's never reset in time.

use std::{sync::Arc, time::Duration};

use tokio::time::Instant;
use tracing::debug;

use crate::{
    message::UserId,
    session::table::SessionTable,
    timer::{CancelOutcome, TimerService},
};

/// Reschedules a single user's expiry deadline, tearing the session down
/// (completing any parked reply empty) if the deadline is ever reached
/// without a reset.
pub struct HeartbeatSupervisor {
    table: Arc<SessionTable>,
    timers: TimerService,
    timeout: Duration,
}

impl HeartbeatSupervisor {
    pub fn new(table: Arc<SessionTable>, timers: TimerService, timeout: Duration) -> Self {
        Self { table, timers, timeout }
    }

    /// Arms (or rearms) `user`'s expiry deadline. Safe to call from any
    /// operation that has just touched the user's slot, or independently in
    /// response to an explicit heartbeat RPC — it acquires the shard lock
    /// itself rather than expecting the caller to hold it.
    ///
    /// The new timer is allocated before the shard lock is taken, so the
    /// critical section only ever swaps a handle and, if a prior timer
    /// loses its cancel race, drops it after the lock is released.
    pub fn reset(&self, user: UserId) {
        let deadline = Instant::now() + self.timeout;
        let table = self.table.clone();

        let new_handle = self.timers.schedule(deadline, move || {
            if let Some(slot) = table.remove(user) {
                debug!(user_id = user, "heartbeat expired; session torn down");
                if let Some(parked) = slot.into_parked() {
                    parked.complete_empty();
                }
            }
        });

        let prior = self
            .table
            .with_slot(user, true, |slot| slot.set_heartbeat(new_handle))
            .flatten();

        if let Some(prior_handle) = prior {
            match prior_handle.cancel() {
                CancelOutcome::Cancelled => {},
                CancelOutcome::AlreadyFired => {
                    // The old deadline's callback is already running (or ran); it
                    // owns its own teardown and may race with this reset. This
                    // mirrors the upstream timer API, which makes the same
                    // trade-off.
                },
            }
        }
    }

    /// Cancels `user`'s heartbeat timer without arming a new one, used when
    /// tearing a session down deliberately (sign-out, shutdown drain).
    pub fn cancel(&self, user: UserId) {
        self.table.with_slot(user, false, |slot| {
            if let Some(handle) = slot.take_heartbeat() {
                handle.cancel();
            }
        });
    }
}
