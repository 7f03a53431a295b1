// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shutdown drain (component C8): on process stop, releases every parked
//! pull cleanly and cancels every live heartbeat timer, mirroring the
//! teacher's graceful-quiesce pattern for in-flight connections.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::session::table::SessionTable;

/// Drives the drain-on-shutdown sequence and doubles as the signal other
/// long-running tasks (the gRPC server, the timer callbacks) watch to know
/// the node is stopping.
#[derive(Clone)]
pub struct ShutdownDrain {
    token: CancellationToken,
}

impl Default for ShutdownDrain {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownDrain {
    pub fn new() -> Self {
        Self { token: CancellationToken::new() }
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Completes every parked reply with an empty payload and cancels every
    /// live heartbeat timer, then signals the cancellation token so other
    /// tasks (the server's accept loop) can stop too.
    ///
    /// Locks each shard in turn, never more than one at a time, matching
    /// the Session Table's own locking discipline.
    pub fn drain(&self, table: &Arc<SessionTable>) {
        info!("shutdown drain starting");
        let drained = table.drain_all();
        info!(sessions_drained = drained, "shutdown drain complete");
        self.token.cancel();
    }
}
