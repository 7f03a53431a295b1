// SPDX-License-Identifier: AGPL-3.0-or-later

//! Session lifecycle (component C7): sign-in and sign-out, the only two
//! operations that create or destroy a Session Table entry outside of
//! heartbeat expiry and shutdown drain.

use std::sync::Arc;

use tracing::debug;

use crate::{
    downstream::DbproxyClient,
    error::AccessError,
    heartbeat::HeartbeatSupervisor,
    message::UserId,
    session::table::SessionTable,
};

pub struct SessionLifecycle {
    table: Arc<SessionTable>,
    heartbeat: Arc<HeartbeatSupervisor>,
    dbproxy: DbproxyClient,
}

impl SessionLifecycle {
    pub fn new(
        table: Arc<SessionTable>,
        heartbeat: Arc<HeartbeatSupervisor>,
        dbproxy: DbproxyClient,
    ) -> Self {
        Self { table, heartbeat, dbproxy }
    }

    /// Authenticates `user` against dbproxy and, on success, establishes a
    /// slot and arms its heartbeat. Returns the watermark the client should
    /// resync from (`last_msg_id`).
    pub async fn sign_in(
        &self,
        user: UserId,
        password: String,
        client_timestamp: i64,
        access_addr: String,
    ) -> Result<u64, AccessError> {
        let last_msg_id = self
            .dbproxy
            .auth_and_save_session(user, password, client_timestamp, access_addr)
            .await?;

        self.table.with_slot(user, true, |_slot| ());
        self.heartbeat.reset(user);

        debug!(user_id = user, last_msg_id, "user signed in");
        Ok(last_msg_id)
    }

    /// Tears down `user`'s slot locally: cancels the heartbeat timer and
    /// completes any parked reply empty. There is no dedicated downstream
    /// sign-out call in scope — dbproxy's session record is expected to
    /// expire or be overwritten by the user's next sign-in.
    pub fn sign_out(&self, user: UserId) {
        self.heartbeat.cancel(user);
        if let Some(slot) = self.table.remove(user) {
            if let Some(parked) = slot.into_parked() {
                parked.complete_empty();
            }
        }
        debug!(user_id = user, "user signed out");
    }
}
