// SPDX-License-Identifier: AGPL-3.0-or-later

//! A single user's session state, as held inside one session-table shard.

use tokio::sync::oneshot;

use crate::{message::Message, timer::TimerHandle};

/// The long-poll reply a client is blocked on. Holding the `oneshot::Sender`
/// side doubles as the completion callback and the output buffer: sending
/// into it hands the waiting `PullData` call its response and releases the
/// connection, all in one step.
pub struct ParkedReply {
    tx: oneshot::Sender<Vec<Message>>,
}

impl ParkedReply {
    pub fn new(tx: oneshot::Sender<Vec<Message>>) -> Self {
        Self { tx }
    }

    /// Completes the parked call with no messages (heartbeat expiry, a
    /// superseded park, or a draining node all complete this way).
    pub fn complete_empty(self) {
        let _ = self.tx.send(Vec::new());
    }

    /// Completes the parked call with a pushed message.
    pub fn complete_with(self, messages: Vec<Message>) {
        let _ = self.tx.send(messages);
    }
}

/// Everything the core tracks for one signed-in user. Slots live behind a
/// shard mutex (see `crate::session::table`) and are never touched outside
/// of it except by the timer callback closures that reference them
/// indirectly through the table.
#[derive(Default)]
pub struct SessionSlot {
    parked: Option<ParkedReply>,
    heartbeat: Option<TimerHandle>,
}

impl SessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new parked reply, returning whichever one it superseded.
    pub fn install_parked(&mut self, parked: ParkedReply) -> Option<ParkedReply> {
        self.parked.replace(parked)
    }

    /// Removes and returns the parked reply without installing a new one.
    pub fn take_parked(&mut self) -> Option<ParkedReply> {
        self.parked.take()
    }

    pub fn has_parked(&self) -> bool {
        self.parked.is_some()
    }

    /// Installs a new heartbeat timer handle, returning whichever one it
    /// superseded.
    pub fn set_heartbeat(&mut self, handle: TimerHandle) -> Option<TimerHandle> {
        self.heartbeat.replace(handle)
    }

    pub fn take_heartbeat(&mut self) -> Option<TimerHandle> {
        self.heartbeat.take()
    }

    /// Consumes the slot, handing back its parked reply, if any, so the
    /// caller can complete it after the slot has been removed from the
    /// table.
    pub fn into_parked(mut self) -> Option<ParkedReply> {
        self.parked.take()
    }

    /// Consumes the slot, handing back both its heartbeat handle and its
    /// parked reply. Used by shutdown drain, which must cancel the timer
    /// before completing the reply.
    pub fn into_parts(mut self) -> (Option<TimerHandle>, Option<ParkedReply>) {
        (self.heartbeat.take(), self.parked.take())
    }
}
