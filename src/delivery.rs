// SPDX-License-Identifier: AGPL-3.0-or-later

//! The long-poll delivery engine (component C4): `Park` and `Wake`, the pair
//! of operations that turn a blocking `PullData` call into a cheap
//! completion the instant a message (or teardown) arrives.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::trace;

use crate::{
    heartbeat::HeartbeatSupervisor,
    message::{Message, UserId},
    session::{slot::ParkedReply, table::SessionTable},
};

/// Bundles the session table and heartbeat supervisor behind the Park/Wake
/// API; both operations touch the same user's slot and then reset its
/// heartbeat.
pub struct DeliveryEngine {
    table: Arc<SessionTable>,
    heartbeat: Arc<HeartbeatSupervisor>,
}

impl DeliveryEngine {
    pub fn new(table: Arc<SessionTable>, heartbeat: Arc<HeartbeatSupervisor>) -> Self {
        Self { table, heartbeat }
    }

    /// Parks a long-poll reply for `user`. Any reply already parked for this
    /// user (a previous `PullData` call superseded by a new one, typically
    /// after a reconnect) is completed with an empty result before the new
    /// one is installed. Also resets the user's heartbeat deadline, since a
    /// fresh `PullData` call is itself a liveness signal.
    pub fn park(&self, user: UserId) -> oneshot::Receiver<Vec<Message>> {
        let (tx, rx) = oneshot::channel();
        let superseded = self
            .table
            .with_slot(user, true, |slot| slot.install_parked(ParkedReply::new(tx)))
            .flatten();

        if let Some(superseded) = superseded {
            trace!(user_id = user, "superseding a previously parked reply");
            superseded.complete_empty();
        }

        self.heartbeat.reset(user);
        rx
    }

    /// Delivers `message` to `user` if, and only if, a reply is currently
    /// parked for them. If none is parked the message is dropped on this
    /// node — the caller (routing/ingress) is responsible for having
    /// already determined this is the right node for `user`. Returns
    /// whether a parked reply was found and completed.
    pub fn wake(&self, user: UserId, message: Message) -> bool {
        let parked = self
            .table
            .with_slot(user, false, |slot| slot.take_parked())
            .flatten();

        match parked {
            Some(parked) => {
                parked.complete_with(vec![message]);
                true
            },
            None => {
                trace!(user_id = user, "no parked reply; message dropped on this node");
                false
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bytes::Bytes;

    use super::*;
    use crate::{message::Peer, timer::TimerService};

    fn engine() -> DeliveryEngine {
        let table = Arc::new(SessionTable::new(4));
        let heartbeat = Arc::new(HeartbeatSupervisor::new(
            table.clone(),
            TimerService::new(),
            Duration::from_secs(30),
        ));
        DeliveryEngine::new(table, heartbeat)
    }

    fn sample_message(sender: UserId, peer: UserId) -> Message {
        Message {
            sender,
            peer: Peer::User(peer),
            kind: crate::message::MsgKind::Single,
            body: Bytes::from_static(b"hi"),
            client_ts: 0,
            server_ts: 0,
            msg_id: 1,
        }
    }

    #[tokio::test]
    async fn wake_completes_a_parked_reply() {
        let engine = engine();
        let rx = engine.park(1);

        let delivered = engine.wake(1, sample_message(2, 1));
        assert!(delivered);

        let received = rx.await.expect("reply channel should not be dropped");
        assert_eq!(received.len(), 1);
    }

    #[tokio::test]
    async fn wake_without_a_parked_reply_is_dropped() {
        let engine = engine();
        assert!(!engine.wake(99, sample_message(1, 99)));
    }

    #[tokio::test]
    async fn a_second_park_supersedes_the_first_with_an_empty_reply() {
        let engine = engine();
        let first = engine.park(1);
        let _second = engine.park(1);

        let received = first.await.expect("superseded reply should still resolve");
        assert!(received.is_empty());
    }
}
