// SPDX-License-Identifier: AGPL-3.0-or-later

//! Inter-access ingress (component C6): accepts pushes forwarded by sibling
//! access nodes and hands them to the delivery engine's `Wake`.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{delivery::DeliveryEngine, error::AccessError, message::Message};

/// The inbound half of inter-node delivery. `AccessInterconnectImpl` (the
/// `tonic` service boundary) delegates `SendToAccess` here.
pub struct Ingress {
    delivery: Arc<DeliveryEngine>,
}

impl Ingress {
    pub fn new(delivery: Arc<DeliveryEngine>) -> Self {
        Self { delivery }
    }

    /// Delivers `message` to its local parked reply. Returns
    /// `AccessError::NoListener` if the target user has no slot parked —
    /// the caller (a peer access node) should treat this as a
    /// routing-staleness signal, not a fatal failure.
    ///
    /// Group fan-out is resolved upstream by the logic tier, which issues
    /// one `SendToAccess` per member with that member's id as the peer —
    /// so regardless of `msg_type`, `peer` already names the concrete
    /// recipient and is woken directly, the same way the original
    /// `SendtoAccess` wakes `msg->user_id()` uniformly with no per-kind
    /// branch.
    pub fn send_to_access(&self, message: Message) -> Result<(), AccessError> {
        let target = message.peer.routing_id();

        debug!(user_id = target, msg_id = message.msg_id, "inbound push from peer access node");

        if self.delivery.wake(target, message) {
            Ok(())
        } else {
            warn!(user_id = target, "push arrived with no parked reply");
            Err(AccessError::NoListener(target))
        }
    }
}
