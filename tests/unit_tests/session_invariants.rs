// SPDX-License-Identifier: AGPL-3.0-or-later

//! Cross-module invariant checks spanning the Session Table, Heartbeat
//! Supervisor, and Long-Poll Delivery Engine together, the way a single
//! user's session is actually driven in production.

use std::{sync::Arc, time::Duration};

use bytes::Bytes;
use tinyim_access::{
    delivery::DeliveryEngine,
    heartbeat::HeartbeatSupervisor,
    message::{Message, MsgKind, Peer},
    session::table::SessionTable,
    timer::TimerService,
};

fn sample_message(sender: u64, peer: u64) -> Message {
    Message {
        sender,
        peer: Peer::User(peer),
        kind: MsgKind::Single,
        body: Bytes::from_static(b"hi"),
        client_ts: 0,
        server_ts: 0,
        msg_id: 1,
    }
}

fn harness(timeout: Duration) -> (Arc<SessionTable>, Arc<HeartbeatSupervisor>, DeliveryEngine) {
    let table = Arc::new(SessionTable::new(4));
    let heartbeat =
        Arc::new(HeartbeatSupervisor::new(table.clone(), TimerService::new(), timeout));
    let delivery = DeliveryEngine::new(table.clone(), heartbeat.clone());
    (table, heartbeat, delivery)
}

// Invariant: a second park before any wake supersedes the first with an
// empty payload, and the session continues to exist afterward (E4).
#[tokio::test]
async fn repeated_park_without_wake_supersedes_and_keeps_the_slot() {
    let (table, _heartbeat, delivery) = harness(Duration::from_secs(30));

    let first = delivery.park(1);
    let second = delivery.park(1);

    let first_result = first.await.expect("superseded park should still resolve");
    assert!(first_result.is_empty());
    assert!(table.contains(1));

    // The second park is still live: a wake now completes it.
    assert!(delivery.wake(1, sample_message(2, 1)));
    let second_result = second.await.expect("live park should resolve");
    assert_eq!(second_result.len(), 1);
}

// Invariant: heartbeat expiry while parked completes the parked reply empty
// and removes the slot entirely (E3).
#[tokio::test(start_paused = true)]
async fn heartbeat_expiry_while_parked_completes_empty_and_removes_the_slot() {
    let (table, _heartbeat, delivery) = harness(Duration::from_millis(50));

    let rx = delivery.park(1);
    assert!(table.contains(1));

    tokio::time::advance(Duration::from_millis(60)).await;
    tokio::task::yield_now().await;

    let result = rx.await.expect("expiry should complete the parked reply");
    assert!(result.is_empty());
    assert!(!table.contains(1));
}

// Invariant: a send-triggered heartbeat reset keeps a parked session alive
// past what would otherwise have been its expiry (E6).
#[tokio::test(start_paused = true)]
async fn heartbeat_reset_keeps_a_parked_session_alive_past_the_original_deadline() {
    let (table, heartbeat, delivery) = harness(Duration::from_secs(10));

    let rx = delivery.park(1);

    tokio::time::advance(Duration::from_secs(6)).await;
    heartbeat.reset(1); // simulates SendMsg's heartbeat reset side effect
    tokio::time::advance(Duration::from_secs(6)).await;
    tokio::task::yield_now().await;

    assert!(table.contains(1));
    assert!(delivery.wake(1, sample_message(2, 1)));
    let result = rx.await.expect("reset session should still be parked");
    assert_eq!(result.len(), 1);
}

// Invariant: a wake with no parked reply never creates or disturbs a slot.
#[tokio::test]
async fn wake_with_no_listener_leaves_the_table_untouched() {
    let (table, _heartbeat, delivery) = harness(Duration::from_secs(30));

    assert!(!delivery.wake(99, sample_message(1, 99)));
    assert!(!table.contains(99));
}
