// SPDX-License-Identifier: AGPL-3.0-or-later

//! End-to-end scenarios driven through the real gRPC boundary against an
//! in-process access node backed by fake downstream tiers.

use std::time::Duration;

use tinyim_access::pb::common::{NewMsg, Ping};
use tonic::Code;

use crate::integration_tests::common::{push_msg, sign_in_request, spawn_access_node};

// E1: a signed-in user sends a message and gets a reply carrying a fresh
// msg_id and last_msg_id from the logic tier.
#[tokio::test]
async fn sign_in_then_send_msg_returns_an_assigned_msg_id() {
    let (mut access, _interconnect) = spawn_access_node(Duration::from_secs(30)).await;

    let pong = access.sign_in(sign_in_request(1)).await.expect("sign in").into_inner();
    assert_eq!(pong.last_msg_id, 0);

    let reply = access
        .send_msg(NewMsg {
            user_id: 1,
            peer_id: 2,
            msg_type: 0,
            message: b"hello".to_vec(),
            client_time: 0,
        })
        .await
        .expect("send msg")
        .into_inner();

    assert!(reply.msg_id > 0);
    assert_eq!(reply.msg_id, reply.last_msg_id);
}

// E2: a long-polling PullData unblocks once a sibling access node pushes a
// message for that user through AccessInterconnect.
#[tokio::test]
async fn pull_data_unblocks_when_a_sibling_pushes_a_message() {
    let (mut access, mut interconnect) = spawn_access_node(Duration::from_secs(30)).await;

    access.sign_in(sign_in_request(1)).await.expect("sign in");

    let mut pull_stub = access.clone();
    let pull_task = tokio::spawn(async move { pull_stub.pull_data(Ping { user_id: 1 }).await });

    // Give the long poll a moment to actually park before pushing.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let pong = interconnect
        .send_to_access(push_msg(2, 1, "hi there"))
        .await
        .expect("send to access")
        .into_inner();
    assert_eq!(pong.last_msg_id, 0);

    let msgs = pull_task.await.expect("task join").expect("pull data").into_inner();
    assert_eq!(msgs.msg.len(), 1);
    assert_eq!(msgs.msg[0].message, b"hi there");
}

// E5: pushing to a user with no parked listener fails with NotFound and
// never creates a session slot for them.
#[tokio::test]
async fn send_to_access_with_no_listener_fails_not_found() {
    let (_access, mut interconnect) = spawn_access_node(Duration::from_secs(30)).await;

    let status = interconnect
        .send_to_access(push_msg(2, 99, "nobody's listening"))
        .await
        .expect_err("expected NotFound");

    assert_eq!(status.code(), Code::NotFound);
}

// Sign-out tears a session down locally: a long poll that was already
// parked resolves empty instead of hanging forever, and a push that
// arrives afterward finds no listener.
#[tokio::test]
async fn sign_out_completes_a_parked_pull_and_orphans_later_pushes() {
    let (mut access, mut interconnect) = spawn_access_node(Duration::from_secs(30)).await;

    access.sign_in(sign_in_request(7)).await.expect("sign in");

    let mut pull_stub = access.clone();
    let pull_task = tokio::spawn(async move { pull_stub.pull_data(Ping { user_id: 7 }).await });
    tokio::time::sleep(Duration::from_millis(50)).await;

    access.sign_out(tinyim_access::pb::common::UserId { user_id: 7 }).await.expect("sign out");

    let msgs = pull_task.await.expect("task join").expect("pull data").into_inner();
    assert!(msgs.msg.is_empty());

    let status = interconnect
        .send_to_access(push_msg(2, 7, "too late"))
        .await
        .expect_err("expected NotFound after sign out");
    assert_eq!(status.code(), Code::NotFound);
}
