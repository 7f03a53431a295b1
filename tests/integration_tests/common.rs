// SPDX-License-Identifier: AGPL-3.0-or-later

//! Shared harness for in-process integration tests: fake logic/dbproxy
//! servers plus a real access node, all bound to ephemeral loopback ports.

use std::time::Duration;

use tinyim_access::{
    core::AccessCore,
    downstream::{DbproxyClient, LogicClient},
    pb::{
        access::{
            SigninData, access_interconnect_client::AccessInterconnectClient,
            access_interconnect_server::AccessInterconnectServer,
            access_service_client::AccessServiceClient,
            access_service_server::AccessServiceServer,
        },
        common,
        dbproxy::dbproxy_service_server::DbproxyServiceServer,
        logic::logic_service_server::LogicServiceServer,
    },
    service::{AccessInterconnectImpl, AccessServiceImpl},
};
use tokio::net::TcpListener;
use tonic::transport::{Channel, Server};

use crate::integration_tests::fakes::{FakeDbproxy, FakeLogic};

async fn ephemeral_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    (listener, format!("http://{addr}"))
}

async fn dial(uri: String) -> Channel {
    // Spawned servers need a moment to start accepting before we dial them.
    tokio::time::sleep(Duration::from_millis(20)).await;
    Channel::from_shared(uri).expect("valid uri").connect().await.expect("connect to server")
}

async fn spawn_fake_logic() -> Channel {
    let (listener, uri) = ephemeral_listener().await;
    tokio::spawn(async move {
        let incoming = tokio_stream::wrappers::TcpListenerStream::new(listener);
        let _ = Server::builder()
            .add_service(LogicServiceServer::new(FakeLogic::default()))
            .serve_with_incoming(incoming)
            .await;
    });
    dial(uri).await
}

async fn spawn_fake_dbproxy() -> Channel {
    let (listener, uri) = ephemeral_listener().await;
    tokio::spawn(async move {
        let incoming = tokio_stream::wrappers::TcpListenerStream::new(listener);
        let _ = Server::builder()
            .add_service(DbproxyServiceServer::new(FakeDbproxy))
            .serve_with_incoming(incoming)
            .await;
    });
    dial(uri).await
}

/// Stands up fake logic/dbproxy servers and a real access node wired to
/// them, returning clients for the access node's two services.
pub async fn spawn_access_node(
    heartbeat_timeout: Duration,
) -> (AccessServiceClient<Channel>, AccessInterconnectClient<Channel>) {
    let logic_channel = spawn_fake_logic().await;
    let dbproxy_channel = spawn_fake_dbproxy().await;

    let core = AccessCore::new(
        4,
        heartbeat_timeout,
        LogicClient::new(logic_channel),
        DbproxyClient::new(dbproxy_channel),
        "test-access-node".to_string(),
    );

    let (listener, uri) = ephemeral_listener().await;
    let access_server = AccessServiceServer::new(AccessServiceImpl::new(core.clone()));
    let interconnect_server = AccessInterconnectServer::new(AccessInterconnectImpl::new(core.clone()));

    tokio::spawn(async move {
        let incoming = tokio_stream::wrappers::TcpListenerStream::new(listener);
        let _ = Server::builder()
            .add_service(access_server)
            .add_service(interconnect_server)
            .serve_with_incoming(incoming)
            .await;
    });

    let channel = dial(uri).await;
    (AccessServiceClient::new(channel.clone()), AccessInterconnectClient::new(channel))
}

pub fn sign_in_request(user_id: u64) -> SigninData {
    SigninData { user_id, password: "pw".to_string(), client_timestamp: 0, access_addr: String::new() }
}

pub fn push_msg(sender: u64, peer: u64, text: &str) -> common::Msg {
    common::Msg {
        user_id: sender,
        peer_id: peer,
        msg_type: 0,
        message: text.as_bytes().to_vec(),
        client_time: 0,
        server_time: 0,
        msg_id: 1,
    }
}
