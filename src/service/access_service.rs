// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::debug;

use crate::{
    convert::messages_to_wire,
    core::AccessCore,
    message::{Message, MsgIdRange, MsgKind, Peer},
    pb::{access::access_service_server::AccessService, access::SigninData, common},
};

/// Implements the client-facing `AccessService` trait by delegating to
/// `AccessCore`. Cheap to clone per connection — it only holds an `Arc`.
#[derive(Clone)]
pub struct AccessServiceImpl {
    core: Arc<AccessCore>,
}

impl AccessServiceImpl {
    pub fn new(core: Arc<AccessCore>) -> Self {
        Self { core }
    }
}

#[tonic::async_trait]
impl AccessService for AccessServiceImpl {
    async fn sign_in(
        &self,
        request: Request<SigninData>,
    ) -> Result<Response<common::Pong>, Status> {
        let req = request.into_inner();
        debug!(user_id = req.user_id, "SignIn");

        let last_msg_id = self
            .core
            .lifecycle
            .sign_in(req.user_id, req.password, req.client_timestamp, self.core.self_addr.clone())
            .await?;

        Ok(Response::new(common::Pong { last_msg_id }))
    }

    async fn sign_out(
        &self,
        request: Request<common::UserId>,
    ) -> Result<Response<common::Pong>, Status> {
        let user = request.into_inner().user_id;
        debug!(user_id = user, "SignOut");
        self.core.lifecycle.sign_out(user);
        Ok(Response::new(common::Pong { last_msg_id: 0 }))
    }

    async fn send_msg(
        &self,
        request: Request<common::NewMsg>,
    ) -> Result<Response<common::MsgReply>, Status> {
        let req = request.into_inner();
        debug!(user_id = req.user_id, peer_id = req.peer_id, "SendMsg");

        let message = Message {
            sender: req.user_id,
            peer: if req.msg_type == crate::convert::msg_kind_to_wire(MsgKind::Group) {
                Peer::Group(req.peer_id)
            } else {
                Peer::User(req.peer_id)
            },
            kind: crate::convert::msg_kind_from_wire(req.msg_type),
            body: bytes::Bytes::from(req.message),
            client_ts: req.client_time,
            server_ts: 0,
            msg_id: 0,
        };

        self.core.heartbeat.reset(req.user_id);

        let (msg_id, last_msg_id, server_time) = self.core.logic.send_msg(&message).await?;
        Ok(Response::new(common::MsgReply { msg_id, last_msg_id, server_time }))
    }

    async fn pull_data(
        &self,
        request: Request<common::Ping>,
    ) -> Result<Response<common::Msgs>, Status> {
        let user = request.into_inner().user_id;
        debug!(user_id = user, "PullData parked");

        let rx = self.core.delivery.park(user);
        let messages = rx.await.unwrap_or_default();
        Ok(Response::new(messages_to_wire(messages)))
    }

    async fn heart_beat(
        &self,
        request: Request<common::Ping>,
    ) -> Result<Response<common::Pong>, Status> {
        let user = request.into_inner().user_id;
        debug!(user_id = user, "HeartBeat");
        self.core.heartbeat.reset(user);
        Ok(Response::new(common::Pong { last_msg_id: 0 }))
    }

    async fn get_msgs(
        &self,
        request: Request<common::MsgIdRange>,
    ) -> Result<Response<common::Msgs>, Status> {
        let req = request.into_inner();
        let range = MsgIdRange { from: req.from, to: req.to };
        let messages = self.core.logic.get_msgs(req.user_id, range).await?;
        Ok(Response::new(messages_to_wire(messages)))
    }

    async fn get_friends(
        &self,
        request: Request<common::UserId>,
    ) -> Result<Response<common::UserInfos>, Status> {
        let user = request.into_inner().user_id;
        let user_info = self.core.logic.get_friends(user).await?;
        Ok(Response::new(common::UserInfos { user_info }))
    }

    async fn get_groups(
        &self,
        request: Request<common::UserId>,
    ) -> Result<Response<common::GroupInfos>, Status> {
        let user = request.into_inner().user_id;
        let group_info = self.core.logic.get_groups(user).await?;
        Ok(Response::new(common::GroupInfos { group_info }))
    }

    async fn get_group_members(
        &self,
        request: Request<common::GroupId>,
    ) -> Result<Response<common::UserInfos>, Status> {
        let group = request.into_inner().group_id;
        let user_info = self.core.logic.get_group_members(group).await?;
        Ok(Response::new(common::UserInfos { user_info }))
    }
}
