// SPDX-License-Identifier: AGPL-3.0-or-later

//! Client to the logic tier: message persistence, message history, and the
//! friend/group/group-member graph.

use tonic::transport::Channel;

use crate::{
    convert::message_from_wire,
    error::AccessError,
    message::{Message, MsgIdRange, UserId},
    pb::{common, logic::logic_service_client::LogicServiceClient},
    routing::attach_route_code,
};

/// Wraps `LogicServiceClient`, attaching the consistent-hash routing code
/// every call needs before it goes out.
#[derive(Clone)]
pub struct LogicClient {
    inner: LogicServiceClient<Channel>,
}

impl LogicClient {
    pub fn new(channel: Channel) -> Self {
        Self { inner: LogicServiceClient::new(channel) }
    }

    /// Persists `message`, routed by its peer id so all traffic to one peer
    /// lands on the same logic shard.
    pub async fn send_msg(
        &self,
        message: &Message,
    ) -> Result<(u64, u64, i64), AccessError> {
        let wire = common::NewMsg {
            user_id: message.sender,
            peer_id: message.peer.routing_id(),
            msg_type: crate::convert::msg_kind_to_wire(message.kind),
            message: message.body.to_vec(),
            client_time: message.client_ts,
        };
        let mut request = tonic::Request::new(wire);
        attach_route_code(&mut request, message.peer.routing_id());

        let reply = self.inner.clone().send_msg(request).await?.into_inner();
        Ok((reply.msg_id, reply.last_msg_id, reply.server_time))
    }

    /// Reads message history for `user`, routed by `user`'s own id.
    pub async fn get_msgs(
        &self,
        user: UserId,
        range: MsgIdRange,
    ) -> Result<Vec<Message>, AccessError> {
        let wire = common::MsgIdRange { user_id: user, from: range.from, to: range.to };
        let mut request = tonic::Request::new(wire);
        attach_route_code(&mut request, user);

        let reply = self.inner.clone().get_msgs(request).await?.into_inner();
        Ok(reply.msg.into_iter().map(message_from_wire).collect())
    }

    pub async fn get_friends(
        &self,
        user: UserId,
    ) -> Result<Vec<common::UserInfo>, AccessError> {
        let mut request = tonic::Request::new(common::UserId { user_id: user });
        attach_route_code(&mut request, user);
        let reply = self.inner.clone().get_friends(request).await?.into_inner();
        Ok(reply.user_info)
    }

    pub async fn get_groups(
        &self,
        user: UserId,
    ) -> Result<Vec<common::GroupInfo>, AccessError> {
        let mut request = tonic::Request::new(common::UserId { user_id: user });
        attach_route_code(&mut request, user);
        let reply = self.inner.clone().get_groups(request).await?.into_inner();
        Ok(reply.group_info)
    }

    pub async fn get_group_members(
        &self,
        group: crate::message::GroupId,
    ) -> Result<Vec<common::UserInfo>, AccessError> {
        let mut request = tonic::Request::new(common::GroupId { group_id: group });
        attach_route_code(&mut request, group);
        let reply = self.inner.clone().get_group_members(request).await?.into_inner();
        Ok(reply.user_info)
    }
}
