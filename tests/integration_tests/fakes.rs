// SPDX-License-Identifier: AGPL-3.0-or-later

//! Minimal stand-ins for the downstream logic and dbproxy tiers, just
//! enough surface for the access node's integration tests to drive it
//! without a real downstream deployment.

use std::sync::atomic::{AtomicU64, Ordering};

use tinyim_access::pb::{
    common::{GroupInfos, MsgIdRange, MsgReply, Msgs, Pong, UserId, UserInfos},
    dbproxy::dbproxy_service_server::DbproxyService,
    logic::logic_service_server::LogicService,
};
use tonic::{Request, Response, Status};

#[derive(Default)]
pub struct FakeLogic {
    next_msg_id: AtomicU64,
}

#[tonic::async_trait]
impl LogicService for FakeLogic {
    async fn send_msg(
        &self,
        request: Request<tinyim_access::pb::common::NewMsg>,
    ) -> Result<Response<MsgReply>, Status> {
        let _ = request.into_inner();
        let msg_id = self.next_msg_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Response::new(MsgReply { msg_id, last_msg_id: msg_id, server_time: 0 }))
    }

    async fn get_msgs(&self, _request: Request<MsgIdRange>) -> Result<Response<Msgs>, Status> {
        Ok(Response::new(Msgs { msg: Vec::new() }))
    }

    async fn get_friends(&self, _request: Request<UserId>) -> Result<Response<UserInfos>, Status> {
        Ok(Response::new(UserInfos { user_info: Vec::new() }))
    }

    async fn get_groups(&self, _request: Request<UserId>) -> Result<Response<GroupInfos>, Status> {
        Ok(Response::new(GroupInfos { group_info: Vec::new() }))
    }

    async fn get_group_members(
        &self,
        _request: Request<tinyim_access::pb::common::GroupId>,
    ) -> Result<Response<UserInfos>, Status> {
        Ok(Response::new(UserInfos { user_info: Vec::new() }))
    }
}

pub struct FakeDbproxy;

#[tonic::async_trait]
impl DbproxyService for FakeDbproxy {
    async fn auth_and_save_session(
        &self,
        _request: Request<tinyim_access::pb::access::SigninData>,
    ) -> Result<Response<Pong>, Status> {
        Ok(Response::new(Pong { last_msg_id: 0 }))
    }
}
