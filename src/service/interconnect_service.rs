// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::{
    convert::message_from_wire,
    core::AccessCore,
    pb::{access::access_interconnect_server::AccessInterconnect, common},
};

/// Implements the sibling-facing `AccessInterconnect` trait, delegating to
/// `crate::ingress::Ingress`.
#[derive(Clone)]
pub struct AccessInterconnectImpl {
    core: Arc<AccessCore>,
}

impl AccessInterconnectImpl {
    pub fn new(core: Arc<AccessCore>) -> Self {
        Self { core }
    }
}

#[tonic::async_trait]
impl AccessInterconnect for AccessInterconnectImpl {
    async fn send_to_access(
        &self,
        request: Request<common::Msg>,
    ) -> Result<Response<common::Pong>, Status> {
        let message = message_from_wire(request.into_inner());
        self.core.ingress.send_to_access(message)?;
        Ok(Response::new(common::Pong { last_msg_id: 0 }))
    }
}
