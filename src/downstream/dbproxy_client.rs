// SPDX-License-Identifier: AGPL-3.0-or-later

//! Client to the dbproxy tier: authentication and session-location storage.

use tonic::transport::Channel;

use crate::{
    error::AccessError,
    message::UserId,
    pb::{access::SigninData, dbproxy::dbproxy_service_client::DbproxyServiceClient},
    routing::attach_route_code,
};

#[derive(Clone)]
pub struct DbproxyClient {
    inner: DbproxyServiceClient<Channel>,
}

impl DbproxyClient {
    pub fn new(channel: Channel) -> Self {
        Self { inner: DbproxyServiceClient::new(channel) }
    }

    /// Authenticates `user` and records `access_addr` as the node they're
    /// now attached to. Returns the watermark of already-delivered messages
    /// (`last_msg_id`) on success.
    pub async fn auth_and_save_session(
        &self,
        user: UserId,
        password: String,
        client_timestamp: i64,
        access_addr: String,
    ) -> Result<u64, AccessError> {
        let wire = SigninData { user_id: user, password, client_timestamp, access_addr };
        let mut request = tonic::Request::new(wire);
        attach_route_code(&mut request, user);

        let reply = self.inner.clone().auth_and_save_session(request).await?.into_inner();
        Ok(reply.last_msg_id)
    }
}
