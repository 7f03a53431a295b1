// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error kinds surfaced by the access-node core, and their mapping onto
//! `tonic::Status` at the RPC boundary.

use thiserror::Error;

use crate::message::UserId;

/// Errors the access-node core can produce. Library-internal call sites
/// branch on these; the RPC boundary (`crate::service`) maps them to
/// `tonic::Status` verbatim.
#[derive(Debug, Error)]
pub enum AccessError {
    /// No session slot exists for this user at all.
    #[error("unknown user {0}")]
    UnknownUser(UserId),

    /// A slot exists but has no parked reply to wake.
    #[error("user {0} has no listener parked")]
    NoListener(UserId),

    /// The downstream logic or dbproxy tier returned an error; the code and
    /// text are propagated verbatim, never retried here.
    #[error("downstream call failed: {0}")]
    DownstreamFailed(#[from] tonic::Status),

    /// The node is draining and is no longer accepting new parked replies.
    #[error("access node is shutting down")]
    ShuttingDown,
}

impl From<&AccessError> for tonic::Code {
    fn from(err: &AccessError) -> Self {
        match err {
            AccessError::UnknownUser(_) => tonic::Code::NotFound,
            AccessError::NoListener(_) => tonic::Code::NotFound,
            AccessError::DownstreamFailed(status) => status.code(),
            AccessError::ShuttingDown => tonic::Code::Unavailable,
        }
    }
}

impl From<AccessError> for tonic::Status {
    fn from(err: AccessError) -> Self {
        if let AccessError::DownstreamFailed(status) = &err {
            return status.clone();
        }
        let code = tonic::Code::from(&err);
        tonic::Status::new(code, err.to_string())
    }
}
