// SPDX-License-Identifier: AGPL-3.0-or-later

//! Domain types shared by the core components. Deliberately independent of
//! `prost`/`tonic` — the wire conversion lives at the boundary in
//! `crate::service` and `crate::downstream`.

use bytes::Bytes;

/// Stable identity of a connected client.
pub type UserId = u64;

/// Monotonically increasing id issued by the logic tier for a persisted
/// message.
pub type MsgId = u64;

/// A group identity (shares the wire representation of `UserId`).
pub type GroupId = u64;

/// Whether a message targets a single peer or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgKind {
    Single,
    Group,
}

/// The peer a message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peer {
    User(UserId),
    Group(GroupId),
}

impl Peer {
    /// The id used as the consistent-hash routing key (see
    /// `crate::routing`).
    pub fn routing_id(self) -> u64 {
        match self {
            Peer::User(id) => id,
            Peer::Group(id) => id,
        }
    }
}

/// A single chat message, as held and pushed by the core.
#[derive(Debug, Clone)]
pub struct Message {
    pub sender: UserId,
    pub peer: Peer,
    pub kind: MsgKind,
    pub body: Bytes,
    pub client_ts: i64,
    pub server_ts: i64,
    pub msg_id: MsgId,
}

/// An inclusive range of message ids, as used by `GetMsgs`.
#[derive(Debug, Clone, Copy)]
pub struct MsgIdRange {
    pub from: MsgId,
    pub to: MsgId,
}
