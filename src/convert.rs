// SPDX-License-Identifier: AGPL-3.0-or-later

//! Conversions between the wire types in `crate::pb` and the domain types in
//! `crate::message`. Kept separate from both so neither has to know about
//! the other.

use bytes::Bytes;

use crate::{
    message::{Message, MsgKind, Peer},
    pb::common,
};

const MSG_TYPE_SINGLE: i32 = 0;
const MSG_TYPE_GROUP: i32 = 1;

pub fn msg_kind_to_wire(kind: MsgKind) -> i32 {
    match kind {
        MsgKind::Single => MSG_TYPE_SINGLE,
        MsgKind::Group => MSG_TYPE_GROUP,
    }
}

pub fn msg_kind_from_wire(code: i32) -> MsgKind {
    if code == MSG_TYPE_GROUP { MsgKind::Group } else { MsgKind::Single }
}

pub fn message_to_wire(message: &Message) -> common::Msg {
    common::Msg {
        user_id: message.sender,
        peer_id: message.peer.routing_id(),
        msg_type: msg_kind_to_wire(message.kind),
        message: message.body.to_vec(),
        client_time: message.client_ts,
        server_time: message.server_ts,
        msg_id: message.msg_id,
    }
}

pub fn message_from_wire(msg: common::Msg) -> Message {
    let kind = msg_kind_from_wire(msg.msg_type);
    let peer = match kind {
        MsgKind::Single => Peer::User(msg.peer_id),
        MsgKind::Group => Peer::Group(msg.peer_id),
    };
    Message {
        sender: msg.user_id,
        peer,
        kind,
        body: Bytes::from(msg.message),
        client_ts: msg.client_time,
        server_ts: msg.server_time,
        msg_id: msg.msg_id,
    }
}

pub fn messages_to_wire(messages: Vec<Message>) -> common::Msgs {
    common::Msgs { msg: messages.iter().map(message_to_wire).collect() }
}
