// SPDX-License-Identifier: AGPL-3.0-or-later

//! The routing facade (component C5): computes the consistent-hash routing
//! code attached to every client-originated call forwarded to the logic or
//! dbproxy tier, so the downstream tier's own sharding lands sends to one
//! peer, and reads of one subject, on the same shard.

use crate::message::Peer;

/// gRPC metadata key the routing code is carried under, since the protocol
/// has no first-class consistent-hash routing field the way `brpc`'s
/// `Controller::set_request_code` does.
pub const ROUTE_CODE_HEADER: &str = "x-tinyim-route-code";

/// CRC32C over the 8-byte little-endian encoding of `id`. A pure function:
/// the same id always hashes to the same code.
pub fn hash_id(id: u64) -> u32 {
    crc32c::crc32c(&id.to_le_bytes())
}

/// The routing code for a message send: hashed on the peer id, so all
/// traffic to one peer lands on the same downstream shard.
pub fn hash_peer(peer: Peer) -> u32 {
    hash_id(peer.routing_id())
}

/// Attaches `id`'s CRC32C routing code to an outgoing downstream request as
/// gRPC metadata.
pub fn attach_route_code<T>(request: &mut tonic::Request<T>, id: u64) {
    let code = hash_id(id);
    if let Ok(value) = code.to_string().parse() {
        request.metadata_mut().insert(ROUTE_CODE_HEADER, value);
    }
}
