// SPDX-License-Identifier: AGPL-3.0-or-later

//! Generated protobuf/`tonic` types. Kept in one module so the rest of the
//! crate can treat "wire types" as a single boundary to convert at, per
//! `crate::message`'s doc comment.

pub mod common {
    tonic::include_proto!("tinyim.common");
}

pub mod access {
    tonic::include_proto!("tinyim.access");
}

pub mod logic {
    tonic::include_proto!("tinyim.logic");
}

pub mod dbproxy {
    tonic::include_proto!("tinyim.dbproxy");
}
