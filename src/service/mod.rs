// SPDX-License-Identifier: AGPL-3.0-or-later

//! The gRPC service boundary (component C9): maps the generated
//! `AccessService`/`AccessInterconnect` traits onto `AccessCore`.

pub mod access_service;
pub mod interconnect_service;

pub use access_service::AccessServiceImpl;
pub use interconnect_service::AccessInterconnectImpl;
