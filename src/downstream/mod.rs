// SPDX-License-Identifier: AGPL-3.0-or-later

//! Thin typed clients to the downstream logic and dbproxy tiers (component
//! C10). Generated `tonic` clients are `Clone` and multiplex over one
//! HTTP/2 connection, so these wrappers are constructed once at startup and
//! cloned per call.

pub mod dbproxy_client;
pub mod logic_client;

pub use dbproxy_client::DbproxyClient;
pub use logic_client::LogicClient;
