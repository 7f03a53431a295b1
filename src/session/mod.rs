// SPDX-License-Identifier: AGPL-3.0-or-later

//! The session registry (component C1): a sharded map from `UserId` to
//! `SessionSlot`, the only shared mutable state in the access node.

pub mod slot;
pub mod table;

pub use slot::{ParkedReply, SessionSlot};
pub use table::SessionTable;
