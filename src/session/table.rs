// SPDX-License-Identifier: AGPL-3.0-or-later

//! The sharded session registry (component C1).
//!
//! A fixed array of `shard_count` shards, each a synchronously-locked map
//! from `UserId` to `SessionSlot`. Shard selection is `user & (shard_count -
//! 1)`, which requires `shard_count` to be a power of two. Every operation
//! acquires exactly one shard's lock, holds it only for an allocation-free,
//! non-blocking critical section, and never awaits while holding it.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::{message::UserId, session::slot::SessionSlot};

struct Shard {
    sessions: Mutex<HashMap<UserId, SessionSlot>>,
}

/// The access node's session registry. Cheap to clone (wrap in an `Arc`);
/// shares its shards rather than copying them.
pub struct SessionTable {
    shards: Vec<Shard>,
}

impl SessionTable {
    /// `shard_count` must be a power of two; callers are expected to have
    /// validated this already (see `crate::cfg::config::Config`).
    pub fn new(shard_count: usize) -> Self {
        assert!(shard_count > 0 && shard_count.is_power_of_two());
        let shards = (0..shard_count)
            .map(|_| Shard { sessions: Mutex::new(HashMap::new()) })
            .collect();
        Self { shards }
    }

    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard_index(&self, user: UserId) -> usize {
        (user as usize) & (self.shards.len() - 1)
    }

    /// Acquires `user`'s shard lock and invokes `f` with a mutable reference
    /// to its slot. If `insert_if_absent` is set and no slot exists yet, an
    /// empty one is created first. Returns `None` only when the slot was
    /// absent and `insert_if_absent` was false.
    pub fn with_slot<R>(
        &self,
        user: UserId,
        insert_if_absent: bool,
        f: impl FnOnce(&mut SessionSlot) -> R,
    ) -> Option<R> {
        let shard = &self.shards[self.shard_index(user)];
        let mut sessions = shard.sessions.lock();

        if insert_if_absent {
            let slot = sessions.entry(user).or_default();
            Some(f(slot))
        } else {
            sessions.get_mut(&user).map(f)
        }
    }

    /// Returns whether `user` currently has a slot in the table.
    pub fn contains(&self, user: UserId) -> bool {
        let shard = &self.shards[self.shard_index(user)];
        shard.sessions.lock().contains_key(&user)
    }

    /// Removes and returns `user`'s slot, if any.
    pub fn remove(&self, user: UserId) -> Option<SessionSlot> {
        let shard = &self.shards[self.shard_index(user)];
        shard.sessions.lock().remove(&user)
    }

    /// Total number of signed-in sessions across all shards. For metrics and
    /// tests only; takes every shard lock in turn, never more than one at a
    /// time.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.sessions.lock().len()).sum()
    }

    /// Drains every shard (lock-per-shard, serial), completing each slot's
    /// parked reply with an empty payload and cancelling its heartbeat
    /// timer. Used only by shutdown drain (see `crate::shutdown`). Returns
    /// the number of sessions torn down.
    pub fn drain_all(&self) -> usize {
        let mut drained = 0;
        for shard in &self.shards {
            let taken: Vec<SessionSlot> = {
                let mut sessions = shard.sessions.lock();
                sessions.drain().map(|(_, slot)| slot).collect()
            };
            for slot in taken {
                let (heartbeat, parked) = slot.into_parts();
                if let Some(handle) = heartbeat {
                    handle.cancel();
                }
                if let Some(parked) = parked {
                    parked.complete_empty();
                }
                drained += 1;
            }
        }
        drained
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
