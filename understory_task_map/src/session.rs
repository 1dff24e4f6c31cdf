// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-map operation context.

use core::hash::Hash;

use hashbrown::HashSet;
use understory_timing::{Epoch, EpochCounter};

bitflags::bitflags! {
    /// Operations currently in flight.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct OperationFlags: u8 {
        /// A split is running; the centering controller rests in `Splitting`.
        const SPLITTING          = 0b0000_0001;
        /// At least one deletion is pending.
        const DELETING           = 0b0000_0010;
        /// At least one regeneration is pending.
        const REGENERATING       = 0b0000_0100;
        /// Settle passes and debounced evaluations are held back.
        const PROCESSING_BLOCKED = 0b0000_1000;
    }
}

/// Operation flags, the render epoch and the per-task busy sets.
///
/// Each [`TaskMap`](crate::TaskMap) owns exactly one session.
#[derive(Clone, Debug)]
pub struct Session<K> {
    flags: OperationFlags,
    epoch: EpochCounter,
    deleting: HashSet<K>,
    regenerating: HashSet<K>,
}

impl<K> Default for Session<K> {
    fn default() -> Self {
        Self {
            flags: OperationFlags::empty(),
            epoch: EpochCounter::new(),
            deleting: HashSet::new(),
            regenerating: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> Session<K> {
    /// Flags currently set.
    #[must_use]
    pub fn flags(&self) -> OperationFlags {
        self.flags
    }

    /// Returns `true` if every flag in `flags` is set.
    #[must_use]
    pub fn is_active(&self, flags: OperationFlags) -> bool {
        self.flags.contains(flags)
    }

    /// Sets `flag` unless it is already set. Returns `true` if this call set it.
    pub fn try_enter(&mut self, flag: OperationFlags) -> bool {
        if self.flags.intersects(flag) {
            return false;
        }
        self.flags.insert(flag);
        true
    }

    /// Clears `flag`.
    pub fn exit(&mut self, flag: OperationFlags) {
        self.flags.remove(flag);
    }

    /// The current render epoch.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch.current()
    }

    /// Supersedes all work stamped with earlier epochs.
    pub fn bump_epoch(&mut self) -> Epoch {
        self.epoch.bump()
    }

    /// Returns `true` if `epoch` is still current.
    #[must_use]
    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.epoch.is_current(epoch)
    }

    /// Marks ids as pending deletion.
    pub fn begin_delete(&mut self, ids: impl IntoIterator<Item = K>) {
        self.deleting.extend(ids);
        self.sync_flags();
    }

    /// Clears the pending-deletion mark of `id`.
    pub fn end_delete(&mut self, id: &K) -> bool {
        let removed = self.deleting.remove(id);
        self.sync_flags();
        removed
    }

    /// Returns `true` if `id` is pending deletion.
    #[must_use]
    pub fn is_deleting(&self, id: &K) -> bool {
        self.deleting.contains(id)
    }

    /// Marks `id` as regenerating.
    pub fn begin_regenerate(&mut self, id: K) {
        self.regenerating.insert(id);
        self.sync_flags();
    }

    /// Clears the regenerating mark of `id`.
    pub fn end_regenerate(&mut self, id: &K) -> bool {
        let removed = self.regenerating.remove(id);
        self.sync_flags();
        removed
    }

    /// Returns `true` if `id` is regenerating.
    #[must_use]
    pub fn is_regenerating(&self, id: &K) -> bool {
        self.regenerating.contains(id)
    }

    /// Returns `true` if `id` is pending deletion or regenerating.
    #[must_use]
    pub fn is_busy(&self, id: &K) -> bool {
        self.is_deleting(id) || self.is_regenerating(id)
    }

    /// Drops busy marks for ids that `keep` rejects.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.deleting.retain(|id| keep(id));
        self.regenerating.retain(|id| keep(id));
        self.sync_flags();
    }

    /// Clears everything except the epoch, which is bumped.
    pub fn reset(&mut self) -> Epoch {
        self.flags = OperationFlags::empty();
        self.deleting.clear();
        self.regenerating.clear();
        self.epoch.bump()
    }

    fn sync_flags(&mut self) {
        self.flags.set(OperationFlags::DELETING, !self.deleting.is_empty());
        self.flags.set(OperationFlags::REGENERATING, !self.regenerating.is_empty());
    }
}
