// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic version stamps for superseding deferred work.

/// A stamp taken from an [`EpochCounter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Epoch(u64);

impl Epoch {
    /// Raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Monotonically increasing counter.
///
/// Deferred work captures [`EpochCounter::current`] when it is scheduled and
/// checks [`EpochCounter::is_current`] when it runs; any [`EpochCounter::bump`]
/// in between marks it obsolete. There is no cancellation: obsolete work
/// simply becomes a no-op.
#[derive(Clone, Debug, Default)]
pub struct EpochCounter {
    current: u64,
}

impl EpochCounter {
    /// Creates a counter at epoch zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: 0 }
    }

    /// The current epoch.
    #[must_use]
    pub const fn current(&self) -> Epoch {
        Epoch(self.current)
    }

    /// Advances to a new epoch and returns it.
    pub fn bump(&mut self) -> Epoch {
        self.current = self.current.wrapping_add(1);
        Epoch(self.current)
    }

    /// Returns `true` if `epoch` has not been superseded.
    #[must_use]
    pub const fn is_current(&self, epoch: Epoch) -> bool {
        epoch.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::EpochCounter;

    #[test]
    fn bump_supersedes_earlier_stamps() {
        let mut c = EpochCounter::new();
        let a = c.current();
        assert!(c.is_current(a));
        let b = c.bump();
        assert!(!c.is_current(a));
        assert!(c.is_current(b));
        assert!(b > a);
    }
}
