// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settle passes: the same reconciliation repeated at increasing delays.

use alloc::vec::Vec;

use crate::queue::{TimerId, TimerQueue};

/// One attempt of a settle schedule.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SettleAttempt {
    /// Zero-based attempt index.
    pub attempt: u32,
    /// Total number of attempts in the schedule.
    pub of: u32,
    /// Delay of this attempt relative to the scheduling time.
    pub delay: u64,
}

impl SettleAttempt {
    /// Returns `true` for the final attempt of the schedule.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.attempt + 1 >= self.of
    }
}

/// A ladder of delays at which a reconciliation is re-run.
///
/// Rather than computing one perfectly timed pass after layout and animation
/// have finished, callers fire the same idempotent pass a few times and let
/// the last one observe the settled state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SettleSchedule {
    delays: Vec<u64>,
}

impl Default for SettleSchedule {
    fn default() -> Self {
        Self::new([50, 150, 400, 800])
    }
}

impl SettleSchedule {
    /// Creates a schedule from explicit delays. Delays are sorted ascending.
    pub fn new(delays: impl IntoIterator<Item = u64>) -> Self {
        let mut delays: Vec<u64> = delays.into_iter().collect();
        delays.sort_unstable();
        Self { delays }
    }

    /// Creates `max_attempts` delays starting at `first`, doubling each time.
    #[must_use]
    pub fn doubling(first: u64, max_attempts: u32) -> Self {
        let mut delays = Vec::with_capacity(max_attempts as usize);
        let mut d = first;
        for _ in 0..max_attempts {
            delays.push(d);
            d = d.saturating_mul(2);
        }
        Self { delays }
    }

    /// Configured delays in milliseconds.
    #[must_use]
    pub fn delays(&self) -> &[u64] {
        &self.delays
    }

    /// Number of attempts.
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        u32::try_from(self.delays.len()).unwrap_or(u32::MAX)
    }

    /// Iterates the attempts of this schedule.
    pub fn attempts(&self) -> impl Iterator<Item = SettleAttempt> + '_ {
        let of = self.max_attempts();
        self.delays
            .iter()
            .zip(0_u32..)
            .map(move |(&delay, attempt)| SettleAttempt { attempt, of, delay })
    }

    /// Pushes one timer per attempt into `queue`, relative to `now`.
    pub fn schedule<T>(
        &self,
        queue: &mut TimerQueue<T>,
        now: u64,
        mut make: impl FnMut(SettleAttempt) -> T,
    ) -> Vec<TimerId> {
        self.attempts()
            .map(|a| queue.schedule_after(now, a.delay, make(a)))
            .collect()
    }
}
