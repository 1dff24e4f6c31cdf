// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered timer queue.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Handle of a scheduled timer.
///
/// Ids are unique for the lifetime of the queue that issued them. They carry
/// the deadline so cancellation does not need a secondary index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId {
    deadline: u64,
    seq: u64,
}

impl TimerId {
    /// Deadline this timer was scheduled for.
    #[must_use]
    pub const fn deadline(self) -> u64 {
        self.deadline
    }
}

/// A queue of payloads ordered by deadline.
///
/// Timers with equal deadlines fire in scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    entries: BTreeMap<TimerId, T>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Schedules `payload` to become due at `deadline`.
    pub fn schedule(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId {
            deadline,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        self.entries.insert(id, payload);
        id
    }

    /// Schedules `payload` to become due `delay` milliseconds after `now`.
    pub fn schedule_after(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.schedule(now.saturating_add(delay), payload)
    }

    /// Cancels a timer, returning its payload if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        self.entries.remove(&id)
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|id| id.deadline)
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(TimerId, T)> {
        let first = *self.entries.keys().next()?;
        if first.deadline > now {
            return None;
        }
        self.entries.remove(&first).map(|payload| (first, payload))
    }

    /// Removes and returns every payload due at `now`, in firing order.
    pub fn drain_due(&mut self, now: u64) -> Vec<T> {
        let mut out = Vec::new();
        while let Some((_, payload)) = self.pop_due(now) {
            out.push(payload);
        }
        out
    }

    /// Drops every pending timer for which `keep` returns `false`.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.entries.retain(|_, payload| keep(payload));
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancels everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::TimerQueue;

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(30, 'c');
        q.schedule(10, 'a');
        q.schedule(30, 'd');
        q.schedule(20, 'b');

        assert_eq!(q.next_deadline(), Some(10));
        assert_eq!(q.drain_due(25), vec!['a', 'b']);
        assert_eq!(q.drain_due(30), vec!['c', 'd']);
        assert!(q.is_empty());
    }

    #[test]
    fn nothing_due_before_deadline() {
        let mut q = TimerQueue::new();
        q.schedule_after(100, 50, ());
        assert!(q.pop_due(149).is_none());
        assert!(q.pop_due(150).is_some());
    }

    #[test]
    fn cancel_removes_pending_timer() {
        let mut q = TimerQueue::new();
        let a = q.schedule(10, 1);
        q.schedule(20, 2);
        assert_eq!(q.cancel(a), Some(1));
        assert_eq!(q.cancel(a), None);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_deadline(), Some(20));
    }

    #[test]
    fn retain_filters_payloads() {
        let mut q = TimerQueue::new();
        for i in 0..6 {
            q.schedule(i, i);
        }
        q.retain(|p| p % 2 == 0);
        assert_eq!(q.drain_due(u64::MAX), vec![0, 2, 4]);
    }
}
