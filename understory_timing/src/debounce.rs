// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trailing-edge debouncer.
//!
//! Every [`Debouncer::trigger`] pushes the deadline out to `now + delay`, so
//! a burst of triggers collapses into a single firing after the burst goes
//! quiet. An optional maximum wait bounds how long a continuous burst can
//! postpone the firing.
//!
//! ```
//! use understory_timing::Debouncer;
//!
//! let mut d = Debouncer::new(30).with_max_wait(100);
//! d.trigger(0);
//! d.trigger(20);
//! assert!(!d.fire_if_due(40));
//! assert!(d.fire_if_due(50));
//! assert!(!d.is_pending());
//! ```

/// Coalesces repeated triggers into one deadline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Debouncer {
    delay: u64,
    max_wait: Option<u64>,
    first_trigger: Option<u64>,
    deadline: Option<u64>,
}

impl Debouncer {
    /// Creates a debouncer that fires `delay` milliseconds after the last trigger.
    #[must_use]
    pub const fn new(delay: u64) -> Self {
        Self {
            delay,
            max_wait: None,
            first_trigger: None,
            deadline: None,
        }
    }

    /// Caps the time between the first trigger of a burst and the firing.
    #[must_use]
    pub const fn with_max_wait(mut self, max_wait: u64) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// The trailing delay in milliseconds.
    #[must_use]
    pub const fn delay(&self) -> u64 {
        self.delay
    }

    /// Records a trigger at `now` and returns the resulting deadline.
    pub fn trigger(&mut self, now: u64) -> u64 {
        let first = *self.first_trigger.get_or_insert(now);
        let mut deadline = now.saturating_add(self.delay);
        if let Some(max_wait) = self.max_wait {
            deadline = deadline.min(first.saturating_add(max_wait));
        }
        self.deadline = Some(deadline);
        deadline
    }

    /// Pending deadline, if a trigger has not fired yet.
    #[must_use]
    pub const fn deadline(&self) -> Option<u64> {
        self.deadline
    }

    /// Returns `true` if a trigger is waiting to fire.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` and resets if the pending deadline has passed.
    pub fn fire_if_due(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.cancel();
                true
            }
            _ => false,
        }
    }

    /// Drops any pending trigger.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.first_trigger = None;
    }
}
