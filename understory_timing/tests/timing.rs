// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the timing primitives.

use proptest::prelude::*;
use understory_timing::{Debouncer, EpochCounter, SettleSchedule, TimerQueue};

proptest! {
    #[test]
    fn queue_pops_in_nondecreasing_deadline_order(deadlines in prop::collection::vec(0_u64..10_000, 0..64)) {
        let mut q = TimerQueue::new();
        for (i, d) in deadlines.iter().enumerate() {
            q.schedule(*d, i);
        }
        let mut last = 0;
        let mut count = 0;
        while let Some((id, _)) = q.pop_due(u64::MAX) {
            prop_assert!(id.deadline() >= last);
            last = id.deadline();
            count += 1;
        }
        prop_assert_eq!(count, deadlines.len());
    }

    #[test]
    fn debouncer_fires_once_per_quiet_burst(gaps in prop::collection::vec(0_u64..29, 1..20)) {
        let mut d = Debouncer::new(30);
        let mut now = 0;
        for gap in &gaps {
            now += gap;
            d.trigger(now);
            // Gaps are shorter than the delay, so nothing may fire mid-burst.
            prop_assert!(!d.fire_if_due(now));
        }
        prop_assert!(d.fire_if_due(now + 30));
        prop_assert!(!d.is_pending());
    }
}

#[test]
fn superseded_settle_passes_are_detectable() {
    let mut epochs = EpochCounter::new();
    let mut q = TimerQueue::new();
    let schedule = SettleSchedule::default();

    let stale = epochs.current();
    schedule.schedule(&mut q, 0, |a| (stale, a.attempt));
    let fresh = epochs.bump();
    schedule.schedule(&mut q, 10, |a| (fresh, a.attempt));

    let (current, obsolete): (Vec<_>, Vec<_>) = q
        .drain_due(u64::MAX)
        .into_iter()
        .partition(|(epoch, _)| epochs.is_current(*epoch));
    assert_eq!(current.len(), 4);
    assert_eq!(obsolete.len(), 4);
}
