// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer primitives for UI runtimes.
//!
//! UI coordination code tends to grow ad hoc "wait a bit and try again"
//! chains: re-run a visibility check after an animation should have settled,
//! coalesce a burst of geometry updates into one pass, drop a continuation
//! because a newer render superseded it. This crate gives those patterns
//! small, explicit types:
//!
//! - [`TimerQueue`]: deadline-ordered queue of payloads with cancellation.
//! - [`Debouncer`]: trailing-edge coalescing with an optional maximum wait.
//! - [`SettleSchedule`]: a fixed ladder of increasing delays used to repeat the
//!   same reconciliation a few times while layout and animation settle.
//! - [`EpochCounter`] / [`Epoch`]: monotonic version stamps that let stale
//!   continuations detect that they are obsolete.
//!
//! Nothing here reads a clock. Callers pass `now` as milliseconds on their own
//! monotonic time base (the same convention as `understory_event_state`'s
//! click recognizer) and poll for due work.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::{EpochCounter, SettleSchedule, TimerQueue};
//!
//! #[derive(Debug, PartialEq)]
//! enum Job {
//!     Recheck { epoch: understory_timing::Epoch, attempt: u32 },
//! }
//!
//! let mut epochs = EpochCounter::new();
//! let mut queue = TimerQueue::new();
//! let schedule = SettleSchedule::new([50, 150]);
//!
//! let epoch = epochs.current();
//! schedule.schedule(&mut queue, 1_000, |a| Job::Recheck { epoch, attempt: a.attempt });
//!
//! // A newer render supersedes the scheduled passes.
//! epochs.bump();
//!
//! let mut ran = 0;
//! while let Some((_, Job::Recheck { epoch, .. })) = queue.pop_due(2_000) {
//!     if epochs.is_current(epoch) {
//!         ran += 1;
//!     }
//! }
//! assert_eq!(ran, 0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod debounce;
mod epoch;
mod queue;
mod settle;

pub use debounce::Debouncer;
pub use epoch::{Epoch, EpochCounter};
pub use queue::{TimerId, TimerQueue};
pub use settle::{SettleAttempt, SettleSchedule};
