// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_hierarchy --heading-base-level=0

//! Understory Hierarchy: selection-driven visibility for task trees.
//!
//! Given a flat list of [`Task`]s linked by parent ids and the id of the
//! current selection, this crate decides how every task should be shown:
//! fully [`Active`](VisualState::Active), faded with a graduated opacity
//! ([`SemiTransparent`](VisualState::SemiTransparent)), or
//! [`Hidden`](VisualState::Hidden).
//!
//! The computation is a pure function of the task list and the selection.
//! There is no incremental state; callers recompute on every selection change
//! and apply the whole [`HierarchyResult`].
//!
//! ## Task selection
//!
//! Rules are applied in order and later rules only fill in ids not yet
//! assigned:
//!
//! 1. The selected task is active.
//! 2. Each ancestor is semi-transparent, with opacity multiplied by
//!    [`HierarchyConfig::ancestor_opacity_factor`] once per level. The project
//!    receives one further step when it is not itself part of the chain.
//! 3. Siblings of the selection are hidden.
//! 4. Direct children of the selection are active.
//! 5. Everything else is hidden.
//!
//! ## Project selection
//!
//! The project and its first-level tasks are active; everything else is
//! hidden.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_hierarchy::{HierarchyCalculator, Task, VisualState};
//!
//! let tasks = vec![
//!     Task::new("a", None),
//!     Task::new("b", None),
//!     Task::new("a1", Some("a")),
//! ];
//! let calc = HierarchyCalculator::default();
//! let result = calc.calculate_task_hierarchy(&"a", &tasks, &"project");
//!
//! assert_eq!(result.state(&"a"), VisualState::Active);
//! assert_eq!(result.state(&"a1"), VisualState::Active);
//! assert_eq!(result.state(&"b"), VisualState::Hidden);
//! assert!(result.state(&"project").opacity() < 1.0);
//! ```
//!
//! ## Cycles
//!
//! Parent links are expected to form a tree. Every walk in this crate keeps a
//! visited set, so a malformed, cyclic list still terminates; the cycle is
//! simply cut where it closes.

mod calculator;
mod index;
mod state;
mod task;

pub use calculator::{ANCESTOR_OPACITY_FACTOR, HierarchyCalculator, HierarchyConfig};
pub use index::TaskIndex;
pub use state::{HierarchyResult, VisualState};
pub use task::Task;
