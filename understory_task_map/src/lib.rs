// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_task_map --heading-base-level=0

//! Understory Task Map: keep a radial task diagram consistent while the user
//! selects, splits, deletes and regenerates tasks.
//!
//! A [`TaskMap`] ties together the other Understory task crates:
//!
//! - [`understory_hierarchy`] decides which tasks are shown for the focus.
//! - [`understory_radial`] places every task on rings around its parent.
//! - [`understory_overlap`] hides controls that would sit on top of deeper
//!   task rectangles.
//! - [`understory_view2d`] centers the view on the focus.
//! - [`understory_timing`] runs the debounced and repeated passes that let
//!   control visibility settle after the renderer has caught up.
//!
//! The map never reads a clock and never spawns work. The host passes a
//! monotonic `now` in milliseconds to every call, calls [`TaskMap::tick`]
//! once [`TaskMap::next_deadline`] has passed, and drains
//! [`TaskMapEvent`]s to update what it draws. In return it reports what it
//! drew through [`TaskMap::handle_render`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_hierarchy::{Task, VisualState};
//! use understory_task_map::{TaskMap, TaskMapConfig, TaskMapEvent};
//! use understory_view2d::Viewport2D;
//!
//! let viewport = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut map = TaskMap::new("project", viewport, TaskMapConfig::default());
//!
//! let tasks = vec![
//!     Task::new("a", Some("project")),
//!     Task::new("a1", Some("a")),
//!     Task::new("b", None),
//! ];
//! map.task_list_changed(tasks, 0).unwrap();
//! assert!(map.select_task("a", 10));
//!
//! assert_eq!(map.state(&"a"), VisualState::Active);
//! assert_eq!(map.state(&"a1"), VisualState::Active);
//! assert_eq!(map.state(&"b"), VisualState::Hidden);
//!
//! // Run the selection animation to its end.
//! while let Some(deadline) = map.next_deadline() {
//!     map.tick(deadline);
//! }
//! assert!(
//!     map.drain_events()
//!         .iter()
//!         .any(|e| matches!(e, TaskMapEvent::CenteringComplete))
//! );
//! ```
//!
//! ## Operations
//!
//! Splits, deletions and regenerations are reported in two halves
//! (`*_starting` and `*_completed`) so the map can hide the affected
//! controls while the host does its work. A deletion that removes the focus
//! moves it to the deleted task's parent. A split keeps the centering
//! controller in its `Splitting` state until the view has been recentered.
//!
//! ## Staleness
//!
//! Deferred passes carry the render epoch that was current when they were
//! scheduled. A layout change or project switch bumps the epoch, so passes
//! computed against the old tree do nothing when they come due.

mod config;
mod events;
mod map;
mod measure;
mod session;

pub use config::{CANVAS_SIZE, CORRECTION_DELAY_MS, TaskMapConfig};
pub use events::{Focus, RenderEvent, TaskMapEvent};
pub use map::TaskMap;
pub use measure::RectMeasure;
pub use session::{OperationFlags, Session};
