// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlap --heading-base-level=0

//! Understory Overlap: decide which floating controls are obscured.
//!
//! Task maps decorate each content rectangle with small floating controls
//! (split, regenerate and delete buttons, child counters). When the tree is
//! dense, a control can end up underneath a rectangle that is drawn in front
//! of the one it decorates. [`OverlapDetector`] keeps two registries, one for
//! content rectangles and one for controls, and resolves a visibility flag per
//! control.
//!
//! A control's visibility depends on the state of the task it decorates and
//! on overlap against *rectangles* only, never against other controls. For
//! each control the first matching rule wins:
//!
//! 1. Linked task hidden: invisible.
//! 2. Non-counter control on an active task: visible.
//! 3. Non-counter control on a semi-transparent task close to the root
//!    (level within [`OverlapConfig::near_root_level`]): visible.
//! 4. Otherwise, including every counter: hidden if any rectangle with a
//!    strictly greater level than the linked rectangle overlaps the control
//!    by more than [`OverlapConfig::margin`].
//!
//! Evaluation is meant to be coalesced. Mutations mark the detector dirty;
//! [`OverlapDetector::request_evaluation`] arms a trailing-edge debounce and
//! [`OverlapDetector::poll`] runs a single pass once it is due.
//!
//! ## Minimal example
//!
//! ```rust
//! use hashbrown::HashMap;
//! use kurbo::Rect;
//! use understory_hierarchy::VisualState;
//! use understory_overlap::{ControlKind, OverlapDetector};
//!
//! let mut det = OverlapDetector::<&str>::default();
//! det.register_rectangle("parent", Rect::new(0.0, 0.0, 240.0, 120.0), 1).unwrap();
//! det.register_rectangle("child", Rect::new(200.0, 0.0, 440.0, 120.0), 2).unwrap();
//! let badge = Rect::new(220.0, 10.0, 236.0, 26.0);
//! det.register_control("parent:count", badge, 1, Some("parent"), ControlKind::Counter)
//!     .unwrap();
//!
//! let mut states = HashMap::new();
//! states.insert("parent", VisualState::Active);
//! states.insert("child", VisualState::Active);
//! det.apply_states(&states);
//!
//! let visibility = det.detect_overlaps();
//! assert!(!visibility[&"parent:count"]);
//! ```
//!
//! ## Geometry
//!
//! The [`geometry`] module holds the rectangle and segment predicates used
//! here and by layout diagnostics.

mod detector;
mod error;
pub mod geometry;
mod registry;

pub use detector::{
    DEBOUNCE_MS, MAX_WAIT_MS, NEAR_ROOT_LEVEL, OVERLAP_MARGIN, OverlapConfig, OverlapDetector,
};
pub use error::OverlapError;
pub use registry::{ControlKind, RegisteredElement};
