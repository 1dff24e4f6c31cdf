// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_radial --heading-base-level=0

//! Understory Radial: lay out a task tree as nested rings.
//!
//! [`RadialLayout::distribute`] takes a flat list of [`LayoutElement`]s
//! linked by parent ids and assigns each one a center point. Every node's
//! children are spread on a ring around it:
//!
//! - The children of the single root fill a full ring that starts at north
//!   and runs clockwise.
//! - Exactly four of them sit on the diagonals, and a lone child points due
//!   north.
//! - Deeper rings fan across a wedge of [`RadialConfig::fan_span`] centered on
//!   the node's own bearing, so a subtree keeps moving away from the center
//!   instead of folding back onto its ancestors.
//!
//! Ring radii start from the spacing rule: adjacent siblings at least
//! [`RadialConfig::margin`] apart, and the ring clears the parent's footprint
//! by the same margin. Small rings get extra headroom and every radius is
//! floored at [`RadialConfig::min_radius`]. Radii are then solved bottom-up
//! so that the circles enclosing each child's whole subtree keep that margin
//! from one another and from the parent. No two rectangles in a layout
//! intersect.
//!
//! Input is validated up front and any problem fails the whole call with a
//! [`LayoutError`]. Parent cycles are not an error: the first unreachable
//! element of a cycle is promoted to a root and a warning is logged.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_radial::{LayoutElement, RadialLayout};
//!
//! let input = [
//!     LayoutElement::project("p"),
//!     LayoutElement::task("a", Some("p")),
//!     LayoutElement::task("b", Some("p")),
//! ];
//! let canvas = Rect::new(0.0, 0.0, 1600.0, 900.0);
//! let out = RadialLayout::default().distribute(&input, canvas).unwrap();
//!
//! assert_eq!(out[0].position, canvas.center());
//! assert_eq!(out[1].rect().intersect(out[2].rect()).area(), 0.0);
//! ```
//!
//! [`connector_crossings`] and [`world_bounds`] inspect a finished layout.

mod config;
mod diagnostics;
mod element;
mod error;
mod layout;

pub use config::{
    CHORD_FACTOR, FAN_SPAN, MIN_RADIUS, PROJECT_SIZE, RadialConfig, SMALL_RING_BOOST,
    SMALL_RING_MAX, SPACING_MARGIN, TASK_SIZE, TINY_RING_BOOST, TINY_RING_MAX,
};
pub use diagnostics::{ConnectorCrossing, connector_crossings, world_bounds};
pub use element::LayoutElement;
pub use error::LayoutError;
pub use layout::RadialLayout;
