// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view2d --heading-base-level=0

//! Understory View 2D: viewport transforms and eased centering.
//!
//! This crate provides small, headless models of a world-space canvas seen
//! through a view rectangle expressed in device pixels:
//! - [`ViewTransform`]: the `{translate, scale}` value renderers read.
//! - [`Viewport2D`]: owner of the live transform with pan, anchored zoom,
//!   fitting and coordinate conversion.
//! - [`CenteringController`]: a small state machine that centers the view on
//!   a target, either immediately or with an eased animation, and serializes
//!   overlapping requests.
//! - [`ViewStore`]: the persistence seam for saving the transform between
//!   sessions.
//!
//! It does **not** own a scene or a renderer. Time is supplied by the host
//! as milliseconds on a monotonic clock; the controller never sleeps.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_view2d::{
//!     CenterContext, CenterMode, CenterOutcome, CenteringConfig, CenteringController, Viewport2D,
//! };
//!
//! let viewport = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
//! let mut ctl = CenteringController::new(viewport, CenteringConfig::default());
//!
//! let target = Rect::new(900.0, 900.0, 1140.0, 1020.0);
//! let outcome = ctl.center_on(Some(target), CenterMode::Animated(CenterContext::Select), 0);
//! assert_eq!(outcome, CenterOutcome::Animating { until: 500 });
//!
//! // Host drives the animation.
//! assert!(!ctl.tick(250));
//! assert!(ctl.tick(500));
//!
//! let on_screen = ctl.viewport().world_to_view_point(target.center());
//! assert!((on_screen - Point::new(400.0, 300.0)).hypot() < 1.0);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and axis-aligned; there is no rotation.
//! - Centering keeps the current zoom.
//! - A failed centering (missing or non-finite target) is logged and reported
//!   as finished so callers chaining work off completion are never stuck.

mod centering;
pub mod easing;
mod store;
mod transform;
mod viewport2d;

pub use centering::{
    CORRECTION_THRESHOLD, CenterContext, CenterMode, CenterOutcome, CenteringConfig,
    CenteringController, ControllerState, DELETE_DURATION_MS, SELECT_DURATION_MS,
    SPLIT_DURATION_MS, TransformFailure,
};
pub use store::{MemoryViewStore, ViewStore};
pub use transform::ViewTransform;
pub use viewport2d::{MAX_ZOOM, MIN_ZOOM, Viewport2D};
