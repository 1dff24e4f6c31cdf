// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tuned layout constants.

use kurbo::Size;

/// Minimum spacing between sibling footprints and between a ring and its parent.
pub const SPACING_MARGIN: f64 = 50.0;
/// Multiplier compensating for the chord approximation of sibling spacing.
pub const CHORD_FACTOR: f64 = 1.2;
/// Extra radius multiplier for rings of at most [`SMALL_RING_MAX`] children.
pub const SMALL_RING_BOOST: f64 = 1.3;
/// Largest ring that receives [`SMALL_RING_BOOST`].
pub const SMALL_RING_MAX: usize = 5;
/// Further multiplier for rings of at most [`TINY_RING_MAX`] children.
pub const TINY_RING_BOOST: f64 = 1.2;
/// Largest ring that receives [`TINY_RING_BOOST`].
pub const TINY_RING_MAX: usize = 3;
/// Absolute floor for every ring radius.
pub const MIN_RADIUS: f64 = 300.0;
/// Angle in radians that a nested ring fans across, centered on its parent's bearing.
pub const FAN_SPAN: f64 = core::f64::consts::PI;
/// Size of a task rectangle.
pub const TASK_SIZE: Size = Size::new(240.0, 120.0);
/// Size of the project rectangle.
pub const PROJECT_SIZE: Size = Size::new(320.0, 160.0);

/// Tunables for [`RadialLayout`](crate::RadialLayout).
///
/// The defaults are the named constants in this module.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadialConfig {
    /// See [`SPACING_MARGIN`].
    pub margin: f64,
    /// See [`CHORD_FACTOR`].
    pub chord_factor: f64,
    /// See [`SMALL_RING_BOOST`].
    pub small_ring_boost: f64,
    /// See [`SMALL_RING_MAX`].
    pub small_ring_max: usize,
    /// See [`TINY_RING_BOOST`].
    pub tiny_ring_boost: f64,
    /// See [`TINY_RING_MAX`].
    pub tiny_ring_max: usize,
    /// See [`MIN_RADIUS`].
    pub min_radius: f64,
    /// See [`FAN_SPAN`]. Values outside `(0, 2π]` fall back to the default.
    pub fan_span: f64,
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            margin: SPACING_MARGIN,
            chord_factor: CHORD_FACTOR,
            small_ring_boost: SMALL_RING_BOOST,
            small_ring_max: SMALL_RING_MAX,
            tiny_ring_boost: TINY_RING_BOOST,
            tiny_ring_max: TINY_RING_MAX,
            min_radius: MIN_RADIUS,
            fan_span: FAN_SPAN,
        }
    }
}

impl RadialConfig {
    /// Radius multiplier applied on top of [`RadialConfig::chord_factor`] for a ring of `k`.
    #[must_use]
    pub fn boost(&self, k: usize) -> f64 {
        let mut boost = 1.0;
        if k <= self.small_ring_max {
            boost *= self.small_ring_boost;
        }
        if k <= self.tiny_ring_max {
            boost *= self.tiny_ring_boost;
        }
        boost
    }

    /// [`RadialConfig::fan_span`], or [`FAN_SPAN`] if it is out of range.
    #[must_use]
    pub fn span(&self) -> f64 {
        if self.fan_span > 0.0 && self.fan_span <= core::f64::consts::TAU {
            self.fan_span
        } else {
            FAN_SPAN
        }
    }
}
