// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

use crate::config::{PROJECT_SIZE, TASK_SIZE};

/// A node to lay out, and the laid-out result.
///
/// `position` is the element's center in world space. It is ignored on input
/// and filled in by [`RadialLayout::distribute`](crate::RadialLayout::distribute).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutElement<K> {
    /// Element id, unique within one layout call.
    pub id: K,
    /// Parent id. `None`, unresolved, or self-referencing parents make a root.
    pub parent: Option<K>,
    /// Center in world space.
    pub position: Point,
    /// Fixed size.
    pub size: Size,
}

impl<K> LayoutElement<K> {
    /// Creates an unplaced element.
    pub fn new(id: K, parent: Option<K>, size: Size) -> Self {
        Self {
            id,
            parent,
            position: Point::ZERO,
            size,
        }
    }

    /// Creates an unplaced element of [`TASK_SIZE`].
    pub fn task(id: K, parent: Option<K>) -> Self {
        Self::new(id, parent, TASK_SIZE)
    }

    /// Creates an unplaced root of [`PROJECT_SIZE`].
    pub fn project(id: K) -> Self {
        Self::new(id, None, PROJECT_SIZE)
    }

    /// World-space bounds.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.size)
    }

    /// The larger of width and height.
    #[must_use]
    pub fn footprint(&self) -> f64 {
        self.size.width.max(self.size.height)
    }

    /// Radius of the smallest circle around [`LayoutElement::position`] that holds the rectangle.
    #[must_use]
    pub fn reach(&self) -> f64 {
        self.size.to_vec2().hypot() / 2.0
    }
}
