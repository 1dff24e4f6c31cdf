// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

/// Uniform pan + zoom mapping world space into view space.
///
/// `view = world * scale + translate`. The translation is expressed in
/// absolute view coordinates, so it already includes the view rect origin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewTransform {
    /// View-space position of the world origin.
    pub translate: Vec2,
    /// Uniform zoom factor.
    pub scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    /// No pan, unit zoom.
    pub const IDENTITY: Self = Self {
        translate: Vec2::ZERO,
        scale: 1.0,
    };

    /// Creates a transform.
    #[must_use]
    pub const fn new(translate: Vec2, scale: f64) -> Self {
        Self { translate, scale }
    }

    /// The transform at `scale` that maps `target` onto `view_center`.
    ///
    /// ```
    /// use kurbo::Point;
    /// use understory_view2d::ViewTransform;
    ///
    /// let t = ViewTransform::centering(Point::new(500.0, 300.0), Point::new(400.0, 300.0), 2.0);
    /// assert_eq!(t.world_to_view(Point::new(500.0, 300.0)), Point::new(400.0, 300.0));
    /// ```
    #[must_use]
    pub fn centering(target: Point, view_center: Point, scale: f64) -> Self {
        Self {
            translate: view_center.to_vec2() - target.to_vec2() * scale,
            scale,
        }
    }

    /// Returns `true` if every component is finite and the scale is positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.translate.is_finite() && self.scale.is_finite() && self.scale > 0.0
    }

    /// Maps a world point into view space.
    #[must_use]
    pub fn world_to_view(&self, pt: Point) -> Point {
        (pt.to_vec2() * self.scale + self.translate).to_point()
    }

    /// Maps a view point into world space.
    #[must_use]
    pub fn view_to_world(&self, pt: Point) -> Point {
        ((pt.to_vec2() - self.translate) / self.scale).to_point()
    }

    /// Maps a world rectangle into view space.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.world_to_view(rect.origin()),
            self.world_to_view(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Maps a view rectangle into world space.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.view_to_world(rect.origin()),
            self.view_to_world(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Linear interpolation of translation and scale.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            translate: self.translate.lerp(other.translate, t),
            scale: self.scale + (other.scale - self.scale) * t,
        }
    }

    /// The equivalent [`Affine`], for renderers.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translate) * Affine::scale(self.scale)
    }
}
