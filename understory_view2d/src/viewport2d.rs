// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

use crate::transform::ViewTransform;

/// Default lower zoom bound.
pub const MIN_ZOOM: f64 = 0.05;
/// Default upper zoom bound.
pub const MAX_ZOOM: f64 = 8.0;

/// A view rectangle in device pixels plus the live [`ViewTransform`].
///
/// `Viewport2D` is the single owner of the transform value. It can:
/// - Convert points and rectangles between world and view coordinates.
/// - Pan in view space and zoom around a view-space anchor.
/// - Fit a world rectangle into the view.
#[derive(Clone, Debug)]
pub struct Viewport2D {
    view_rect: Rect,
    transform: ViewTransform,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport2D {
    /// Creates a viewport covering `view_rect`.
    ///
    /// The world origin starts at the view rect origin at zoom `1.0`.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        Self {
            view_rect,
            transform: ViewTransform::new(view_rect.origin().to_vec2(), 1.0),
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    /// The view rectangle in device coordinates.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Resizes the view. The transform is left untouched.
    pub fn set_view_rect(&mut self, rect: Rect) {
        self.view_rect = rect;
    }

    /// Center of the view rectangle.
    #[must_use]
    pub fn view_center(&self) -> Point {
        self.view_rect.center()
    }

    /// The live transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    /// Replaces the transform wholesale, clamping its scale to the zoom limits.
    ///
    /// Invalid transforms (non-finite or non-positive scale) are ignored and
    /// `false` is returned.
    pub fn set_transform(&mut self, transform: ViewTransform) -> bool {
        if !transform.is_valid() {
            return false;
        }
        self.transform = ViewTransform {
            scale: transform.scale.clamp(self.min_zoom, self.max_zoom),
            ..transform
        };
        true
    }

    /// The uniform zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.transform.scale
    }

    /// Zoom limits as `(min, max)`.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the zoom limits and re-clamps the current zoom about the view center.
    ///
    /// The range is normalized so that `min <= max`.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom_about_view_point(self.view_center(), 1.0);
    }

    /// Pans by a delta in view space.
    pub fn pan_by_view(&mut self, delta: Vec2) {
        if delta.is_finite() {
            self.transform.translate += delta;
        }
    }

    /// Multiplies the zoom by `factor`, keeping `anchor_view` fixed on screen.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let anchor_world = self.view_to_world_point(anchor_view);
        let scale = (self.transform.scale * factor).clamp(self.min_zoom, self.max_zoom);
        self.transform = ViewTransform::centering(anchor_world, anchor_view, scale);
    }

    /// Fits `rect` into the view with `padding` view pixels on each side, centered.
    pub fn fit_rect(&mut self, rect: Rect, padding: f64) {
        let avail = self.view_rect.inset(-padding.max(0.0));
        if rect.width() <= 0.0
            || rect.height() <= 0.0
            || avail.width() <= 0.0
            || avail.height() <= 0.0
        {
            return;
        }
        let scale = (avail.width() / rect.width())
            .min(avail.height() / rect.height())
            .clamp(self.min_zoom, self.max_zoom);
        self.transform = ViewTransform::centering(rect.center(), self.view_center(), scale);
    }

    /// World-space rectangle currently visible.
    #[must_use]
    pub fn visible_world_rect(&self) -> Rect {
        self.view_to_world_rect(self.view_rect)
    }

    /// Converts a world point to view coordinates.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.transform.world_to_view(pt)
    }

    /// Converts a view point to world coordinates.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.transform.view_to_world(pt)
    }

    /// Converts a world rectangle to view coordinates.
    #[must_use]
    pub fn world_to_view_rect(&self, rect: Rect) -> Rect {
        self.transform.world_to_view_rect(rect)
    }

    /// Converts a view rectangle to world coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        self.transform.view_to_world_rect(rect)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::Viewport2D;

    fn approx(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut vp = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        vp.pan_by_view(Vec2::new(37.0, -11.0));
        let anchor = Point::new(200.0, 150.0);
        let before = vp.view_to_world_point(anchor);
        vp.zoom_about_view_point(anchor, 2.5);
        assert!(approx(vp.world_to_view_point(before), anchor));
        assert_eq!(vp.zoom(), 2.5);
    }

    #[test]
    fn zoom_respects_limits() {
        let mut vp = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        vp.set_zoom_limits(4.0, 0.5);
        assert_eq!(vp.zoom_limits(), (0.5, 4.0));
        vp.zoom_about_view_point(Point::ZERO, 100.0);
        assert_eq!(vp.zoom(), 4.0);
        vp.zoom_about_view_point(Point::ZERO, -1.0);
        assert_eq!(vp.zoom(), 4.0);
    }

    #[test]
    fn fit_rect_centers_content() {
        let mut vp = Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        let world = Rect::new(-1000.0, -500.0, 1000.0, 500.0);
        vp.fit_rect(world, 0.0);
        assert!(approx(vp.world_to_view_point(world.center()), vp.view_center()));
        assert_eq!(vp.zoom(), 0.4);
        let visible = vp.visible_world_rect();
        assert!(visible.width() >= world.width() - 1e-9);
    }

    #[test]
    fn invalid_transform_is_ignored() {
        let mut vp = Viewport2D::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let before = vp.transform();
        assert!(!vp.set_transform(crate::ViewTransform::new(Vec2::ZERO, f64::NAN)));
        assert_eq!(vp.transform(), before);
    }
}
