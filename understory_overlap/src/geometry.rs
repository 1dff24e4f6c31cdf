// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle and segment predicates.
//!
//! All functions normalize their rectangles first, so inverted inputs
//! (`x1 < x0`) behave like their upright equivalents.

use kurbo::{Line, Rect};

/// Returns `true` if every coordinate of `rect` is finite.
#[must_use]
pub fn is_finite_rect(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}

/// Returns `true` if `a` and `b` intersect by more than `margin` on both axes.
///
/// The margin is applied inward, so rectangles that merely touch, or overlap
/// by a pixel-adjacent sliver, are not reported. The test is symmetric in its
/// arguments. Identical rectangles always overlap, even when they are no
/// larger than the margin.
///
/// ```
/// use kurbo::Rect;
/// use understory_overlap::geometry::rects_overlap;
///
/// let a = Rect::new(0.0, 0.0, 100.0, 100.0);
/// assert!(rects_overlap(a, a, 2.0));
/// assert!(!rects_overlap(a, Rect::new(99.0, 0.0, 200.0, 100.0), 2.0));
/// assert!(rects_overlap(a, Rect::new(90.0, 0.0, 200.0, 100.0), 2.0));
/// ```
#[must_use]
pub fn rects_overlap(a: Rect, b: Rect, margin: f64) -> bool {
    let a = a.abs();
    let b = b.abs();
    if a == b {
        return true;
    }
    a.x0 < b.x1 - margin && b.x0 < a.x1 - margin && a.y0 < b.y1 - margin && b.y0 < a.y1 - margin
}

/// Returns `true` if the segment touches or crosses `rect`.
///
/// Uses Liang–Barsky clipping; a segment with an endpoint inside the
/// rectangle intersects it.
///
/// ```
/// use kurbo::{Line, Rect};
/// use understory_overlap::geometry::segment_intersects_rect;
///
/// let r = Rect::new(10.0, 10.0, 20.0, 20.0);
/// assert!(segment_intersects_rect(Line::new((0.0, 15.0), (30.0, 15.0)), r));
/// assert!(!segment_intersects_rect(Line::new((0.0, 0.0), (30.0, 5.0)), r));
/// ```
#[must_use]
pub fn segment_intersects_rect(segment: Line, rect: Rect) -> bool {
    let r = rect.abs();
    let p0 = segment.p0;
    let d = segment.p1 - segment.p0;
    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;
    for (p, q) in [
        (-d.x, p0.x - r.x0),
        (d.x, r.x1 - p0.x),
        (-d.y, p0.y - r.y0),
        (d.y, r.y1 - p0.y),
    ] {
        if p == 0.0 {
            // Parallel to this edge pair: reject if outside the slab.
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t_exit {
                return false;
            }
            t_enter = t_enter.max(t);
        } else {
            if t < t_enter {
                return false;
            }
            t_exit = t_exit.min(t);
        }
    }
    t_enter <= t_exit
}

#[cfg(test)]
mod tests {
    use kurbo::{Line, Rect};

    use super::{is_finite_rect, rects_overlap, segment_intersects_rect};

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!rects_overlap(a, b, 0.0));
        assert!(!rects_overlap(a, b, 2.0));
    }

    #[test]
    fn identical_rects_overlap_at_any_size() {
        let tiny = Rect::new(5.0, 5.0, 7.0, 6.0);
        assert!(rects_overlap(tiny, tiny, 2.0));
        assert!(rects_overlap(tiny, Rect::new(7.0, 6.0, 5.0, 5.0), 2.0));
        // Anything short of identical still honors the margin.
        assert!(!rects_overlap(tiny, Rect::new(5.5, 5.0, 7.0, 6.0), 2.0));
    }

    #[test]
    fn inverted_rects_are_normalized() {
        let a = Rect::new(10.0, 10.0, 0.0, 0.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(rects_overlap(a, b, 1.0));
    }

    #[test]
    fn segment_cases() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Fully inside.
        assert!(segment_intersects_rect(Line::new((2.0, 2.0), (3.0, 3.0)), r));
        // Diagonal through a corner region.
        assert!(segment_intersects_rect(Line::new((-5.0, -5.0), (15.0, 15.0)), r));
        // Passing beside the rectangle.
        assert!(!segment_intersects_rect(Line::new((-5.0, 12.0), (15.0, 12.0)), r));
        // Stopping short.
        assert!(!segment_intersects_rect(Line::new((-10.0, 5.0), (-1.0, 5.0)), r));
        // Degenerate point inside.
        assert!(segment_intersects_rect(Line::new((5.0, 5.0), (5.0, 5.0)), r));
    }

    #[test]
    fn nan_is_not_finite() {
        assert!(!is_finite_rect(Rect::new(f64::NAN, 0.0, 1.0, 1.0)));
        assert!(!is_finite_rect(Rect::new(0.0, 0.0, f64::INFINITY, 1.0)));
        assert!(is_finite_rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
    }
}
