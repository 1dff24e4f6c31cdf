// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Measures where an element actually ended up on screen.
///
/// Used only by the correction pass after an immediate centering.
pub trait RectMeasure<K> {
    /// View-space bounds of the rendered element, if it is on screen.
    fn measure(&self, id: &K) -> Option<Rect>;
}

impl<K, F> RectMeasure<K> for F
where
    F: Fn(&K) -> Option<Rect>,
{
    fn measure(&self, id: &K) -> Option<Rect> {
        self(id)
    }
}
