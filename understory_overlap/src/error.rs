// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Errors returned by [`OverlapDetector`](crate::OverlapDetector) mutations.
///
/// A failed call leaves the registries unchanged.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum OverlapError<K> {
    /// Bounds contained a NaN or infinite coordinate.
    #[error("invalid bounds {bounds:?} for {id:?}")]
    InvalidBounds {
        /// Offending element.
        id: K,
        /// Rejected bounds.
        bounds: Rect,
    },
    /// No element with this id is registered.
    #[error("no registered element {0:?}")]
    Unknown(K),
}
