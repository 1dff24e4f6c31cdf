// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};

/// Why a layout call produced nothing.
///
/// Layout is all-or-nothing: any of these fails the whole call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError<K> {
    /// A size was non-finite or not strictly positive.
    #[error("invalid size {size:?} for {id:?}")]
    InvalidSize {
        /// Offending element.
        id: K,
        /// Rejected size.
        size: Size,
    },
    /// Two elements share an id.
    #[error("duplicate element id {0:?}")]
    DuplicateId(K),
    /// The canvas bounds had a non-finite coordinate.
    #[error("invalid canvas bounds {0:?}")]
    InvalidBounds(Rect),
}
