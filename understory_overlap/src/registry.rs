// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry entry types.

use kurbo::Rect;

/// What a control does. Counters get no visibility exemptions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlKind {
    /// Split the task into subtasks.
    Split,
    /// Regenerate the task's subtasks.
    Regenerate,
    /// Delete the task.
    Delete,
    /// Child counter badge.
    Counter,
}

impl ControlKind {
    /// Returns `true` for [`ControlKind::Counter`].
    #[must_use]
    pub fn is_counter(self) -> bool {
        matches!(self, Self::Counter)
    }
}

/// A rectangle or control known to the detector.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredElement<K> {
    /// Element id.
    pub id: K,
    /// Axis-aligned bounds in the shared coordinate space.
    pub bounds: Rect,
    /// Z-priority; larger levels are drawn in front.
    pub level: u32,
    /// Content rectangle decorated by this control. Always `None` for rectangles.
    pub linked: Option<K>,
    /// Control kind. Always `None` for rectangles.
    pub kind: Option<ControlKind>,
    /// Result of the last evaluation. Rectangles are always visible.
    pub visible: bool,
}

impl<K> RegisteredElement<K> {
    pub(crate) fn rectangle(id: K, bounds: Rect, level: u32) -> Self {
        Self {
            id,
            bounds,
            level,
            linked: None,
            kind: None,
            visible: true,
        }
    }

    pub(crate) fn control(
        id: K,
        bounds: Rect,
        level: u32,
        linked: Option<K>,
        kind: ControlKind,
    ) -> Self {
        Self {
            id,
            bounds,
            level,
            linked,
            kind: Some(kind),
            visible: true,
        }
    }

    /// Returns `true` if this entry is a counter control.
    #[must_use]
    pub fn is_counter(&self) -> bool {
        self.kind.is_some_and(ControlKind::is_counter)
    }
}
