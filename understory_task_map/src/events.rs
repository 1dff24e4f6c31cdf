// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inbound render notifications and outbound coordinator events.

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use understory_hierarchy::VisualState;
use understory_overlap::ControlKind;

/// What the map is focused on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Focus<K> {
    /// The project node.
    Project,
    /// A task.
    Task(K),
}

impl<K> Focus<K> {
    /// The focused task, if any.
    #[must_use]
    pub fn task(&self) -> Option<&K> {
        match self {
            Self::Project => None,
            Self::Task(id) => Some(id),
        }
    }
}

/// A renderer reporting what it drew.
///
/// Bounds are in world space, the same space as the layout positions.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderEvent<K> {
    /// A task or project rectangle was drawn.
    RectangleRendered {
        /// Task or project id.
        id: K,
        /// Drawn bounds.
        bounds: Rect,
    },
    /// A control decorating `linked` was drawn.
    ControlRendered {
        /// Control id.
        id: K,
        /// Decorated task or project.
        linked: K,
        /// Control kind.
        kind: ControlKind,
        /// Drawn bounds.
        bounds: Rect,
    },
    /// A rectangle moved.
    RectangleMoved {
        /// Task or project id.
        id: K,
        /// New bounds.
        bounds: Rect,
    },
    /// A control moved.
    ControlMoved {
        /// Control id.
        id: K,
        /// New bounds.
        bounds: Rect,
    },
    /// A rectangle or control was taken off screen.
    Removed {
        /// Rectangle or control id.
        id: K,
    },
}

/// Events drained by the host with [`TaskMap::drain_events`](crate::TaskMap::drain_events).
#[derive(Clone, Debug)]
pub enum TaskMapEvent<K> {
    /// New visual states after a selection or task list change.
    HierarchyApplied {
        /// State per id.
        states: HashMap<K, VisualState>,
        /// Opacity per id.
        opacity: HashMap<K, f64>,
    },
    /// New element centers after the tree changed shape.
    LayoutComputed {
        /// Center per id, project included.
        positions: HashMap<K, Point>,
    },
    /// A centering request finished, successfully or not.
    CenteringComplete,
    /// Control visibility after an overlap evaluation.
    ControlVisibilityChanged {
        /// Visibility per control id.
        visibility: HashMap<K, bool>,
    },
}

impl<K: Eq + Hash> PartialEq for TaskMapEvent<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::HierarchyApplied { states, opacity },
                Self::HierarchyApplied {
                    states: other_states,
                    opacity: other_opacity,
                },
            ) => states == other_states && opacity == other_opacity,
            (
                Self::LayoutComputed { positions },
                Self::LayoutComputed {
                    positions: other_positions,
                },
            ) => positions == other_positions,
            (Self::CenteringComplete, Self::CenteringComplete) => true,
            (
                Self::ControlVisibilityChanged { visibility },
                Self::ControlVisibilityChanged {
                    visibility: other_visibility,
                },
            ) => visibility == other_visibility,
            _ => false,
        }
    }
}
