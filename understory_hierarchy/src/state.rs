// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual states and the per-selection result map.

use core::hash::Hash;

use hashbrown::HashMap;

/// How a task should be presented.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisualState {
    /// Fully visible and interactive.
    Active,
    /// Not shown.
    #[default]
    Hidden,
    /// Shown faded with the given opacity in `(0, 1]`.
    SemiTransparent(f64),
}

impl VisualState {
    /// Opacity to render with: `1.0` when active, `0.0` when hidden.
    #[must_use]
    pub fn opacity(self) -> f64 {
        match self {
            Self::Active => 1.0,
            Self::Hidden => 0.0,
            Self::SemiTransparent(o) => o,
        }
    }

    /// Returns `true` for [`VisualState::Active`].
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` for [`VisualState::Hidden`].
    #[must_use]
    pub fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    /// Returns `true` for [`VisualState::SemiTransparent`].
    #[must_use]
    pub fn is_semi_transparent(self) -> bool {
        matches!(self, Self::SemiTransparent(_))
    }
}

/// States and opacities for every known id after a selection change.
///
/// Both maps share the same key set. An empty result means the selection did
/// not resolve and should be treated as a no-op.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyResult<K: Eq + Hash> {
    /// Visual state per id.
    pub states: HashMap<K, VisualState>,
    /// Numeric opacity per id, `0.0` for hidden ids.
    pub opacity: HashMap<K, f64>,
}

impl<K: Eq + Hash> Default for HierarchyResult<K> {
    fn default() -> Self {
        Self {
            states: HashMap::new(),
            opacity: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> HierarchyResult<K> {
    /// Returns `true` when the selection did not resolve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of ids covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// State of `id`, defaulting to hidden for unknown ids.
    #[must_use]
    pub fn state(&self, id: &K) -> VisualState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Assigns `state` to `id` unless an earlier rule already did.
    ///
    /// Returns `true` if the id was newly assigned.
    pub(crate) fn assign(&mut self, id: &K, state: VisualState) -> bool {
        if self.states.contains_key(id) {
            return false;
        }
        self.states.insert(id.clone(), state);
        self.opacity.insert(id.clone(), state.opacity());
        true
    }
}
