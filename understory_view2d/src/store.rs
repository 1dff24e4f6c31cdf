// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::transform::ViewTransform;

/// Persistence collaborator for the view transform between sessions.
pub trait ViewStore {
    /// The last saved transform, if any.
    fn load(&self) -> Option<ViewTransform>;
    /// Records `transform` as the latest state.
    fn save(&mut self, transform: &ViewTransform);
}

/// In-memory [`ViewStore`] that also counts saves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryViewStore {
    saved: Option<ViewTransform>,
    saves: usize,
}

impl MemoryViewStore {
    /// Creates a store pre-seeded with `transform`.
    #[must_use]
    pub fn with(transform: ViewTransform) -> Self {
        Self {
            saved: Some(transform),
            saves: 0,
        }
    }

    /// Number of [`ViewStore::save`] calls so far.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ViewStore for MemoryViewStore {
    fn load(&self) -> Option<ViewTransform> {
        self.saved
    }

    fn save(&mut self, transform: &ViewTransform) {
        self.saved = Some(*transform);
        self.saves += 1;
    }
}
