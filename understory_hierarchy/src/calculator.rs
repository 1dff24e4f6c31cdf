// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection rules.

use core::fmt::Debug;
use core::hash::Hash;

use crate::index::TaskIndex;
use crate::state::{HierarchyResult, VisualState};
use crate::task::Task;

/// Opacity multiplier applied once per ancestor level.
pub const ANCESTOR_OPACITY_FACTOR: f64 = 0.7;

/// Tunables for [`HierarchyCalculator`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HierarchyConfig {
    /// Multiplier in `(0, 1)` applied to the opacity once per ancestor level.
    pub ancestor_opacity_factor: f64,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            ancestor_opacity_factor: ANCESTOR_OPACITY_FACTOR,
        }
    }
}

/// Computes [`HierarchyResult`]s for task and project selections.
#[derive(Copy, Clone, Debug, Default)]
pub struct HierarchyCalculator {
    config: HierarchyConfig,
}

impl HierarchyCalculator {
    /// Creates a calculator.
    ///
    /// A decay factor outside `(0, 1)` would break the strictly decreasing
    /// opacity of the ancestor chain; it is replaced by the default.
    #[must_use]
    pub fn new(mut config: HierarchyConfig) -> Self {
        let f = config.ancestor_opacity_factor;
        if !(f > 0.0 && f < 1.0) {
            tracing::warn!(
                factor = f,
                "ancestor opacity factor must be in (0, 1); using default"
            );
            config.ancestor_opacity_factor = ANCESTOR_OPACITY_FACTOR;
        }
        Self { config }
    }

    /// The effective configuration.
    #[must_use]
    pub fn config(&self) -> &HierarchyConfig {
        &self.config
    }

    /// States for a selected task.
    ///
    /// The result covers every task id plus `project`. If `selected` does not
    /// name a task the result is empty.
    pub fn calculate_task_hierarchy<K>(
        &self,
        selected: &K,
        tasks: &[Task<K>],
        project: &K,
    ) -> HierarchyResult<K>
    where
        K: Clone + Eq + Hash + Debug,
    {
        let index = TaskIndex::new(tasks, project);
        let mut result = HierarchyResult::default();
        let Some(task) = index.get(selected) else {
            tracing::debug!(selected = ?selected, "selection does not resolve to a task");
            return result;
        };

        result.assign(&task.id, VisualState::Active);

        let factor = self.config.ancestor_opacity_factor;
        let mut opacity = 1.0;
        for ancestor in index.ancestors(selected) {
            opacity *= factor;
            result.assign(&ancestor.id, VisualState::SemiTransparent(opacity));
        }
        result.assign(project, VisualState::SemiTransparent(opacity * factor));

        for sibling in index.siblings(task) {
            result.assign(&sibling.id, VisualState::Hidden);
        }
        for child in index.children(selected) {
            result.assign(&child.id, VisualState::Active);
        }
        for other in tasks {
            result.assign(&other.id, VisualState::Hidden);
        }

        tracing::trace!(
            selected = ?selected,
            covered = result.len(),
            "task hierarchy computed"
        );
        result
    }

    /// States for a selected project.
    ///
    /// The project and its first-level tasks are active, everything else is
    /// hidden. There is no graduated opacity at this level.
    pub fn calculate_project_hierarchy<K>(
        &self,
        project: &K,
        tasks: &[Task<K>],
    ) -> HierarchyResult<K>
    where
        K: Clone + Eq + Hash + Debug,
    {
        let index = TaskIndex::new(tasks, project);
        let mut result = HierarchyResult::default();
        result.assign(project, VisualState::Active);
        for task in tasks {
            let state = if index.is_first_level(task) {
                VisualState::Active
            } else {
                VisualState::Hidden
            };
            result.assign(&task.id, state);
        }
        result
    }
}
