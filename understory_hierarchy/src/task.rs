// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The task record supplied by the host.

/// A node of the task tree.
///
/// Only `id` and `parent` are structural. A task without a parent is a
/// direct child of the project.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task<K> {
    /// Unique id.
    pub id: K,
    /// Parent task id, or `None` for first-level tasks.
    pub parent: Option<K>,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
}

impl<K> Task<K> {
    /// Creates a task with empty display fields.
    pub fn new(id: K, parent: Option<K>) -> Self {
        Self {
            id,
            parent,
            name: String::new(),
            description: String::new(),
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the display description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
