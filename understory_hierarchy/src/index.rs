// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Borrowed lookup structure over a flat task list.

use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

use crate::task::Task;

/// Id and children lookup over a borrowed task slice.
///
/// Built once per calculation. A task whose parent is absent or equal to the
/// project id is a first-level task. A task whose parent does not resolve is
/// an orphan: it has no tree parent and is not first-level either.
#[derive(Debug)]
pub struct TaskIndex<'a, K: Eq + Hash> {
    tasks: &'a [Task<K>],
    project: &'a K,
    by_id: HashMap<&'a K, usize>,
    children: HashMap<&'a K, Vec<usize>>,
    first_level: Vec<usize>,
}

impl<'a, K: Eq + Hash> TaskIndex<'a, K> {
    /// Indexes `tasks` under `project`.
    ///
    /// When ids repeat, the first occurrence wins.
    pub fn new(tasks: &'a [Task<K>], project: &'a K) -> Self {
        let mut by_id = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            by_id.entry(&task.id).or_insert(i);
        }
        let mut children: HashMap<&'a K, Vec<usize>> = HashMap::new();
        let mut first_level = Vec::new();
        for (i, task) in tasks.iter().enumerate() {
            match &task.parent {
                None => first_level.push(i),
                Some(p) if p == project => first_level.push(i),
                Some(p) => children.entry(p).or_default().push(i),
            }
        }
        Self {
            tasks,
            project,
            by_id,
            children,
            first_level,
        }
    }

    /// The indexed task slice.
    #[must_use]
    pub fn tasks(&self) -> &'a [Task<K>] {
        self.tasks
    }

    /// The project id.
    #[must_use]
    pub fn project(&self) -> &'a K {
        self.project
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: &K) -> Option<&'a Task<K>> {
        self.by_id.get(id).map(|&i| &self.tasks[i])
    }

    /// Returns `true` if `id` names a task in the list.
    #[must_use]
    pub fn contains(&self, id: &K) -> bool {
        self.by_id.contains_key(id)
    }

    /// Returns `true` if `task` hangs directly off the project.
    #[must_use]
    pub fn is_first_level(&self, task: &Task<K>) -> bool {
        task.parent.as_ref().is_none_or(|p| p == self.project)
    }

    /// Parent of `task` with first-level tasks folded to `None`.
    #[must_use]
    pub fn normalized_parent<'t>(&self, task: &'t Task<K>) -> Option<&'t K> {
        task.parent.as_ref().filter(|p| *p != self.project)
    }

    /// Tasks whose parent is `id`. For the project id, the first-level tasks.
    pub fn children(&self, id: &K) -> impl Iterator<Item = &'a Task<K>> + '_ {
        let slots: &[usize] = if id == self.project {
            &self.first_level
        } else {
            self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
        };
        slots.iter().map(|&i| &self.tasks[i])
    }

    /// Tasks sharing the normalized parent of `task`, excluding `task` itself.
    pub fn siblings<'s>(&'s self, task: &'s Task<K>) -> impl Iterator<Item = &'a Task<K>> + 's {
        let parent = self.normalized_parent(task);
        self.tasks
            .iter()
            .filter(move |t| t.id != task.id && self.normalized_parent(t) == parent)
    }

    /// Ancestor tasks of `id`, nearest first.
    ///
    /// The walk follows parent links while they resolve to tasks and stops at
    /// the first unresolved parent or at the first repeated id.
    #[must_use]
    pub fn ancestors(&self, id: &K) -> Vec<&'a Task<K>> {
        let mut out = Vec::new();
        let Some(start) = self.get(id) else {
            return out;
        };
        let mut seen: HashSet<&K> = HashSet::new();
        seen.insert(&start.id);
        let mut cursor = start;
        while let Some(parent_id) = cursor.parent.as_ref() {
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            if !seen.insert(&parent.id) {
                tracing::warn!("parent chain loops back on itself; cutting the cycle");
                break;
            }
            out.push(parent);
            cursor = parent;
        }
        out
    }

    /// All transitive descendants of `id` in breadth-first order.
    #[must_use]
    pub fn descendants(&self, id: &K) -> Vec<&'a Task<K>> {
        let mut out: Vec<&'a Task<K>> = Vec::new();
        let mut seen: HashSet<&K> = HashSet::new();
        seen.insert(id);
        let mut head = 0;
        out.extend(self.children(id).filter(|t| seen.insert(&t.id)));
        while head < out.len() {
            let current = out[head];
            head += 1;
            let next: Vec<_> = self
                .children(&current.id)
                .filter(|t| seen.insert(&t.id))
                .collect();
            out.extend(next);
        }
        out
    }
}

impl<K: Clone + Eq + Hash> TaskIndex<'_, K> {
    /// Tree depth per id: `0` for the project, `1` for first-level tasks.
    ///
    /// Tasks that are unreachable from the project (orphans and cycle
    /// members) are treated as first-level.
    #[must_use]
    pub fn depth_levels(&self) -> HashMap<K, u32> {
        let mut depth: HashMap<K, u32> = HashMap::with_capacity(self.tasks.len() + 1);
        depth.insert(self.project.clone(), 0);
        let mut queue: Vec<(&K, u32)> = Vec::new();
        let mut head = 0;
        let roots = self
            .first_level
            .iter()
            .map(|&i| &self.tasks[i])
            .chain(self.tasks.iter().filter(|t| {
                t.parent
                    .as_ref()
                    .is_some_and(|p| p != self.project && !self.contains(p))
            }));
        for task in roots {
            if !depth.contains_key(&task.id) {
                depth.insert(task.id.clone(), 1);
                queue.push((&task.id, 1));
            }
        }
        loop {
            while head < queue.len() {
                let (id, d) = queue[head];
                head += 1;
                for child in self.children(id) {
                    if !depth.contains_key(&child.id) {
                        depth.insert(child.id.clone(), d + 1);
                        queue.push((&child.id, d + 1));
                    }
                }
            }
            // Cycle members are never reached from a root; seed one and continue.
            let Some(stray) = self.tasks.iter().find(|t| !depth.contains_key(&t.id)) else {
                break;
            };
            depth.insert(stray.id.clone(), 1);
            queue.push((&stray.id, 1));
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::TaskIndex;
    use crate::Task;

    fn tree() -> Vec<Task<&'static str>> {
        vec![
            Task::new("a", None),
            Task::new("b", Some("p")),
            Task::new("a1", Some("a")),
            Task::new("a2", Some("a")),
            Task::new("a1x", Some("a1")),
            Task::new("orphan", Some("gone")),
        ]
    }

    #[test]
    fn first_level_includes_explicit_project_parent() {
        let tasks = tree();
        let idx = TaskIndex::new(&tasks, &"p");
        let ids: Vec<_> = idx.children(&"p").map(|t| t.id).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn ancestors_nearest_first() {
        let tasks = tree();
        let idx = TaskIndex::new(&tasks, &"p");
        let ids: Vec<_> = idx.ancestors(&"a1x").iter().map(|t| t.id).collect();
        assert_eq!(ids, ["a1", "a"]);
    }

    #[test]
    fn descendants_breadth_first() {
        let tasks = tree();
        let idx = TaskIndex::new(&tasks, &"p");
        let ids: Vec<_> = idx.descendants(&"a").iter().map(|t| t.id).collect();
        assert_eq!(ids, ["a1", "a2", "a1x"]);
    }

    #[test]
    fn depth_levels_cover_orphans_and_cycles() {
        let mut tasks = tree();
        tasks.push(Task::new("c1", Some("c2")));
        tasks.push(Task::new("c2", Some("c1")));
        let idx = TaskIndex::new(&tasks, &"p");
        let depth = idx.depth_levels();
        assert_eq!(depth[&"p"], 0);
        assert_eq!(depth[&"a"], 1);
        assert_eq!(depth[&"a1x"], 3);
        assert_eq!(depth[&"orphan"], 1);
        assert_eq!(depth[&"c1"], 1);
        assert_eq!(depth[&"c2"], 2);
        assert_eq!(depth.len(), tasks.len() + 1);
    }

    #[test]
    fn ancestor_walk_terminates_on_cycle() {
        let tasks = vec![Task::new("x", Some("y")), Task::new("y", Some("x"))];
        let idx = TaskIndex::new(&tasks, &"p");
        let ids: Vec<_> = idx.ancestors(&"x").iter().map(|t| t.id).collect();
        assert_eq!(ids, ["y"]);
    }
}
