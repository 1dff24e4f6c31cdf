// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinator.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect};
use understory_hierarchy::{HierarchyCalculator, HierarchyResult, Task, TaskIndex, VisualState};
use understory_overlap::{OverlapDetector, OverlapError};
use understory_radial::{LayoutElement, LayoutError, RadialLayout};
use understory_timing::{Epoch, SettleAttempt, TimerQueue};
use understory_view2d::{
    CenterContext, CenterMode, CenterOutcome, CenteringController, ViewStore, ViewTransform,
    Viewport2D,
};

use crate::config::TaskMapConfig;
use crate::events::{Focus, RenderEvent, TaskMapEvent};
use crate::measure::RectMeasure;
use crate::session::{OperationFlags, Session};

/// Work deferred onto the timer queue.
#[derive(Clone, Debug)]
enum Deferred<K> {
    Settle { epoch: Epoch, attempt: SettleAttempt },
    Correction { epoch: Epoch, id: K },
}

/// What a pending deletion removes and where focus goes afterwards.
#[derive(Clone, Debug)]
struct Deletion<K> {
    parent: Option<K>,
    subtree: Vec<K>,
}

/// Coordinates selection, layout, control visibility and centering for one project.
///
/// The host feeds inbound operations and [`RenderEvent`]s, calls
/// [`TaskMap::tick`] whenever [`TaskMap::next_deadline`] passes, and drains
/// [`TaskMapEvent`]s to update its renderer.
///
/// Ordering guarantees:
/// - Hierarchy results reach the overlap detector before an evaluation is
///   requested for them.
/// - Every selection, layout change and centering completion schedules the
///   settle passes of [`TaskMapConfig::settle`], stamped with the render
///   epoch. Passes from a superseded epoch are dropped.
/// - Controls of tasks that are regenerating or pending deletion are always
///   reported invisible.
pub struct TaskMap<K: Clone + Eq + Hash + Debug> {
    config: TaskMapConfig,
    project: K,
    tasks: Vec<Task<K>>,
    shape: HashMap<K, Option<K>>,
    focus: Focus<K>,
    states: HashMap<K, VisualState>,
    opacity: HashMap<K, f64>,
    levels: HashMap<K, u32>,
    positions: HashMap<K, Point>,
    session: Session<K>,
    deletions: HashMap<K, Deletion<K>>,
    hierarchy: HierarchyCalculator,
    layout: RadialLayout,
    overlap: OverlapDetector<K>,
    centering: CenteringController,
    split_recentering: bool,
    timers: TimerQueue<Deferred<K>>,
    visibility: HashMap<K, bool>,
    events: Vec<TaskMapEvent<K>>,
    measure: Option<Box<dyn RectMeasure<K>>>,
    store: Option<Box<dyn ViewStore>>,
}

impl<K: Clone + Eq + Hash + Debug> Debug for TaskMap<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TaskMap")
            .field("project", &self.project)
            .field("tasks", &self.tasks.len())
            .field("focus", &self.focus)
            .field("flags", &self.session.flags())
            .field("epoch", &self.session.epoch())
            .field("centering", &self.centering.state())
            .field("pending_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

impl<K: Clone + Eq + Hash + Debug> TaskMap<K> {
    /// Creates a map for `project` with no tasks, focused on the project.
    #[must_use]
    pub fn new(project: K, viewport: Viewport2D, config: TaskMapConfig) -> Self {
        let mut map = Self {
            hierarchy: HierarchyCalculator::new(config.hierarchy),
            layout: RadialLayout::new(config.radial),
            overlap: OverlapDetector::new(config.overlap),
            centering: CenteringController::new(viewport, config.centering),
            split_recentering: false,
            config,
            project,
            tasks: Vec::new(),
            shape: HashMap::new(),
            focus: Focus::Project,
            states: HashMap::new(),
            opacity: HashMap::new(),
            levels: HashMap::new(),
            positions: HashMap::new(),
            session: Session::default(),
            deletions: HashMap::new(),
            timers: TimerQueue::new(),
            visibility: HashMap::new(),
            events: Vec::new(),
            measure: None,
            store: None,
        };
        map.relayout_or_warn();
        map
    }

    /// Attaches the measurement provider used by correction passes.
    #[must_use]
    pub fn with_measure(mut self, measure: impl RectMeasure<K> + 'static) -> Self {
        self.measure = Some(Box::new(measure));
        self
    }

    /// Attaches a view store and restores its saved transform, if any.
    #[must_use]
    pub fn with_store(mut self, store: impl ViewStore + 'static) -> Self {
        if let Some(saved) = store.load() {
            if !self.centering.viewport_mut().set_transform(saved) {
                tracing::warn!(?saved, "ignoring invalid stored view transform");
            }
        }
        self.store = Some(Box::new(store));
        self
    }

    // --- accessors ---------------------------------------------------------

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &TaskMapConfig {
        &self.config
    }

    /// Current project id.
    #[must_use]
    pub fn project(&self) -> &K {
        &self.project
    }

    /// Current task list.
    #[must_use]
    pub fn tasks(&self) -> &[Task<K>] {
        &self.tasks
    }

    /// Current focus.
    #[must_use]
    pub fn focus(&self) -> &Focus<K> {
        &self.focus
    }

    /// Visual state of `id`; unknown ids are hidden.
    #[must_use]
    pub fn state(&self, id: &K) -> VisualState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// All current visual states.
    #[must_use]
    pub fn states(&self) -> &HashMap<K, VisualState> {
        &self.states
    }

    /// All current opacities.
    #[must_use]
    pub fn opacity(&self) -> &HashMap<K, f64> {
        &self.opacity
    }

    /// Layout center of `id`.
    #[must_use]
    pub fn position(&self, id: &K) -> Option<Point> {
        self.positions.get(id).copied()
    }

    /// All layout centers.
    #[must_use]
    pub fn positions(&self) -> &HashMap<K, Point> {
        &self.positions
    }

    /// Tree depth of `id`, used as its registry level.
    #[must_use]
    pub fn level(&self, id: &K) -> Option<u32> {
        self.levels.get(id).copied()
    }

    /// World-space bounds of `id` as laid out.
    #[must_use]
    pub fn world_rect(&self, id: &K) -> Option<Rect> {
        let center = self.position(id)?;
        let size = if *id == self.project {
            understory_radial::PROJECT_SIZE
        } else {
            understory_radial::TASK_SIZE
        };
        Some(Rect::from_center_size(center, size))
    }

    /// Last published visibility per control id.
    #[must_use]
    pub fn control_visibility(&self) -> &HashMap<K, bool> {
        &self.visibility
    }

    /// The operation context.
    #[must_use]
    pub fn session(&self) -> &Session<K> {
        &self.session
    }

    /// The overlap registries.
    #[must_use]
    pub fn overlap(&self) -> &OverlapDetector<K> {
        &self.overlap
    }

    /// The centering controller.
    #[must_use]
    pub fn centering(&self) -> &CenteringController {
        &self.centering
    }

    /// The live view transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.centering.transform()
    }

    /// Viewport access for user pan and zoom.
    pub fn viewport_mut(&mut self) -> &mut Viewport2D {
        self.centering.viewport_mut()
    }

    /// Earliest host time at which [`TaskMap::tick`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        let overlap = if self.session.is_active(OperationFlags::PROCESSING_BLOCKED) {
            None
        } else {
            self.overlap.next_deadline()
        };
        [
            self.timers.next_deadline(),
            overlap,
            self.centering.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Takes all events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<TaskMapEvent<K>> {
        core::mem::take(&mut self.events)
    }

    // --- inbound operations ------------------------------------------------

    /// Focuses a task. Returns `false` if the selection was a no-op.
    ///
    /// Unknown ids and tasks pending deletion are ignored.
    pub fn select_task(&mut self, id: K, now: u64) -> bool {
        if self.session.is_deleting(&id) {
            tracing::debug!(?id, "selection of a task pending deletion ignored");
            return false;
        }
        let result = self
            .hierarchy
            .calculate_task_hierarchy(&id, &self.tasks, &self.project);
        if result.is_empty() {
            return false;
        }
        self.focus = Focus::Task(id.clone());
        self.apply_hierarchy(result, now);
        self.center(&id, CenterMode::Animated(CenterContext::Select), now);
        self.schedule_settle(now);
        true
    }

    /// Focuses a project.
    ///
    /// Selecting the current project recenters on it with an animation.
    /// Selecting a different project switches the map to it: the task list,
    /// registries, pending work, busy marks and any running animation or split
    /// are dropped, the render epoch is bumped, and the view is centered
    /// immediately followed by a correction pass.
    pub fn select_project(&mut self, project: K, now: u64) {
        self.focus = Focus::Project;
        if project == self.project {
            let result = self
                .hierarchy
                .calculate_project_hierarchy(&self.project, &self.tasks);
            self.apply_hierarchy(result, now);
            self.center(&project, CenterMode::Animated(CenterContext::Select), now);
            self.schedule_settle(now);
            return;
        }

        tracing::debug!(from = ?self.project, to = ?project, "switching project");
        self.project = project.clone();
        self.tasks.clear();
        self.shape.clear();
        self.deletions.clear();
        self.visibility.clear();
        self.overlap.clear();
        self.timers.clear();
        self.centering.abort();
        self.finish_split();
        self.session.reset();
        self.relayout_or_warn();

        let result = self.hierarchy.calculate_project_hierarchy(&project, &[]);
        self.apply_hierarchy(result, now);
        let epoch = self.session.epoch();
        if self.center(&project, CenterMode::Immediate, now) {
            self.timers.schedule_after(
                now,
                self.config.correction_delay_ms,
                Deferred::Correction { epoch, id: project },
            );
        }
        self.schedule_settle(now);
    }

    /// Replaces the task list.
    ///
    /// The layout is recomputed only when ids or parent links changed. A
    /// layout failure leaves the previous list and layout in place.
    pub fn task_list_changed(
        &mut self,
        tasks: Vec<Task<K>>,
        now: u64,
    ) -> Result<(), LayoutError<K>> {
        let shape = self.shape_signature(&tasks);
        let previous = self.shape.clone();
        if shape == self.shape {
            self.tasks = tasks;
        } else {
            let positions = self.compute_layout(&tasks)?;
            self.adopt_layout(tasks, shape, positions);
        }

        let present: HashSet<K> = self.tasks.iter().map(|t| t.id.clone()).collect();
        let gone: Vec<K> = previous
            .into_keys()
            .filter(|id| !present.contains(id))
            .collect();
        for id in &gone {
            self.forget(id);
        }
        self.session.retain(|id| present.contains(id));

        let mut recenter = None;
        if let Some(id) = self.focus.task().filter(|id| !present.contains(*id)) {
            let pending = self
                .deletions
                .values()
                .find(|d| d.subtree.contains(id))
                .map(|d| d.parent.clone());
            self.focus = match pending.clone().flatten() {
                Some(parent) if present.contains(&parent) => Focus::Task(parent),
                _ => Focus::Project,
            };
            tracing::debug!(focus = ?self.focus, "focused task left the list");
            if pending.is_some() {
                recenter = Some(self.focus_target());
            }
        }
        self.deletions
            .retain(|_, d| d.subtree.iter().any(|id| present.contains(id)));
        self.reapply_focus(now);
        if let Some(target) = recenter {
            self.center(&target, CenterMode::Animated(CenterContext::Delete), now);
        }
        self.schedule_settle(now);
        Ok(())
    }

    /// A split of `id` is about to run. Returns `false` if one already is.
    pub fn split_starting(&mut self, id: &K, now: u64) -> bool {
        if !self.session.try_enter(OperationFlags::SPLITTING) {
            tracing::debug!(?id, "split already in flight");
            return false;
        }
        self.centering.begin_split();
        self.overlap.request_evaluation(now);
        true
    }

    /// The split of `id` finished and its children are in the task list.
    ///
    /// Focuses `id` and recenters on it; the split ends when that centering
    /// completes. Centerings started for anything else in the meantime leave
    /// the split in flight. If another centering is still animating, the
    /// split ends with it.
    pub fn split_completed(&mut self, id: K, now: u64) {
        if self.session.try_enter(OperationFlags::SPLITTING) {
            self.centering.begin_split();
        }
        let result = self
            .hierarchy
            .calculate_task_hierarchy(&id, &self.tasks, &self.project);
        if result.is_empty() {
            tracing::debug!(?id, "split target is not in the task list");
            self.finish_split();
            return;
        }
        self.focus = Focus::Task(id.clone());
        self.apply_hierarchy(result, now);
        self.split_recentering = true;
        self.center(&id, CenterMode::Animated(CenterContext::Split), now);
        self.schedule_settle(now);
    }

    /// Deletion of `id` and its subtree is about to run.
    ///
    /// Their controls are hidden until [`TaskMap::delete_completed`].
    /// Returns `false` for unknown ids.
    pub fn delete_starting(&mut self, id: &K, now: u64) -> bool {
        let index = TaskIndex::new(&self.tasks, &self.project);
        let Some(task) = index.get(id) else {
            return false;
        };
        let parent = index.normalized_parent(task).cloned();
        let subtree: Vec<K> = core::iter::once(id.clone())
            .chain(index.descendants(id).into_iter().map(|t| t.id.clone()))
            .collect();
        self.session.begin_delete(subtree.iter().cloned());
        self.deletions
            .insert(id.clone(), Deletion { parent, subtree });
        self.overlap.request_evaluation(now);
        true
    }

    /// Deletion of `id` finished.
    ///
    /// Removes the subtree, relayouts, and if the focus was inside the
    /// subtree moves it to the deleted task's parent (or the project) and
    /// recenters with the deletion animation.
    pub fn delete_completed(&mut self, id: &K, now: u64) {
        let deletion = self.deletions.remove(id).unwrap_or_else(|| {
            let index = TaskIndex::new(&self.tasks, &self.project);
            Deletion {
                parent: index
                    .get(id)
                    .and_then(|t| index.normalized_parent(t).cloned()),
                subtree: core::iter::once(id.clone())
                    .chain(index.descendants(id).into_iter().map(|t| t.id.clone()))
                    .collect(),
            }
        });
        let removed: HashSet<K> = deletion.subtree.into_iter().collect();
        for gone in &removed {
            self.session.end_delete(gone);
            self.session.end_regenerate(gone);
            self.forget(gone);
        }
        let tasks: Vec<Task<K>> = self
            .tasks
            .iter()
            .filter(|t| !removed.contains(&t.id))
            .cloned()
            .collect();
        let shape = self.shape_signature(&tasks);
        if shape != self.shape {
            match self.compute_layout(&tasks) {
                Ok(positions) => self.adopt_layout(tasks, shape, positions),
                Err(error) => {
                    tracing::warn!(%error, "relayout after deletion failed");
                    self.tasks = tasks;
                }
            }
        }

        let refocus = self.focus.task().is_some_and(|f| removed.contains(f));
        if refocus {
            self.focus = match deletion.parent {
                Some(parent) if self.tasks.iter().any(|t| t.id == parent) => Focus::Task(parent),
                _ => Focus::Project,
            };
            tracing::debug!(focus = ?self.focus, "refocused after deleting focus");
        }
        self.reapply_focus(now);
        if refocus {
            let target = self.focus_target();
            self.center(&target, CenterMode::Animated(CenterContext::Delete), now);
        }
        self.schedule_settle(now);
    }

    /// Regeneration of `id`'s subtasks is about to run.
    ///
    /// Returns `false` for unknown ids.
    pub fn regenerate_starting(&mut self, id: &K, now: u64) -> bool {
        if !self.tasks.iter().any(|t| t.id == *id) {
            return false;
        }
        self.session.begin_regenerate(id.clone());
        self.overlap.request_evaluation(now);
        true
    }

    /// Regeneration of `id` finished; the new subtasks are in the task list.
    pub fn regenerate_completed(&mut self, id: &K, now: u64) {
        self.session.end_regenerate(id);
        self.reapply_focus(now);
        self.schedule_settle(now);
    }

    /// Suspends or resumes overlap processing.
    ///
    /// While suspended, settle passes that come due are skipped and the
    /// debounced evaluation waits. Resuming requests a fresh evaluation.
    pub fn set_processing_blocked(&mut self, blocked: bool, now: u64) {
        if blocked {
            self.session.try_enter(OperationFlags::PROCESSING_BLOCKED);
        } else {
            self.session.exit(OperationFlags::PROCESSING_BLOCKED);
            self.overlap.request_evaluation(now);
        }
    }

    /// Registers what a renderer drew.
    ///
    /// Invalid bounds and updates for unknown ids are logged and skipped.
    pub fn handle_render(&mut self, event: RenderEvent<K>, now: u64) {
        let result = match event {
            RenderEvent::RectangleRendered { id, bounds } => {
                let level = self.level(&id).unwrap_or(0);
                self.overlap.register_rectangle(id, bounds, level)
            }
            RenderEvent::ControlRendered {
                id,
                linked,
                kind,
                bounds,
            } => {
                let level = self.level(&linked).unwrap_or(0);
                self.overlap
                    .register_control(id, bounds, level, Some(linked), kind)
            }
            RenderEvent::RectangleMoved { id, bounds } => {
                self.overlap.update_rectangle_bounds(&id, bounds)
            }
            RenderEvent::ControlMoved { id, bounds } => {
                self.overlap.update_control_bounds(&id, bounds)
            }
            RenderEvent::Removed { id } => {
                if !self.overlap.remove_control(&id) {
                    self.overlap.remove_rectangle(&id);
                }
                self.visibility.remove(&id);
                Ok(())
            }
        };
        match result {
            Ok(()) => {}
            Err(OverlapError::Unknown(id)) => {
                tracing::debug!(?id, "render update for unregistered element");
            }
            // Already logged by the detector.
            Err(OverlapError::InvalidBounds { .. }) => return,
        }
        self.overlap.request_evaluation(now);
    }

    /// Advances animations, debounced evaluation and deferred passes to `now`.
    pub fn tick(&mut self, now: u64) {
        if self.centering.tick(now) {
            self.centering_complete(now);
        }

        let blocked = self.session.is_active(OperationFlags::PROCESSING_BLOCKED);
        if !blocked {
            if let Some(visibility) = self.overlap.poll(now) {
                self.publish_visibility(visibility, false);
            }
        }

        while let Some((_, deferred)) = self.timers.pop_due(now) {
            match deferred {
                Deferred::Settle { epoch, attempt } => {
                    if !self.session.is_current(epoch) {
                        tracing::trace!(epoch = epoch.get(), "stale settle pass dropped");
                        continue;
                    }
                    if blocked {
                        tracing::trace!(attempt = attempt.attempt, "settle pass skipped");
                        continue;
                    }
                    tracing::trace!(attempt = attempt.attempt, of = attempt.of, "settle pass");
                    let visibility = self.overlap.detect_overlaps();
                    self.publish_visibility(visibility, true);
                }
                Deferred::Correction { epoch, id } => {
                    if self.session.is_current(epoch) {
                        self.correct(&id);
                    }
                }
            }
        }
    }

    // --- internals ---------------------------------------------------------

    fn focus_target(&self) -> K {
        match &self.focus {
            Focus::Task(id) => id.clone(),
            Focus::Project => self.project.clone(),
        }
    }

    /// Drops the registry entries and published visibility owned by `id`.
    fn forget(&mut self, id: &K) {
        for control in self.overlap.remove_linked(id) {
            self.visibility.remove(&control);
        }
        self.positions.remove(id);
    }

    fn shape_signature(&self, tasks: &[Task<K>]) -> HashMap<K, Option<K>> {
        tasks
            .iter()
            .map(|t| {
                let parent = t.parent.clone().filter(|p| *p != self.project);
                (t.id.clone(), parent)
            })
            .collect()
    }

    fn compute_layout(&self, tasks: &[Task<K>]) -> Result<HashMap<K, Point>, LayoutError<K>> {
        let elements: Vec<LayoutElement<K>> =
            core::iter::once(LayoutElement::project(self.project.clone()))
                .chain(tasks.iter().map(|t| {
                    let parent = t.parent.clone().unwrap_or_else(|| self.project.clone());
                    LayoutElement::task(t.id.clone(), Some(parent))
                }))
                .collect();
        let bounds = Rect::from_origin_size(Point::ZERO, self.config.canvas);
        let placed = self.layout.distribute(&elements, bounds)?;
        Ok(placed.into_iter().map(|e| (e.id, e.position)).collect())
    }

    fn adopt_layout(
        &mut self,
        tasks: Vec<Task<K>>,
        shape: HashMap<K, Option<K>>,
        positions: HashMap<K, Point>,
    ) {
        self.tasks = tasks;
        self.shape = shape;
        self.positions = positions;
        self.levels = TaskIndex::new(&self.tasks, &self.project).depth_levels();
        self.session.bump_epoch();
        tracing::debug!(
            tasks = self.tasks.len(),
            epoch = self.session.epoch().get(),
            "layout computed"
        );
        self.events.push(TaskMapEvent::LayoutComputed {
            positions: self.positions.clone(),
        });
    }

    fn relayout_or_warn(&mut self) {
        let tasks = core::mem::take(&mut self.tasks);
        let shape = self.shape_signature(&tasks);
        match self.compute_layout(&tasks) {
            Ok(positions) => self.adopt_layout(tasks, shape, positions),
            Err(error) => {
                tracing::warn!(%error, "layout failed");
                self.tasks = tasks;
            }
        }
    }

    fn reapply_focus(&mut self, now: u64) {
        let result = match &self.focus {
            Focus::Project => self
                .hierarchy
                .calculate_project_hierarchy(&self.project, &self.tasks),
            Focus::Task(id) => {
                let result = self
                    .hierarchy
                    .calculate_task_hierarchy(id, &self.tasks, &self.project);
                if result.is_empty() {
                    self.focus = Focus::Project;
                    self.hierarchy
                        .calculate_project_hierarchy(&self.project, &self.tasks)
                } else {
                    result
                }
            }
        };
        self.apply_hierarchy(result, now);
    }

    fn apply_hierarchy(&mut self, result: HierarchyResult<K>, now: u64) {
        self.states = result.states;
        self.opacity = result.opacity;
        self.overlap.apply_states(&self.states);
        let pruned = self.overlap.prune_hidden();
        for id in &pruned {
            self.visibility.remove(id);
        }
        tracing::debug!(
            focus = ?self.focus,
            states = self.states.len(),
            pruned = pruned.len(),
            "hierarchy applied"
        );
        self.events.push(TaskMapEvent::HierarchyApplied {
            states: self.states.clone(),
            opacity: self.opacity.clone(),
        });
        self.overlap.request_evaluation(now);
    }

    /// Returns `true` if the centering finished synchronously.
    fn center(&mut self, id: &K, mode: CenterMode, now: u64) -> bool {
        let target = self.world_rect(id);
        match self.centering.center_on(target, mode, now) {
            CenterOutcome::Completed => {
                self.centering_complete(now);
                true
            }
            CenterOutcome::Failed(failure) => {
                tracing::debug!(?id, %failure, "centering failed; completing anyway");
                self.centering_complete(now);
                false
            }
            CenterOutcome::Animating { .. } | CenterOutcome::Ignored => false,
        }
    }

    fn centering_complete(&mut self, now: u64) {
        if let Some(store) = self.store.as_mut() {
            store.save(&self.centering.transform());
        }
        if self.split_recentering {
            self.finish_split();
        }
        self.events.push(TaskMapEvent::CenteringComplete);
        self.schedule_settle(now);
    }

    fn finish_split(&mut self) {
        self.split_recentering = false;
        self.session.exit(OperationFlags::SPLITTING);
        self.centering.finish_split();
    }

    fn correct(&mut self, id: &K) {
        let Some(measured) = self.measure.as_ref().and_then(|m| m.measure(id)) else {
            return;
        };
        if let Some(delta) = self.centering.correct(measured) {
            tracing::debug!(?id, ?delta, "applied centering correction");
            if let Some(store) = self.store.as_mut() {
                store.save(&self.centering.transform());
            }
        }
    }

    fn schedule_settle(&mut self, now: u64) {
        let epoch = self.session.epoch();
        self.config
            .settle
            .schedule(&mut self.timers, now, |attempt| Deferred::Settle {
                epoch,
                attempt,
            });
    }

    fn publish_visibility(&mut self, mut visibility: HashMap<K, bool>, always: bool) {
        for control in self.overlap.controls() {
            let busy = control
                .linked
                .as_ref()
                .is_some_and(|l| self.session.is_busy(l));
            if busy {
                visibility.insert(control.id.clone(), false);
            }
        }
        if !always && visibility == self.visibility {
            return;
        }
        self.visibility = visibility;
        self.events.push(TaskMapEvent::ControlVisibilityChanged {
            visibility: self.visibility.clone(),
        });
    }
}
