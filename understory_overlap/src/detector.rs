// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two registries and the per-control visibility resolution.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;
use understory_hierarchy::VisualState;
use understory_timing::Debouncer;

use crate::error::OverlapError;
use crate::geometry::{is_finite_rect, rects_overlap};
use crate::registry::{ControlKind, RegisteredElement};

/// Inward margin, in pixels, applied to the geometric overlap test.
pub const OVERLAP_MARGIN: f64 = 2.0;
/// Highest level at which controls of semi-transparent tasks are exempt from the overlap test.
pub const NEAR_ROOT_LEVEL: u32 = 2;
/// Trailing debounce window for coalesced evaluation.
pub const DEBOUNCE_MS: u64 = 30;
/// Upper bound on how long a continuous burst of mutations can defer evaluation.
pub const MAX_WAIT_MS: u64 = 120;

/// Tunables for [`OverlapDetector`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlapConfig {
    /// Inward margin for [`rects_overlap`].
    pub margin: f64,
    /// See [`NEAR_ROOT_LEVEL`].
    pub near_root_level: u32,
    /// See [`DEBOUNCE_MS`].
    pub debounce_ms: u64,
    /// See [`MAX_WAIT_MS`].
    pub max_wait_ms: u64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            margin: OVERLAP_MARGIN,
            near_root_level: NEAR_ROOT_LEVEL,
            debounce_ms: DEBOUNCE_MS,
            max_wait_ms: MAX_WAIT_MS,
        }
    }
}

/// Registries of content rectangles and controls with visibility resolution.
///
/// The detector also keeps the latest per-task [`VisualState`] map, applied by
/// the owner through [`OverlapDetector::apply_states`] before evaluation is
/// requested. Ids not present in that map are treated as hidden.
#[derive(Clone, Debug)]
pub struct OverlapDetector<K> {
    config: OverlapConfig,
    rectangles: HashMap<K, RegisteredElement<K>>,
    controls: HashMap<K, RegisteredElement<K>>,
    states: HashMap<K, VisualState>,
    debounce: Debouncer,
    dirty: bool,
}

impl<K> Default for OverlapDetector<K>
where
    K: Clone + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new(OverlapConfig::default())
    }
}

impl<K> OverlapDetector<K>
where
    K: Clone + Eq + Hash + Debug,
{
    /// Creates an empty detector.
    #[must_use]
    pub fn new(config: OverlapConfig) -> Self {
        Self {
            config,
            rectangles: HashMap::new(),
            controls: HashMap::new(),
            states: HashMap::new(),
            debounce: Debouncer::new(config.debounce_ms).with_max_wait(config.max_wait_ms),
            dirty: false,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &OverlapConfig {
        &self.config
    }

    /// Registers (or replaces) a content rectangle.
    pub fn register_rectangle(
        &mut self,
        id: K,
        bounds: Rect,
        level: u32,
    ) -> Result<(), OverlapError<K>> {
        let id = validate(id, bounds)?;
        self.rectangles
            .insert(id.clone(), RegisteredElement::rectangle(id, bounds, level));
        self.dirty = true;
        Ok(())
    }

    /// Registers (or replaces) a control decorating `linked`.
    pub fn register_control(
        &mut self,
        id: K,
        bounds: Rect,
        level: u32,
        linked: Option<K>,
        kind: ControlKind,
    ) -> Result<(), OverlapError<K>> {
        let id = validate(id, bounds)?;
        self.controls.insert(
            id.clone(),
            RegisteredElement::control(id, bounds, level, linked, kind),
        );
        self.dirty = true;
        Ok(())
    }

    /// Moves a registered rectangle.
    pub fn update_rectangle_bounds(&mut self, id: &K, bounds: Rect) -> Result<(), OverlapError<K>> {
        update_bounds(&mut self.rectangles, id, bounds)?;
        self.dirty = true;
        Ok(())
    }

    /// Moves a registered control.
    pub fn update_control_bounds(&mut self, id: &K, bounds: Rect) -> Result<(), OverlapError<K>> {
        update_bounds(&mut self.controls, id, bounds)?;
        self.dirty = true;
        Ok(())
    }

    /// Removes a rectangle. Returns `true` if it was registered.
    pub fn remove_rectangle(&mut self, id: &K) -> bool {
        let removed = self.rectangles.remove(id).is_some();
        self.dirty |= removed;
        removed
    }

    /// Removes a control. Returns `true` if it was registered.
    pub fn remove_control(&mut self, id: &K) -> bool {
        let removed = self.controls.remove(id).is_some();
        self.dirty |= removed;
        removed
    }

    /// Removes the rectangle `id` and every control linked to it.
    ///
    /// Returns the ids of the removed controls.
    pub fn remove_linked(&mut self, id: &K) -> Vec<K> {
        let mut removed = Vec::new();
        self.controls.retain(|cid, c| {
            let keep = c.linked.as_ref() != Some(id);
            if !keep {
                removed.push(cid.clone());
            }
            keep
        });
        let rect_removed = self.rectangles.remove(id).is_some();
        self.dirty |= rect_removed || !removed.is_empty();
        removed
    }

    /// Replaces the per-task state map used by the resolution rules.
    pub fn apply_states(&mut self, states: &HashMap<K, VisualState>) {
        self.states.clone_from(states);
        self.dirty = true;
    }

    /// Drops registry entries owned by hidden tasks.
    ///
    /// Returns the ids of the removed controls.
    pub fn prune_hidden(&mut self) -> Vec<K> {
        let states = &self.states;
        let hidden = |id: &K| states.get(id).copied().unwrap_or_default().is_hidden();
        let mut removed = Vec::new();
        self.controls.retain(|cid, c| {
            let keep = !c.linked.as_ref().is_some_and(|l| hidden(l));
            if !keep {
                removed.push(cid.clone());
            }
            keep
        });
        let before = self.rectangles.len();
        self.rectangles.retain(|rid, _| !hidden(rid));
        self.dirty |= before != self.rectangles.len() || !removed.is_empty();
        removed
    }

    /// State of a task as last applied; unknown ids are hidden.
    #[must_use]
    pub fn state_of(&self, id: &K) -> VisualState {
        self.states.get(id).copied().unwrap_or_default()
    }

    /// Looks up a registered rectangle.
    #[must_use]
    pub fn rectangle(&self, id: &K) -> Option<&RegisteredElement<K>> {
        self.rectangles.get(id)
    }

    /// Looks up a registered control.
    #[must_use]
    pub fn control(&self, id: &K) -> Option<&RegisteredElement<K>> {
        self.controls.get(id)
    }

    /// Iterates registered rectangles in arbitrary order.
    pub fn rectangles(&self) -> impl Iterator<Item = &RegisteredElement<K>> {
        self.rectangles.values()
    }

    /// Iterates registered controls in arbitrary order.
    pub fn controls(&self) -> impl Iterator<Item = &RegisteredElement<K>> {
        self.controls.values()
    }

    /// Returns `true` if anything changed since the last evaluation.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Resolves visibility for every registered control.
    ///
    /// Updates each control's `visible` flag and returns the full map. With
    /// no intervening mutation, calling this again yields the same map.
    pub fn detect_overlaps(&mut self) -> HashMap<K, bool> {
        let resolved: HashMap<K, bool> = self
            .controls
            .values()
            .map(|c| (c.id.clone(), self.resolve(c)))
            .collect();
        for (id, visible) in &resolved {
            if let Some(c) = self.controls.get_mut(id) {
                c.visible = *visible;
            }
        }
        self.dirty = false;
        tracing::trace!(
            controls = resolved.len(),
            hidden = resolved.values().filter(|v| !**v).count(),
            "overlap pass"
        );
        resolved
    }

    /// Arms the debounce so that a burst of mutations yields one pass.
    ///
    /// Returns the deadline at which [`OverlapDetector::poll`] will evaluate.
    pub fn request_evaluation(&mut self, now: u64) -> u64 {
        self.debounce.trigger(now)
    }

    /// Pending evaluation deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.debounce.deadline()
    }

    /// Runs a coalesced evaluation if one is due at `now`.
    pub fn poll(&mut self, now: u64) -> Option<HashMap<K, bool>> {
        self.debounce
            .fire_if_due(now)
            .then(|| self.detect_overlaps())
    }

    /// Empties both registries and cancels pending evaluation.
    pub fn clear(&mut self) {
        self.rectangles.clear();
        self.controls.clear();
        self.debounce.cancel();
        self.dirty = false;
    }

    /// Empties the control registry only.
    pub fn clear_controls(&mut self) {
        self.dirty |= !self.controls.is_empty();
        self.controls.clear();
    }

    fn resolve(&self, control: &RegisteredElement<K>) -> bool {
        let linked = control.linked.as_ref();
        let base_level = linked
            .and_then(|l| self.rectangles.get(l))
            .map_or(control.level, |r| r.level);

        if let Some(task) = linked {
            let decoration = !control.is_counter();
            match self.state_of(task) {
                VisualState::Hidden => return false,
                VisualState::Active if decoration => return true,
                VisualState::SemiTransparent(_)
                    if decoration && base_level <= self.config.near_root_level =>
                {
                    return true;
                }
                _ => {}
            }
        }

        let margin = self.config.margin;
        !self.rectangles.values().any(|r| {
            r.level > base_level
                && Some(&r.id) != linked
                && !self.state_of(&r.id).is_hidden()
                && rects_overlap(control.bounds, r.bounds, margin)
        })
    }
}

fn validate<K: Debug>(id: K, bounds: Rect) -> Result<K, OverlapError<K>> {
    if is_finite_rect(bounds) {
        Ok(id)
    } else {
        tracing::warn!(id = ?id, bounds = ?bounds, "rejecting element with non-finite bounds");
        Err(OverlapError::InvalidBounds { id, bounds })
    }
}

fn update_bounds<K>(
    registry: &mut HashMap<K, RegisteredElement<K>>,
    id: &K,
    bounds: Rect,
) -> Result<(), OverlapError<K>>
where
    K: Clone + Eq + Hash + Debug,
{
    let Some(entry) = registry.get_mut(id) else {
        return Err(OverlapError::Unknown(id.clone()));
    };
    if !is_finite_rect(bounds) {
        tracing::warn!(id = ?id, bounds = ?bounds, "ignoring non-finite bounds update");
        return Err(OverlapError::InvalidBounds {
            id: id.clone(),
            bounds,
        });
    }
    entry.bounds = bounds;
    Ok(())
}

#[cfg(test)]
mod tests {
    use hashbrown::HashMap;
    use kurbo::Rect;
    use understory_hierarchy::VisualState;

    use super::{OverlapDetector, OverlapError};
    use crate::ControlKind;

    fn states(pairs: &[(&'static str, VisualState)]) -> HashMap<&'static str, VisualState> {
        pairs.iter().copied().collect()
    }

    fn overlapping_pair() -> OverlapDetector<&'static str> {
        let mut det = OverlapDetector::default();
        det.register_rectangle("back", Rect::new(0.0, 0.0, 240.0, 120.0), 1)
            .unwrap();
        det.register_rectangle("front", Rect::new(180.0, 0.0, 420.0, 120.0), 3)
            .unwrap();
        det.register_control(
            "back:split",
            Rect::new(200.0, 20.0, 230.0, 50.0),
            1,
            Some("back"),
            ControlKind::Split,
        )
        .unwrap();
        det.register_control(
            "back:count",
            Rect::new(200.0, 60.0, 230.0, 90.0),
            1,
            Some("back"),
            ControlKind::Counter,
        )
        .unwrap();
        det
    }

    #[test]
    fn hidden_task_forces_invisible() {
        let mut det = overlapping_pair();
        det.apply_states(&states(&[("back", VisualState::Hidden), ("front", VisualState::Active)]));
        let vis = det.detect_overlaps();
        assert!(!vis[&"back:split"]);
        assert!(!vis[&"back:count"]);
    }

    #[test]
    fn active_decoration_is_always_visible_but_counter_is_tested() {
        let mut det = overlapping_pair();
        det.apply_states(&states(&[("back", VisualState::Active), ("front", VisualState::Active)]));
        let vis = det.detect_overlaps();
        assert!(vis[&"back:split"]);
        assert!(!vis[&"back:count"]);
    }

    #[test]
    fn semi_transparent_near_root_is_exempt() {
        let mut det = overlapping_pair();
        det.apply_states(&states(&[
            ("back", VisualState::SemiTransparent(0.7)),
            ("front", VisualState::Active),
        ]));
        assert!(det.detect_overlaps()[&"back:split"]);

        // Far from the root the same control falls through to geometry.
        det.register_rectangle("back", Rect::new(0.0, 0.0, 240.0, 120.0), 5)
            .unwrap();
        det.register_rectangle("front", Rect::new(180.0, 0.0, 420.0, 120.0), 6)
            .unwrap();
        assert!(!det.detect_overlaps()[&"back:split"]);
    }

    #[test]
    fn only_rectangles_in_front_obscure() {
        let mut det = overlapping_pair();
        det.register_rectangle("front", Rect::new(180.0, 0.0, 420.0, 120.0), 1)
            .unwrap();
        det.apply_states(&states(&[("back", VisualState::Active), ("front", VisualState::Active)]));
        assert!(det.detect_overlaps()[&"back:count"]);
    }

    #[test]
    fn hidden_rectangles_do_not_obscure() {
        let mut det = overlapping_pair();
        det.apply_states(&states(&[("back", VisualState::Active), ("front", VisualState::Hidden)]));
        assert!(det.detect_overlaps()[&"back:count"]);
    }

    #[test]
    fn nan_bounds_are_rejected_without_side_effects() {
        let mut det = overlapping_pair();
        let err = det
            .register_rectangle("bad", Rect::new(f64::NAN, 0.0, 1.0, 1.0), 9)
            .unwrap_err();
        assert!(matches!(err, OverlapError::InvalidBounds { id: "bad", .. }));
        assert!(det.rectangle(&"bad").is_none());

        let before = det.control(&"back:split").unwrap().bounds;
        assert!(
            det.update_control_bounds(&"back:split", Rect::new(0.0, f64::INFINITY, 1.0, 1.0))
                .is_err()
        );
        assert_eq!(det.control(&"back:split").unwrap().bounds, before);
        assert_eq!(
            det.update_control_bounds(&"nope", Rect::ZERO),
            Err(OverlapError::Unknown("nope"))
        );
    }

    #[test]
    fn prune_hidden_drops_owned_entries() {
        let mut det = overlapping_pair();
        det.apply_states(&states(&[("back", VisualState::Hidden), ("front", VisualState::Active)]));
        let mut removed = det.prune_hidden();
        removed.sort_unstable();
        assert_eq!(removed, ["back:count", "back:split"]);
        assert!(det.rectangle(&"back").is_none());
        assert!(det.rectangle(&"front").is_some());
    }

    #[test]
    fn debounced_poll_coalesces() {
        let mut det = overlapping_pair();
        det.apply_states(&states(&[("back", VisualState::Active), ("front", VisualState::Active)]));
        det.request_evaluation(0);
        det.request_evaluation(20);
        assert!(det.poll(40).is_none());
        assert!(det.poll(50).is_some());
        assert!(det.poll(60).is_none());
        assert!(!det.is_dirty());
    }

    #[test]
    fn remove_linked_takes_controls_with_it() {
        let mut det = overlapping_pair();
        assert_eq!(det.remove_linked(&"back").len(), 2);
        assert_eq!(det.controls().count(), 0);
        assert!(det.rectangle(&"back").is_none());
    }
}
