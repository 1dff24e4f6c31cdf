// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Centering state machine.
//!
//! ```text
//!            center_on (animated)          tick reaches end
//!   Idle ─────────────────────────▶ Centering ─────────────────▶ resting
//!    ▲  begin_split / finish_split                               (Idle or Splitting)
//!    ▼
//! Splitting
//! ```
//!
//! Only one centering runs at a time. A request that arrives while one is in
//! flight is ignored so the first target wins, unless the owner first calls
//! [`CenteringController::abort`].

use kurbo::{Rect, Vec2};

use crate::easing::{EasingFn, ease_in_out_cubic};
use crate::transform::ViewTransform;
use crate::viewport2d::Viewport2D;

/// Animation length after selecting a node.
pub const SELECT_DURATION_MS: u64 = 500;
/// Animation length after a split.
pub const SPLIT_DURATION_MS: u64 = 750;
/// Animation length after a deletion.
pub const DELETE_DURATION_MS: u64 = 300;
/// Residual offset, in view pixels, below which no correction is applied.
pub const CORRECTION_THRESHOLD: f64 = 5.0;

/// Tunables for [`CenteringController`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CenteringConfig {
    /// See [`SELECT_DURATION_MS`].
    pub select_ms: u64,
    /// See [`SPLIT_DURATION_MS`].
    pub split_ms: u64,
    /// See [`DELETE_DURATION_MS`].
    pub delete_ms: u64,
    /// See [`CORRECTION_THRESHOLD`].
    pub correction_threshold: f64,
}

impl Default for CenteringConfig {
    fn default() -> Self {
        Self {
            select_ms: SELECT_DURATION_MS,
            split_ms: SPLIT_DURATION_MS,
            delete_ms: DELETE_DURATION_MS,
            correction_threshold: CORRECTION_THRESHOLD,
        }
    }
}

impl CenteringConfig {
    /// Animation length for `context`.
    #[must_use]
    pub fn duration(&self, context: CenterContext) -> u64 {
        match context {
            CenterContext::Select => self.select_ms,
            CenterContext::Split => self.split_ms,
            CenterContext::Delete => self.delete_ms,
        }
    }
}

/// The operation that triggered a centering; selects the animation length.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CenterContext {
    /// A node was selected.
    Select,
    /// A node was split into children.
    Split,
    /// A node was deleted and focus moved.
    Delete,
}

/// How to apply a centering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CenterMode {
    /// Set the transform synchronously.
    Immediate,
    /// Ease toward the target over the context's duration.
    Animated(CenterContext),
}

/// Controller state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ControllerState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// An animated centering is in flight.
    Centering,
    /// A split is in flight; centering returns here instead of to `Idle`.
    Splitting,
}

/// Why a centering request could not compute a transform.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TransformFailure {
    /// The target has not been rendered or measured.
    #[error("centering target is missing")]
    MissingTarget,
    /// The target rectangle had a non-finite coordinate.
    #[error("centering target {0:?} is not finite")]
    NonFiniteTarget(Rect),
}

/// Result of [`CenteringController::center_on`].
///
/// `Completed` and `Failed` both mean the request is finished; `Animating`
/// finishes on a later [`CenteringController::tick`]; `Ignored` never
/// finishes because it never started.
#[derive(Clone, Debug, PartialEq)]
pub enum CenterOutcome {
    /// The transform was applied synchronously.
    Completed,
    /// No transform could be computed. The request still counts as finished.
    Failed(TransformFailure),
    /// An animation started and ends at `until`.
    Animating {
        /// Host time at which the animation completes.
        until: u64,
    },
    /// Another centering is in flight.
    Ignored,
}

impl CenterOutcome {
    /// Returns `true` if the request finished synchronously.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }
}

#[derive(Copy, Clone, Debug)]
struct Animation {
    from: ViewTransform,
    to: ViewTransform,
    start: u64,
    duration: u64,
}

/// Owns the viewport and serializes centering requests.
#[derive(Clone, Debug)]
pub struct CenteringController {
    config: CenteringConfig,
    viewport: Viewport2D,
    state: ControllerState,
    resting: ControllerState,
    animation: Option<Animation>,
    easing: EasingFn,
}

impl CenteringController {
    /// Creates an idle controller around `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport2D, config: CenteringConfig) -> Self {
        Self {
            config,
            viewport,
            state: ControllerState::Idle,
            resting: ControllerState::Idle,
            animation: None,
            easing: ease_in_out_cubic,
        }
    }

    /// Replaces the easing curve.
    #[must_use]
    pub fn with_easing(mut self, easing: EasingFn) -> Self {
        self.easing = easing;
        self
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &CenteringConfig {
        &self.config
    }

    /// The owned viewport.
    #[must_use]
    pub fn viewport(&self) -> &Viewport2D {
        &self.viewport
    }

    /// Mutable viewport access for user pan and zoom.
    pub fn viewport_mut(&mut self) -> &mut Viewport2D {
        &mut self.viewport
    }

    /// The live transform.
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        self.viewport.transform()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Returns `true` while an animated centering is in flight.
    #[must_use]
    pub fn is_centering(&self) -> bool {
        self.state == ControllerState::Centering
    }

    /// Host time at which the running animation ends.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.animation.map(|a| a.start.saturating_add(a.duration))
    }

    /// Enters the split resting state.
    pub fn begin_split(&mut self) {
        self.resting = ControllerState::Splitting;
        if self.state == ControllerState::Idle {
            self.state = ControllerState::Splitting;
        }
    }

    /// Leaves the split resting state.
    pub fn finish_split(&mut self) {
        self.resting = ControllerState::Idle;
        if self.state == ControllerState::Splitting {
            self.state = ControllerState::Idle;
        }
    }

    /// Drops the running animation where it stands.
    ///
    /// The controller returns to its resting state and the next
    /// [`CenteringController::tick`] reports nothing. Returns `true` if an
    /// animation was running.
    pub fn abort(&mut self) -> bool {
        let Some(anim) = self.animation.take() else {
            return false;
        };
        self.state = self.resting;
        tracing::debug!(to = ?anim.to.translate, "centering aborted");
        true
    }

    /// Centers the view on `target` (world space) at the current zoom.
    pub fn center_on(
        &mut self,
        target: Option<Rect>,
        mode: CenterMode,
        now: u64,
    ) -> CenterOutcome {
        if self.is_centering() {
            tracing::debug!(?target, "centering already in flight; request ignored");
            return CenterOutcome::Ignored;
        }
        let target = match validate(target) {
            Ok(target) => target,
            Err(failure) => {
                tracing::warn!(%failure, "centering skipped");
                self.state = self.resting;
                return CenterOutcome::Failed(failure);
            }
        };

        let to = ViewTransform::centering(
            target.center(),
            self.viewport.view_center(),
            self.viewport.zoom(),
        );
        let duration = match mode {
            CenterMode::Immediate => 0,
            CenterMode::Animated(context) => self.config.duration(context),
        };
        if duration == 0 {
            self.viewport.set_transform(to);
            self.state = self.resting;
            tracing::debug!(translate = ?to.translate, "centered immediately");
            return CenterOutcome::Completed;
        }

        self.animation = Some(Animation {
            from: self.viewport.transform(),
            to,
            start: now,
            duration,
        });
        self.state = ControllerState::Centering;
        tracing::debug!(?mode, duration, "centering started");
        CenterOutcome::Animating {
            until: now.saturating_add(duration),
        }
    }

    /// Advances the animation. Returns `true` exactly once, when it completes.
    pub fn tick(&mut self, now: u64) -> bool {
        let Some(anim) = self.animation else {
            return false;
        };
        let elapsed = now.saturating_sub(anim.start);
        let t = (elapsed as f64 / anim.duration as f64).min(1.0);
        let eased = (self.easing)(t);
        self.viewport.set_transform(anim.from.lerp(&anim.to, eased));
        if elapsed < anim.duration {
            return false;
        }
        self.viewport.set_transform(anim.to);
        self.animation = None;
        self.state = self.resting;
        tracing::debug!(state = ?self.state, "centering complete");
        true
    }

    /// Applies a residual pan if the measured target is off center.
    ///
    /// `measured` is the target's on-screen bounds in view coordinates.
    /// Returns the applied delta, or `None` if the residual is within
    /// [`CenteringConfig::correction_threshold`] or a centering is in flight.
    pub fn correct(&mut self, measured: Rect) -> Option<Vec2> {
        if self.is_centering() || validate(Some(measured)).is_err() {
            return None;
        }
        let residual = self.viewport.view_center() - measured.center();
        if residual.hypot() <= self.config.correction_threshold {
            return None;
        }
        self.viewport.pan_by_view(residual);
        tracing::debug!(?residual, "centering corrected");
        Some(residual)
    }
}

fn validate(target: Option<Rect>) -> Result<Rect, TransformFailure> {
    let target = target.ok_or(TransformFailure::MissingTarget)?;
    let finite = target.x0.is_finite()
        && target.y0.is_finite()
        && target.x1.is_finite()
        && target.y1.is_finite();
    if finite {
        Ok(target)
    } else {
        Err(TransformFailure::NonFiniteTarget(target))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;

    fn controller() -> CenteringController {
        CenteringController::new(
            Viewport2D::new(Rect::new(0.0, 0.0, 800.0, 600.0)),
            CenteringConfig::default(),
        )
    }

    const TARGET: Rect = Rect::new(1000.0, 1000.0, 1240.0, 1120.0);

    #[test]
    fn immediate_centers_within_a_pixel() {
        let mut c = controller();
        assert_eq!(
            c.center_on(Some(TARGET), CenterMode::Immediate, 0),
            CenterOutcome::Completed
        );
        let p = c.viewport().world_to_view_point(TARGET.center());
        assert!((p - Point::new(400.0, 300.0)).hypot() < 1.0);
        assert_eq!(c.state(), ControllerState::Idle);
    }

    #[test]
    fn animation_completes_once_and_ignores_overlap() {
        let mut c = controller();
        let out = c.center_on(Some(TARGET), CenterMode::Animated(CenterContext::Select), 100);
        assert_eq!(out, CenterOutcome::Animating { until: 600 });
        assert!(c.is_centering());
        assert_eq!(
            c.center_on(Some(Rect::new(0.0, 0.0, 1.0, 1.0)), CenterMode::Immediate, 200),
            CenterOutcome::Ignored
        );
        assert!(!c.tick(350));
        assert!(c.tick(600));
        assert!(!c.tick(700));
        assert_eq!(c.state(), ControllerState::Idle);
        let p = c.viewport().world_to_view_point(TARGET.center());
        assert!((p - Point::new(400.0, 300.0)).hypot() < 1.0);
    }

    #[test]
    fn split_is_a_sticky_resting_state() {
        let mut c = controller();
        c.begin_split();
        assert_eq!(c.state(), ControllerState::Splitting);
        c.center_on(Some(TARGET), CenterMode::Animated(CenterContext::Split), 0);
        assert_eq!(c.deadline(), Some(750));
        assert!(c.tick(750));
        assert_eq!(c.state(), ControllerState::Splitting);
        c.finish_split();
        assert_eq!(c.state(), ControllerState::Idle);
    }

    #[test]
    fn abort_frees_the_controller_for_the_next_target() {
        let mut c = controller();
        assert!(!c.abort());
        c.center_on(Some(TARGET), CenterMode::Animated(CenterContext::Select), 0);
        assert!(!c.tick(250));
        assert!(c.is_centering());
        let halfway = c.transform();

        assert!(c.abort());
        assert_eq!(c.state(), ControllerState::Idle);
        assert_eq!(c.deadline(), None);
        assert_eq!(c.transform(), halfway);
        assert!(!c.tick(500));

        let other = Rect::from_center_size((-300.0, 40.0), (320.0, 160.0));
        assert_eq!(
            c.center_on(Some(other), CenterMode::Immediate, 300),
            CenterOutcome::Completed
        );
        let p = c.viewport().world_to_view_point(other.center());
        assert!((p - Point::new(400.0, 300.0)).hypot() < 1e-6);
    }

    #[test]
    fn abort_during_a_split_rests_in_splitting() {
        let mut c = controller();
        c.begin_split();
        c.center_on(Some(TARGET), CenterMode::Animated(CenterContext::Split), 0);
        assert!(c.abort());
        assert_eq!(c.state(), ControllerState::Splitting);
    }

    #[test]
    fn failure_finishes_and_restores_state() {
        let mut c = controller();
        let before = c.transform();
        let out = c.center_on(None, CenterMode::Animated(CenterContext::Delete), 0);
        assert_eq!(out, CenterOutcome::Failed(TransformFailure::MissingTarget));
        assert!(out.is_finished());
        assert_eq!(c.state(), ControllerState::Idle);
        assert_eq!(c.transform(), before);

        let nan = Rect::new(f64::NAN, 0.0, 1.0, 1.0);
        assert!(matches!(
            c.center_on(Some(nan), CenterMode::Immediate, 0),
            CenterOutcome::Failed(TransformFailure::NonFiniteTarget(_))
        ));
    }

    #[test]
    fn correction_respects_threshold() {
        let mut c = controller();
        let near = Rect::from_center_size((403.0, 300.0), (10.0, 10.0));
        assert_eq!(c.correct(near), None);
        let delta = c
            .correct(Rect::from_center_size((420.0, 290.0), (10.0, 10.0)))
            .unwrap();
        assert_eq!(delta, kurbo::Vec2::new(-20.0, 10.0));
    }
}
