// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forest construction and ring placement.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Vec2};
use smallvec::SmallVec;
use understory_overlap::geometry::is_finite_rect;

use crate::config::RadialConfig;
use crate::element::LayoutElement;
use crate::error::LayoutError;

/// Bearing of "north" in screen coordinates (y grows downward).
const NORTH: f64 = -FRAC_PI_2;

type Children = SmallVec<[usize; 8]>;

/// How a ring's slots are laid out around its center.
#[derive(Clone, Copy, Debug)]
enum Fan {
    /// The whole circle, starting at north.
    Full,
    /// A wedge of [`RadialConfig::span`] centered on a bearing.
    Toward(f64),
}

impl Fan {
    fn angle(self, k: usize, slot: usize, span: f64) -> f64 {
        match self {
            Self::Full => RadialLayout::ring_angle(k, slot, 0.0),
            Self::Toward(bearing) => RadialLayout::fan_angle(k, slot, bearing, span),
        }
    }
}

/// Circle holding a node and all of its descendants.
///
/// Expressed in the node's own frame: the node sits at the origin and its
/// bearing points along +x.
#[derive(Clone, Copy, Debug, Default)]
struct Hull {
    center: Vec2,
    radius: f64,
}

impl Hull {
    fn enclosing(members: &[(Vec2, f64)]) -> Self {
        let mut lo = Vec2::new(f64::INFINITY, f64::INFINITY);
        let mut hi = Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &(c, r) in members {
            lo = Vec2::new(lo.x.min(c.x - r), lo.y.min(c.y - r));
            hi = Vec2::new(hi.x.max(c.x + r), hi.y.max(c.y + r));
        }
        let center = (lo + hi) / 2.0;
        let radius = members
            .iter()
            .map(|&(c, r)| (c - center).hypot() + r)
            .fold(0.0_f64, f64::max);
        Self { center, radius }
    }
}

/// Solved ring of one node's children.
#[derive(Clone, Copy, Debug, Default)]
struct Ring {
    radius: f64,
    hull: Hull,
}

/// Radial layout engine.
///
/// The children of the single root are spread on a full ring around it.
/// Deeper rings fan across a wedge centered on their parent's bearing, so a
/// subtree keeps moving away from the center instead of folding back onto
/// its ancestors.
///
/// Ring radii are solved bottom-up. [`RadialLayout::ring_radius`] (or
/// [`RadialLayout::fan_radius`] for a wedge) gives the starting point, and
/// the radius then grows until the circles enclosing each child's subtree
/// are [`RadialConfig::margin`] apart from one another and from the parent.
/// No two element rectangles in the result intersect.
#[derive(Clone, Debug, Default)]
pub struct RadialLayout {
    config: RadialConfig,
}

impl RadialLayout {
    /// Creates a layout engine.
    #[must_use]
    pub fn new(config: RadialConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &RadialConfig {
        &self.config
    }

    /// Ring radius for `k` children of footprint `child` around a parent of footprint `parent`.
    ///
    /// A lone child uses the two-child spacing term. The result never drops
    /// below [`RadialConfig::min_radius`].
    #[must_use]
    pub fn ring_radius(&self, k: usize, child: f64, parent: f64) -> f64 {
        self.radius_for_step(k, TAU / k.max(2) as f64, child, parent)
    }

    /// Like [`RadialLayout::ring_radius`], for `k` children sharing one wedge.
    ///
    /// The wedge is [`RadialConfig::span`] wide.
    #[must_use]
    pub fn fan_radius(&self, k: usize, child: f64, parent: f64) -> f64 {
        self.radius_for_step(k, self.config.span() / k.max(2) as f64, child, parent)
    }

    fn radius_for_step(&self, k: usize, step: f64, child: f64, parent: f64) -> f64 {
        let c = &self.config;
        let spacing =
            (child + c.margin) / (2.0 * (step / 2.0).sin()) * c.chord_factor * c.boost(k);
        let clearance = parent / 2.0 + child / 2.0 + c.margin;
        spacing.max(clearance).max(c.min_radius)
    }

    /// Angle in radians of child `i` in a full ring of `k`, starting at `offset` from north.
    ///
    /// Four children sit on the absolute diagonals and a lone child points
    /// due north; both ignore `offset`.
    #[must_use]
    pub fn ring_angle(k: usize, i: usize, offset: f64) -> f64 {
        match k {
            1 => NORTH,
            4 => NORTH + FRAC_PI_4 + i as f64 * FRAC_PI_2,
            _ => NORTH + offset + i as f64 * TAU / k as f64,
        }
    }

    /// Angle in radians of child `i` of `k` in a wedge of `span` centered on `bearing`.
    ///
    /// Each child takes the middle of an equal share of the wedge, so a lone
    /// child continues straight along `bearing`.
    #[must_use]
    pub fn fan_angle(k: usize, i: usize, bearing: f64, span: f64) -> f64 {
        bearing - span / 2.0 + (i as f64 + 0.5) * span / k.max(1) as f64
    }

    /// Positions every element and returns them in input order.
    ///
    /// A single root is placed at the center of `bounds`; several roots are
    /// ringed around it. Elements that no root reaches, which only happens
    /// for parent cycles, are promoted to roots in input order.
    pub fn distribute<K>(
        &self,
        elements: &[LayoutElement<K>],
        bounds: Rect,
    ) -> Result<Vec<LayoutElement<K>>, LayoutError<K>>
    where
        K: Clone + Eq + Hash + Debug,
    {
        if !is_finite_rect(bounds) {
            return Err(LayoutError::InvalidBounds(bounds));
        }
        let forest = Forest::build(elements)?;
        let mut out = elements.to_vec();
        let center = bounds.center();
        let single = match forest.roots.as_slice() {
            [root] => Some(*root),
            _ => None,
        };

        let mut rings = vec![Ring::default(); out.len()];
        for &node in forest.preorder().iter().rev() {
            let fan = if single == Some(node) {
                Fan::Full
            } else {
                Fan::Toward(0.0)
            };
            let ring = self.solve(&out, &forest.kids(node), &rings, fan, Some(node));
            rings[node] = ring;
        }

        let mut pending: Vec<(usize, Fan)> = Vec::with_capacity(out.len());
        if let Some(root) = single {
            out[root].position = center;
            pending.push((root, Fan::Full));
        } else {
            let top = self.solve(&out, &forest.roots, &rings, Fan::Full, None);
            self.place(&mut out, &forest.roots, center, top.radius, Fan::Full, &mut pending);
        }

        while let Some((node, fan)) = pending.pop() {
            let kids = forest.kids(node);
            if kids.is_empty() {
                continue;
            }
            let origin = out[node].position;
            self.place(&mut out, &kids, origin, rings[node].radius, fan, &mut pending);
        }

        tracing::debug!(
            elements = out.len(),
            roots = forest.roots.len(),
            "radial layout computed"
        );
        Ok(out)
    }

    /// Sizes the ring of `ring` around `parent` (or around an empty center).
    fn solve<K>(
        &self,
        out: &[LayoutElement<K>],
        ring: &[usize],
        rings: &[Ring],
        fan: Fan,
        parent: Option<usize>,
    ) -> Ring {
        let own = parent.map_or(0.0, |p| out[p].reach());
        if ring.is_empty() {
            return Ring {
                radius: 0.0,
                hull: Hull {
                    center: Vec2::ZERO,
                    radius: own,
                },
            };
        }
        let k = ring.len();
        let span = self.config.span();
        let margin = self.config.margin;
        let child = ring
            .iter()
            .map(|&i| out[i].footprint())
            .fold(0.0_f64, f64::max);
        let footprint = parent.map_or(0.0, |p| out[p].footprint());
        let mut radius = match fan {
            Fan::Full => self.ring_radius(k, child, footprint),
            Fan::Toward(_) => self.fan_radius(k, child, footprint),
        };

        let slots: SmallVec<[(Vec2, Vec2, f64); 8]> = ring
            .iter()
            .enumerate()
            .map(|(slot, &i)| {
                let angle = fan.angle(k, slot, span);
                let hull = rings[i].hull;
                (Vec2::from_angle(angle), rotate(hull.center, angle), hull.radius)
            })
            .collect();
        for (n, &(dir, offset, reach)) in slots.iter().enumerate() {
            if parent.is_some() {
                radius = radius.max(clear_radius(dir, offset, own + reach + margin));
            }
            for &(other_dir, other_offset, other_reach) in &slots[n + 1..] {
                radius = radius.max(clear_radius(
                    dir - other_dir,
                    offset - other_offset,
                    reach + other_reach + margin,
                ));
            }
        }

        let members: SmallVec<[(Vec2, f64); 9]> = core::iter::once((Vec2::ZERO, own))
            .chain(
                slots
                    .iter()
                    .map(|&(dir, offset, reach)| (dir * radius + offset, reach)),
            )
            .collect();
        Ring {
            radius,
            hull: Hull::enclosing(&members),
        }
    }

    fn place<K>(
        &self,
        out: &mut [LayoutElement<K>],
        ring: &[usize],
        origin: Point,
        radius: f64,
        fan: Fan,
        pending: &mut Vec<(usize, Fan)>,
    ) {
        let k = ring.len();
        let span = self.config.span();
        for (slot, &i) in ring.iter().enumerate() {
            let angle = fan.angle(k, slot, span);
            out[i].position = origin + Vec2::from_angle(angle) * radius;
            pending.push((i, Fan::Toward(angle)));
        }
    }
}

/// Smallest `r >= 0` from which `|r * dir + offset|` never drops below `gap`.
fn clear_radius(dir: Vec2, offset: Vec2, gap: f64) -> f64 {
    let a = dir.hypot2();
    if a < 1e-12 {
        return 0.0;
    }
    let b = dir.dot(offset);
    let c = offset.hypot2() - gap * gap;
    let disc = b * b - a * c;
    if disc < 0.0 {
        return 0.0;
    }
    ((disc.sqrt() - b) / a).max(0.0)
}

fn rotate(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Index-based view of the parent links.
struct Forest {
    children: Vec<Children>,
    roots: Vec<usize>,
    is_root: Vec<bool>,
}

impl Forest {
    fn build<K>(elements: &[LayoutElement<K>]) -> Result<Self, LayoutError<K>>
    where
        K: Clone + Eq + Hash + Debug,
    {
        let n = elements.len();
        let mut index: HashMap<&K, usize> = HashMap::with_capacity(n);
        for (i, e) in elements.iter().enumerate() {
            let valid = e.size.width.is_finite()
                && e.size.height.is_finite()
                && e.size.width > 0.0
                && e.size.height > 0.0;
            if !valid {
                return Err(LayoutError::InvalidSize {
                    id: e.id.clone(),
                    size: e.size,
                });
            }
            if index.insert(&e.id, i).is_some() {
                return Err(LayoutError::DuplicateId(e.id.clone()));
            }
        }

        let mut children = vec![Children::new(); n];
        let mut is_root = vec![true; n];
        for (i, e) in elements.iter().enumerate() {
            let parent = e.parent.as_ref().and_then(|p| index.get(p).copied());
            if let Some(p) = parent.filter(|&p| p != i) {
                children[p].push(i);
                is_root[i] = false;
            }
        }

        let mut roots: Vec<usize> = (0..n).filter(|&i| is_root[i]).collect();
        let mut reached = vec![false; n];
        let mut stack = Vec::new();
        for &r in &roots {
            reach(r, &children, &is_root, &mut reached, &mut stack);
        }
        for i in 0..n {
            if !reached[i] {
                tracing::warn!(id = ?elements[i].id, "parent cycle; laying out element as a root");
                is_root[i] = true;
                roots.push(i);
                reach(i, &children, &is_root, &mut reached, &mut stack);
            }
        }

        Ok(Self {
            children,
            roots,
            is_root,
        })
    }

    /// Children laid out on `node`'s ring; promoted roots are skipped.
    fn kids(&self, node: usize) -> Children {
        self.children[node]
            .iter()
            .copied()
            .filter(|&c| !self.is_root[c])
            .collect()
    }

    /// Every node, parents before their children.
    fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.children.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            order.push(n);
            stack.extend(self.kids(n).iter().rev());
        }
        order
    }
}

fn reach(
    root: usize,
    children: &[Children],
    is_root: &[bool],
    reached: &mut [bool],
    stack: &mut Vec<usize>,
) {
    reached[root] = true;
    stack.push(root);
    while let Some(n) = stack.pop() {
        for &c in &children[n] {
            if !reached[c] && !is_root[c] {
                reached[c] = true;
                stack.push(c);
            }
        }
    }
}
