// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Post-layout checks over positioned elements.

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Line, Rect};
use understory_overlap::geometry::segment_intersects_rect;

use crate::element::LayoutElement;

/// A parent→child connector that passes through an unrelated element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectorCrossing<K> {
    /// Connector start.
    pub parent: K,
    /// Connector end.
    pub child: K,
    /// Element whose rectangle the connector crosses.
    pub obstacle: K,
}

/// Lists connectors drawn center to center that cross a third element.
///
/// Elements whose parent is not in `elements` have no connector.
pub fn connector_crossings<K>(elements: &[LayoutElement<K>]) -> Vec<ConnectorCrossing<K>>
where
    K: Clone + Eq + Hash,
{
    let by_id: HashMap<&K, &LayoutElement<K>> = elements.iter().map(|e| (&e.id, e)).collect();
    let mut out = Vec::new();
    for child in elements {
        let Some(parent) = child.parent.as_ref().and_then(|p| by_id.get(p)) else {
            continue;
        };
        if parent.id == child.id {
            continue;
        }
        let connector = Line::new(parent.position, child.position);
        for other in elements {
            if other.id == parent.id || other.id == child.id {
                continue;
            }
            if segment_intersects_rect(connector, other.rect()) {
                out.push(ConnectorCrossing {
                    parent: parent.id.clone(),
                    child: child.id.clone(),
                    obstacle: other.id.clone(),
                });
            }
        }
    }
    out
}

/// Union of all element rectangles, or `None` when empty.
pub fn world_bounds<K>(elements: &[LayoutElement<K>]) -> Option<Rect> {
    elements
        .iter()
        .map(LayoutElement::rect)
        .reduce(|acc, r| acc.union(r))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{ConnectorCrossing, connector_crossings, world_bounds};
    use crate::LayoutElement;

    fn at(
        id: &'static str,
        parent: Option<&'static str>,
        x: f64,
        y: f64,
    ) -> LayoutElement<&'static str> {
        let mut e = LayoutElement::new(id, parent, Size::new(20.0, 20.0));
        e.position = Point::new(x, y);
        e
    }

    #[test]
    fn detects_connector_through_bystander() {
        let els = [
            at("p", None, 0.0, 0.0),
            at("c", Some("p"), 200.0, 0.0),
            at("x", None, 100.0, 5.0),
        ];
        assert_eq!(
            connector_crossings(&els),
            [ConnectorCrossing {
                parent: "p",
                child: "c",
                obstacle: "x"
            }]
        );
    }

    #[test]
    fn bounds_union() {
        assert_eq!(world_bounds::<u8>(&[]), None);
        let els = [at("a", None, 0.0, 0.0), at("b", None, 100.0, 50.0)];
        assert_eq!(world_bounds(&els), Some(Rect::new(-10.0, -10.0, 110.0, 60.0)));
    }
}
