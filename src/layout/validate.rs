//! Clearance validator for generated scene graphs.
//!
//! Checks spacing between items of a zone and containment of every item in
//! its zone's rectangle. Problems are reported, never repaired: the graph is
//! only read.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, EPSILON};

use super::types::{PlacedItem, SceneGraph, ZoneNode};

/// Two items closer than the zone's spacing rule allows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceViolation {
    pub zone_id: String,
    pub item_a: String,
    pub item_b: String,
    /// Minimum center distance
    pub required: f64,
    /// Measured center distance
    pub actual: f64,
}

/// Edge of a zone rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Edge {
    MinX,
    MaxX,
    MinZ,
    MaxZ,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::MinX => write!(f, "min-x"),
            Edge::MaxX => write!(f, "max-x"),
            Edge::MinZ => write!(f, "min-z"),
            Edge::MaxZ => write!(f, "max-z"),
        }
    }
}

/// An item whose footprint leaves its zone's rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryViolation {
    pub zone_id: String,
    pub item: String,
    pub edge: Edge,
    /// How far past the edge the footprint reaches
    pub overflow: f64,
}

/// A clearance problem found in a scene graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Violation {
    Clearance(ClearanceViolation),
    Boundary(BoundaryViolation),
}

/// Category of violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationCategory {
    Clearance,
    Boundary,
}

impl fmt::Display for ViolationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationCategory::Clearance => write!(f, "clearance"),
            ViolationCategory::Boundary => write!(f, "boundary"),
        }
    }
}

impl Violation {
    pub fn category(&self) -> ViolationCategory {
        match self {
            Violation::Clearance(_) => ViolationCategory::Clearance,
            Violation::Boundary(_) => ViolationCategory::Boundary,
        }
    }

    pub fn zone_id(&self) -> &str {
        match self {
            Violation::Clearance(v) => &v.zone_id,
            Violation::Boundary(v) => &v.zone_id,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Clearance(v) => write!(
                f,
                "{}: \"{}\" and \"{}\" are {:.3} m apart, zone \"{}\" requires {:.3} m",
                self.category(),
                v.item_a,
                v.item_b,
                v.actual,
                v.zone_id,
                v.required
            ),
            Violation::Boundary(v) => write!(
                f,
                "{}: \"{}\" reaches {:.3} m past the {} edge of zone \"{}\"",
                self.category(),
                v.item,
                v.overflow,
                v.edge,
                v.zone_id
            ),
        }
    }
}

/// Run all clearance checks on a scene graph.
///
/// Order is deterministic: zones in graph order, within a zone the spacing
/// checks for pairs `(i, j)` with `i < j`, then the boundary checks.
pub fn validate(graph: &SceneGraph) -> Vec<Violation> {
    let mut violations = Vec::new();
    for zone in &graph.root.zones {
        check_spacing(zone, &mut violations);
        check_boundaries(zone, &mut violations);
    }
    violations
}

// ── Spacing ───────────────────────────────────────────────────────

/// Only floor-standing items of different clusters are compared; desk-top
/// accessories and the parts of one furniture unit are composed by fixed
/// offsets.
fn check_spacing(zone: &ZoneNode, violations: &mut Vec<Violation>) {
    for (i, a) in zone.items.iter().enumerate() {
        for b in &zone.items[i + 1..] {
            if !a.position.is_floor_standing()
                || !b.position.is_floor_standing()
                || a.cluster == b.cluster
            {
                continue;
            }

            let (required, actual) = required_clearance(a, b, zone.min_spacing);
            if actual + EPSILON < required {
                violations.push(Violation::Clearance(ClearanceViolation {
                    zone_id: zone.zone_id.clone(),
                    item_a: a.id.clone(),
                    item_b: b.id.clone(),
                    required,
                    actual,
                }));
            }
        }
    }
}

/// Required and actual center distance between two items.
///
/// Each item is treated as the circle around its footprint, so the result
/// does not depend on rotation or on the direction between the items.
pub fn required_clearance(a: &PlacedItem, b: &PlacedItem, min_spacing: f64) -> (f64, f64) {
    let actual = a.floor_point().distance(&b.floor_point());
    let required =
        (a.footprint.bounding_radius() + b.footprint.bounding_radius()) / 2.0 + min_spacing;
    (required, actual)
}

// ── Boundaries ────────────────────────────────────────────────────

fn check_boundaries(zone: &ZoneNode, violations: &mut Vec<Violation>) {
    for item in &zone.items {
        for (edge, overflow) in overflows(&zone.bounds, &item.bounds()) {
            violations.push(Violation::Boundary(BoundaryViolation {
                zone_id: zone.zone_id.clone(),
                item: item.id.clone(),
                edge,
                overflow,
            }));
        }
    }
}

/// Every edge of `container` that `inner` crosses, with the distance past it
fn overflows(container: &Rect, inner: &Rect) -> Vec<(Edge, f64)> {
    let candidates = [
        (Edge::MinX, container.x - inner.x),
        (Edge::MaxX, inner.right() - container.right()),
        (Edge::MinZ, container.z - inner.z),
        (Edge::MaxZ, inner.far() - container.far()),
    ];
    candidates
        .into_iter()
        .filter(|(_, overflow)| *overflow > EPSILON)
        .collect()
}
