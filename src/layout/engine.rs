//! Placement generator
//!
//! Turns a [`LayoutTemplate`] into a [`SceneGraph`]. Generation is pure: the
//! same template always yields the same graph, item for item.
//!
//! ## Placement
//!
//! Every arrangement is first laid out in zone-local coordinates around the
//! origin by [`arrange`]. The resolver sizes zones from the same local
//! placements, so the generator only has to center the content in the zone's
//! allocated rectangle.
//!
//! - Row: station `i` of `n` sits at `(i - (n-1)/2) * pitch` along x
//! - Pods: four stations at `(dx * px/2, dz * pz/2)` facing the pod center
//! - Circular: seat `i` at `radius * (sin θ, cos θ)` with `θ = i * 2π/n`,
//!   rotated `θ + π` to face the table
//! - Anchored: two-column slot grid
//!
//! ## Key Functions
//!
//! - [`generate`]: Main entry point
//! - [`arrange`]: Zone-local placements for an arrangement
//! - [`circular_seating`]: Seat positions around a table

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::geometry::{Point, Position, Rect};
use crate::template::{Arrangement, Companion, ItemSpec, Kit, LayoutTemplate, ZoneSpec};

use super::transform::YawTransform;
use super::types::{PlacedItem, RoomNode, SceneGraph, ZoneNode};

/// An item placed relative to its zone's local origin
#[derive(Debug, Clone, PartialEq)]
pub struct LocalItem {
    pub cluster: String,
    /// Unique within the cluster
    pub label: String,
    pub item: ItemSpec,
    pub position: Position,
    pub rotation: f64,
}

impl LocalItem {
    pub fn bounds(&self) -> Rect {
        self.item
            .footprint()
            .bounds_at(self.position.floor(), self.rotation)
    }

    fn translated(&self, dx: f64, dz: f64) -> LocalItem {
        LocalItem {
            position: Position::new(self.position.x + dx, self.position.y, self.position.z + dz),
            ..self.clone()
        }
    }
}

/// Generate the scene graph for a resolved template
pub fn generate(template: &LayoutTemplate) -> SceneGraph {
    let zones = template.zones.iter().map(generate_zone).collect();
    SceneGraph {
        root: RoomNode {
            room_dimensions: template.room_dimensions,
            zones,
        },
    }
}

fn generate_zone(zone: &ZoneSpec) -> ZoneNode {
    let local = arrange(&zone.arrangement, zone.item_count, zone.min_spacing);
    let rect = zone.rect();

    // center the content in the allocated rectangle
    let (dx, dz) = match content_bounds(&local) {
        Some(content) => {
            let target = rect.center();
            let current = content.center();
            (target.x - current.x, target.z - current.z)
        }
        None => (0.0, 0.0),
    };

    let items: Vec<PlacedItem> = local
        .iter()
        .map(|item| {
            let placed = item.translated(dx, dz);
            PlacedItem {
                id: format!("{}.{}.{}", zone.id, placed.cluster, placed.label),
                item_type: placed.item.item_type,
                cluster: placed.cluster,
                position: placed.position,
                rotation: placed.rotation,
                footprint: placed.item.footprint(),
                geometry: placed.item.geometry,
                zone_id: zone.id.clone(),
            }
        })
        .collect();

    tracing::trace!(zone = %zone.id, items = items.len(), "placed zone");

    ZoneNode {
        zone_id: zone.id.clone(),
        kind: zone.kind,
        bounds: rect,
        min_spacing: zone.min_spacing,
        items,
    }
}

/// Zone-local placements for `count` units of an arrangement
pub fn arrange(arrangement: &Arrangement, count: u32, spacing: f64) -> Vec<LocalItem> {
    match arrangement {
        Arrangement::Row { station } => arrange_row(station, count, spacing),
        Arrangement::Pods { station, divider } => {
            arrange_pods(station, divider.as_ref(), count, spacing)
        }
        Arrangement::Circular {
            table,
            seat,
            radius,
            extras,
        } => arrange_circular(table, seat, *radius, extras, count),
        Arrangement::Anchored { unit } => arrange_anchored(unit, count, spacing),
    }
}

/// Smallest rectangle containing every item's footprint
pub fn content_bounds(items: &[LocalItem]) -> Option<Rect> {
    items
        .iter()
        .map(LocalItem::bounds)
        .reduce(|acc, b| acc.union(&b))
}

/// Offsets of `n` units centered on zero: `(i - (n-1)/2) * pitch`
pub fn linear_offsets(n: u32, pitch: f64) -> Vec<f64> {
    let mid = (n as f64 - 1.0) / 2.0;
    (0..n).map(|i| (i as f64 - mid) * pitch).collect()
}

/// Seat positions and rotations around a table center
///
/// Seat `i` sits at angle `θ = i * 2π/n`, at `center + radius * (sin θ, cos θ)`,
/// with rotation `θ + π` so it faces the center.
pub fn circular_seating(center: Point, n: u32, radius: f64) -> Vec<(Point, f64)> {
    (0..n)
        .map(|i| {
            let theta = i as f64 * TAU / n as f64;
            let (sin, cos) = theta.sin_cos();
            (center.offset(radius * sin, radius * cos), theta + PI)
        })
        .collect()
}

/// Distance between station centers inside a pod, `(x, z)`
///
/// Stations sit back to back across the divider: `2 * half width + t` apart
/// along x and `2 * front depth + t` apart along z.
pub fn pod_pitch(station: &Kit, thickness: f64) -> (f64, f64) {
    let bounds = station.local_bounds();
    let half_lateral = bounds.x.abs().max(bounds.right().abs());
    let forward = bounds.far();
    (2.0 * half_lateral + thickness, 2.0 * forward + thickness)
}

// ============================================
// Stations
// ============================================

/// Labels for the primary item and each companion, unique within the kit
fn kit_labels(kit: &Kit) -> Vec<String> {
    let types: Vec<_> = std::iter::once(kit.primary.item_type)
        .chain(kit.companions.iter().map(|c| c.item.item_type))
        .collect();

    types
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let total = types.iter().filter(|other| *other == t).count();
            if total > 1 {
                let nth = types[..=i].iter().filter(|other| *other == t).count();
                format!("{}-{}", t.label(), nth)
            } else {
                t.label().to_string()
            }
        })
        .collect()
}

/// Place a kit with its desk at the transform's origin
fn place_kit(kit: &Kit, cluster: &str, prefix: &str, at: YawTransform, out: &mut Vec<LocalItem>) {
    let labels = kit_labels(kit);

    out.push(LocalItem {
        cluster: cluster.to_string(),
        label: format!("{}{}", prefix, labels[0]),
        item: kit.primary,
        position: Position::new(at.origin.x, 0.0, at.origin.z),
        rotation: at.angle,
    });

    for (companion, label) in kit.companions.iter().zip(&labels[1..]) {
        out.push(place_companion(companion, cluster, &format!("{}{}", prefix, label), at));
    }
}

fn place_companion(companion: &Companion, cluster: &str, label: &str, at: YawTransform) -> LocalItem {
    let p = at.transform_point(Point::new(companion.offset.x, companion.offset.z));
    LocalItem {
        cluster: cluster.to_string(),
        label: label.to_string(),
        item: companion.item,
        position: Position::new(p.x, companion.offset.y, p.z),
        rotation: at.transform_angle(companion.rotation),
    }
}

fn arrange_row(station: &Kit, count: u32, spacing: f64) -> Vec<LocalItem> {
    let pitch = station.local_bounds().width + spacing;
    let mut items = Vec::new();
    for (i, x) in linear_offsets(count, pitch).into_iter().enumerate() {
        let cluster = format!("station-{}", i + 1);
        place_kit(
            station,
            &cluster,
            "",
            YawTransform::translation(Point::new(x, 0.0)),
            &mut items,
        );
    }
    items
}

// ============================================
// Pods
// ============================================

/// One pod centered on the origin
fn single_pod(station: &Kit, divider: Option<&ItemSpec>, cluster: &str) -> Vec<LocalItem> {
    let thickness = divider.map(|d| d.footprint().depth).unwrap_or(0.0);
    let (px, pz) = pod_pitch(station, thickness);
    let mut items = Vec::new();

    let corners = [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)];
    for (k, (dx, dz)) in corners.iter().enumerate() {
        // stations face the pod center
        let rotation = if *dz < 0.0 { 0.0 } else { PI };
        let at = YawTransform::new(rotation, Point::new(dx * px / 2.0, dz * pz / 2.0));
        place_kit(station, cluster, &format!("station-{}-", k + 1), at, &mut items);
    }

    if let Some(divider) = divider {
        let long = ItemSpec::new(
            divider.item_type,
            divider.geometry.with_width(2.0 * px - thickness),
        );
        let short = ItemSpec::new(
            divider.item_type,
            divider.geometry.with_width(2.0 * pz - thickness),
        );
        items.push(LocalItem {
            cluster: cluster.to_string(),
            label: format!("{}-1", divider.item_type.label()),
            item: long,
            position: Position::new(0.0, 0.0, 0.0),
            rotation: 0.0,
        });
        items.push(LocalItem {
            cluster: cluster.to_string(),
            label: format!("{}-2", divider.item_type.label()),
            item: short,
            position: Position::new(0.0, 0.0, 0.0),
            rotation: FRAC_PI_2,
        });
    }

    items
}

fn arrange_pods(
    station: &Kit,
    divider: Option<&ItemSpec>,
    count: u32,
    spacing: f64,
) -> Vec<LocalItem> {
    let template = single_pod(station, divider, "pod");
    let width = content_bounds(&template).map(|b| b.width).unwrap_or(0.0);
    let pitch = width + spacing;

    let mut items = Vec::new();
    for (p, x) in linear_offsets(count, pitch).into_iter().enumerate() {
        let cluster = format!("pod-{}", p + 1);
        items.extend(template.iter().map(|item| LocalItem {
            cluster: cluster.clone(),
            ..item.translated(x, 0.0)
        }));
    }
    items
}

// ============================================
// Tables and freestanding units
// ============================================

fn arrange_circular(
    table: &ItemSpec,
    seat: &ItemSpec,
    radius: f64,
    extras: &[Companion],
    count: u32,
) -> Vec<LocalItem> {
    if count == 0 {
        return Vec::new();
    }

    let mut items = vec![LocalItem {
        cluster: "table".to_string(),
        label: table.item_type.label().to_string(),
        item: *table,
        position: Position::new(0.0, 0.0, 0.0),
        rotation: 0.0,
    }];

    for (i, (p, rotation)) in circular_seating(Point::origin(), count, radius)
        .into_iter()
        .enumerate()
    {
        items.push(LocalItem {
            cluster: format!("seat-{}", i + 1),
            label: seat.item_type.label().to_string(),
            item: *seat,
            position: Position::new(p.x, 0.0, p.z),
            rotation,
        });
    }

    let table_frame = YawTransform::translation(Point::origin());
    for (i, extra) in extras.iter().enumerate() {
        let label = extra.item.item_type.label();
        let cluster = if extras.len() > 1 {
            format!("{}-{}", label, i + 1)
        } else {
            label.to_string()
        };
        items.push(place_companion(extra, &cluster, label, table_frame));
    }

    items
}

fn arrange_anchored(unit: &ItemSpec, count: u32, spacing: f64) -> Vec<LocalItem> {
    let footprint = unit.footprint();
    let pitch_x = footprint.width + spacing;
    let pitch_z = footprint.depth + spacing;
    let label = unit.item_type.label();

    (0..count)
        .map(|j| {
            let col = (j % 2) as f64;
            let row = (j / 2) as f64;
            LocalItem {
                cluster: format!("{}-{}", label, j + 1),
                label: label.to_string(),
                item: *unit,
                position: Position::new(col * pitch_x, 0.0, row * pitch_z),
                rotation: 0.0,
            }
        })
        .collect()
}
