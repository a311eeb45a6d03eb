//! Resolved template types handed from the resolver to the generator

use serde::{Deserialize, Serialize};

use crate::geometry::{Extent, Footprint, Point, Position, Primitive, Rect};
use crate::layout::types::{ItemType, RoomDimensions, ZoneKind};
use crate::spec::{AreaCategory, WorkspaceType};

/// A furniture type paired with the shape it is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSpec {
    pub item_type: ItemType,
    pub geometry: Primitive,
}

impl ItemSpec {
    pub fn new(item_type: ItemType, geometry: Primitive) -> Self {
        Self {
            item_type,
            geometry,
        }
    }

    pub fn footprint(&self) -> Footprint {
        self.geometry.footprint()
    }
}

/// An item attached to a unit at a fixed local offset
///
/// `offset.x` is lateral, `offset.z` is along the unit's facing direction and
/// `offset.y` is the base elevation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub item: ItemSpec,
    pub offset: Position,
    /// Rotation relative to the unit
    pub rotation: f64,
}

impl Companion {
    pub fn new(item: ItemSpec, lateral: f64, elevation: f64, forward: f64) -> Self {
        Self {
            item,
            offset: Position::new(lateral, elevation, forward),
            rotation: 0.0,
        }
    }

    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local footprint bounds, ignoring elevation
    pub fn local_bounds(&self) -> Rect {
        self.item
            .footprint()
            .bounds_at(Point::new(self.offset.x, self.offset.z), self.rotation)
    }
}

/// A desk with everything that goes with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kit {
    pub primary: ItemSpec,
    pub companions: Vec<Companion>,
}

impl Kit {
    /// Footprint bounds of the whole kit around the desk center, desk facing +z
    pub fn local_bounds(&self) -> Rect {
        let desk = self.primary.footprint().bounds_at(Point::origin(), 0.0);
        self.companions
            .iter()
            .fold(desk, |acc, c| acc.union(&c.local_bounds()))
    }
}

/// Concrete placement recipe for one zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Arrangement {
    /// Stations side by side along x
    Row { station: Kit },
    /// 2x2 clusters of stations facing the pod center
    Pods {
        station: Kit,
        divider: Option<ItemSpec>,
    },
    /// Seats around a round table
    Circular {
        table: ItemSpec,
        seat: ItemSpec,
        radius: f64,
        extras: Vec<Companion>,
    },
    /// Freestanding units in a two-column slot grid
    Anchored { unit: ItemSpec },
}

impl Arrangement {
    /// The item that defines the zone's unit
    pub fn primary(&self) -> &ItemSpec {
        match self {
            Arrangement::Row { station } | Arrangement::Pods { station, .. } => &station.primary,
            Arrangement::Circular { table, .. } => table,
            Arrangement::Anchored { unit } => unit,
        }
    }
}

/// A zone with its allocated rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSpec {
    pub id: String,
    pub kind: ZoneKind,
    pub arrangement: Arrangement,
    /// Arrangement units: stations, pods, seats or booths
    pub item_count: u32,
    /// Footprint of the primary item
    pub footprint: Footprint,
    pub min_spacing: f64,
    /// Min corner of the allocated rectangle in room coordinates
    pub anchor_offset: Point,
    pub extent: Extent,
}

impl ZoneSpec {
    /// Allocated rectangle in room coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.anchor_offset.x,
            self.anchor_offset.z,
            self.extent.width,
            self.extent.length,
        )
    }
}

/// Zones and room for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTemplate {
    pub workspace_type: WorkspaceType,
    /// Area category whose recipe counts were used
    pub scale: AreaCategory,
    pub room_dimensions: RoomDimensions,
    pub zones: Vec<ZoneSpec>,
}

impl LayoutTemplate {
    pub fn zone(&self, id: &str) -> Option<&ZoneSpec> {
        self.zones.iter().find(|z| z.id == id)
    }
}
