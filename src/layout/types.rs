//! Core types for the layout engine

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::{Footprint, Point, Position, Primitive, Rect};
use crate::template::LayoutTemplate;

use super::validate::Violation;

/// Kind of furniture a placed item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    Desk,
    StandingDesk,
    Chair,
    Monitor,
    MonitorArm,
    Keyboard,
    Mouse,
    TaskLamp,
    Footrest,
    Storage,
    Divider,
    MeetingTable,
    CoffeeTable,
    LoungeChair,
    Whiteboard,
    PhoneBooth,
    FocusPod,
}

impl ItemType {
    pub const ALL: [ItemType; 17] = [
        ItemType::Desk,
        ItemType::StandingDesk,
        ItemType::Chair,
        ItemType::Monitor,
        ItemType::MonitorArm,
        ItemType::Keyboard,
        ItemType::Mouse,
        ItemType::TaskLamp,
        ItemType::Footrest,
        ItemType::Storage,
        ItemType::Divider,
        ItemType::MeetingTable,
        ItemType::CoffeeTable,
        ItemType::LoungeChair,
        ItemType::Whiteboard,
        ItemType::PhoneBooth,
        ItemType::FocusPod,
    ];

    /// Short label used in item ids
    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Desk => "desk",
            ItemType::StandingDesk => "standing-desk",
            ItemType::Chair => "chair",
            ItemType::Monitor => "monitor",
            ItemType::MonitorArm => "monitor-arm",
            ItemType::Keyboard => "keyboard",
            ItemType::Mouse => "mouse",
            ItemType::TaskLamp => "task-lamp",
            ItemType::Footrest => "footrest",
            ItemType::Storage => "storage",
            ItemType::Divider => "divider",
            ItemType::MeetingTable => "meeting-table",
            ItemType::CoffeeTable => "coffee-table",
            ItemType::LoungeChair => "lounge-chair",
            ItemType::Whiteboard => "whiteboard",
            ItemType::PhoneBooth => "phone-booth",
            ItemType::FocusPod => "focus-pod",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Functional purpose of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoneKind {
    Workstation,
    Meeting,
    Breakout,
    PhoneBooth,
    FocusPod,
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ZoneKind::Workstation => "workstation",
            ZoneKind::Meeting => "meeting",
            ZoneKind::Breakout => "breakout",
            ZoneKind::PhoneBooth => "phone-booth",
            ZoneKind::FocusPod => "focus-pod",
        };
        f.write_str(s)
    }
}

/// Room size in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl RoomDimensions {
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
        }
    }

    pub fn floor_area(&self) -> f64 {
        self.width * self.length
    }

    /// The floor as a rectangle anchored at the room origin
    pub fn floor(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.length)
    }
}

/// A furniture item with its final room-relative placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    /// Unique within the graph: `zone.cluster.label`
    pub id: String,
    pub item_type: ItemType,
    /// Furniture unit the item belongs to (station, pod, table, seat, booth)
    pub cluster: String,
    /// Center on the floor plane; `y` is the base elevation
    pub position: Position,
    /// Radians about the vertical axis
    pub rotation: f64,
    pub footprint: Footprint,
    pub geometry: Primitive,
    pub zone_id: String,
}

impl PlacedItem {
    /// Axis-aligned bounds of the rotated footprint
    pub fn bounds(&self) -> Rect {
        self.footprint.bounds_at(self.floor_point(), self.rotation)
    }

    pub fn floor_point(&self) -> Point {
        self.position.floor()
    }
}

/// A zone with its allocated rectangle and placed items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneNode {
    pub zone_id: String,
    pub kind: ZoneKind,
    /// Allocated rectangle in room coordinates
    pub bounds: Rect,
    pub min_spacing: f64,
    pub items: Vec<PlacedItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomNode {
    pub room_dimensions: RoomDimensions,
    pub zones: Vec<ZoneNode>,
}

/// Hierarchical furniture arrangement: room, zones, items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneGraph {
    pub root: RoomNode,
}

impl SceneGraph {
    /// All placed items in zone order
    pub fn items(&self) -> impl Iterator<Item = &PlacedItem> {
        self.root.zones.iter().flat_map(|z| z.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.root.zones.iter().map(|z| z.items.len()).sum()
    }

    pub fn zone(&self, zone_id: &str) -> Option<&ZoneNode> {
        self.root.zones.iter().find(|z| z.zone_id == zone_id)
    }

    pub fn find_item(&self, id: &str) -> Option<&PlacedItem> {
        self.items().find(|item| item.id == id)
    }

    /// Number of placed items of the given type
    pub fn count_of(&self, item_type: ItemType) -> usize {
        self.items().filter(|item| item.item_type == item_type).count()
    }
}

/// The result of a full layout pass
///
/// The scene graph is present even when violations were found; the caller
/// decides whether to treat them as warnings or errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub scene_graph: SceneGraph,
    pub violations: Vec<Violation>,
    pub template: LayoutTemplate,
}

impl LayoutResult {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json_compact(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }
}
