//! Configuration for the layout engine
//!
//! Every size and clearance the engine uses lives here. The built-in table
//! can be overridden from TOML; each section is optional and anything left
//! out keeps its default:
//!
//! ```toml
//! default_height = 3.0
//! max_zone_units = 32
//!
//! [clearances]
//! circulation = 0.8
//!
//! [furniture]
//! desk = { shape = "box", width = 1.4, depth = 0.7, height = 0.74 }
//!
//! [rooms.small]
//! width = 7.0
//! length = 5.0
//! height = 2.7
//! ```
//!
//! `[[recipes]]` entries replace the built-in recipe of the same workspace type.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Primitive;
use crate::spec::AreaCategory;
use crate::template::{ByArea, Recipe, RecipeRegistry, RegistryError};

use super::types::{ItemType, RoomDimensions};

/// Errors that can occur when loading a layout configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid recipe table: {0}")]
    RecipeError(#[from] RegistryError),
    #[error("Invalid layout config value for {field}: {value}")]
    Invalid { field: String, value: f64 },
}

/// Distances kept free around and between furniture, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Clearances {
    /// Walkway added around every zone (half on each side)
    pub circulation: f64,
    /// Workstation spacing used for limited mobility
    pub accessible_spacing: f64,
    /// Gap between a round table and its seats
    pub seat_clearance: f64,
    /// How far a chair slides under its desk
    pub chair_tuck: f64,
    /// Inset of desk-top accessories from the desk edge
    pub edge_inset: f64,
    /// Free floor between the seating ring and a whiteboard
    pub presentation_clearance: f64,
}

impl Default for Clearances {
    fn default() -> Self {
        Self {
            circulation: 0.5,
            accessible_spacing: 0.9,
            seat_clearance: 0.15,
            chair_tuck: 0.1,
            edge_inset: 0.05,
            presentation_clearance: 1.0,
        }
    }
}

/// Shape of every furniture type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FurnitureCatalog {
    pub desk: Primitive,
    pub standing_desk: Primitive,
    pub chair: Primitive,
    pub monitor: Primitive,
    pub monitor_arm: Primitive,
    pub keyboard: Primitive,
    pub mouse: Primitive,
    pub task_lamp: Primitive,
    pub footrest: Primitive,
    pub storage: Primitive,
    pub divider: Primitive,
    pub meeting_table: Primitive,
    pub coffee_table: Primitive,
    pub lounge_chair: Primitive,
    pub whiteboard: Primitive,
    pub phone_booth: Primitive,
    pub focus_pod: Primitive,
}

fn cuboid(width: f64, depth: f64, height: f64) -> Primitive {
    Primitive::Box {
        width,
        depth,
        height,
    }
}

fn cylinder(radius: f64, height: f64) -> Primitive {
    Primitive::Cylinder { radius, height }
}

fn rounded(width: f64, depth: f64, height: f64, radius: f64) -> Primitive {
    Primitive::RoundedBox {
        width,
        depth,
        height,
        radius,
    }
}

impl Default for FurnitureCatalog {
    fn default() -> Self {
        Self {
            desk: cuboid(1.2, 0.6, 0.74),
            standing_desk: cuboid(1.2, 0.6, 1.05),
            chair: rounded(0.5, 0.5, 0.9, 0.05),
            monitor: cuboid(0.55, 0.18, 0.35),
            monitor_arm: cylinder(0.04, 0.45),
            keyboard: cuboid(0.44, 0.14, 0.03),
            mouse: rounded(0.07, 0.11, 0.04, 0.02),
            task_lamp: cylinder(0.08, 0.45),
            footrest: rounded(0.45, 0.35, 0.1, 0.02),
            storage: cuboid(0.4, 0.5, 0.6),
            divider: cuboid(1.0, 0.03, 1.2),
            meeting_table: cylinder(0.6, 0.74),
            coffee_table: cylinder(0.3, 0.45),
            lounge_chair: rounded(0.7, 0.7, 0.8, 0.1),
            whiteboard: cuboid(1.8, 0.1, 1.2),
            phone_booth: cuboid(1.0, 1.0, 2.2),
            focus_pod: cuboid(1.2, 1.2, 2.2),
        }
    }
}

impl FurnitureCatalog {
    /// Shape used for an item type
    pub fn primitive(&self, item_type: ItemType) -> Primitive {
        *self.slot(item_type)
    }

    /// Replace the shape used for an item type
    pub fn set(&mut self, item_type: ItemType, primitive: Primitive) {
        *self.slot_mut(item_type) = primitive;
    }

    fn slot(&self, item_type: ItemType) -> &Primitive {
        match item_type {
            ItemType::Desk => &self.desk,
            ItemType::StandingDesk => &self.standing_desk,
            ItemType::Chair => &self.chair,
            ItemType::Monitor => &self.monitor,
            ItemType::MonitorArm => &self.monitor_arm,
            ItemType::Keyboard => &self.keyboard,
            ItemType::Mouse => &self.mouse,
            ItemType::TaskLamp => &self.task_lamp,
            ItemType::Footrest => &self.footrest,
            ItemType::Storage => &self.storage,
            ItemType::Divider => &self.divider,
            ItemType::MeetingTable => &self.meeting_table,
            ItemType::CoffeeTable => &self.coffee_table,
            ItemType::LoungeChair => &self.lounge_chair,
            ItemType::Whiteboard => &self.whiteboard,
            ItemType::PhoneBooth => &self.phone_booth,
            ItemType::FocusPod => &self.focus_pod,
        }
    }

    fn slot_mut(&mut self, item_type: ItemType) -> &mut Primitive {
        match item_type {
            ItemType::Desk => &mut self.desk,
            ItemType::StandingDesk => &mut self.standing_desk,
            ItemType::Chair => &mut self.chair,
            ItemType::Monitor => &mut self.monitor,
            ItemType::MonitorArm => &mut self.monitor_arm,
            ItemType::Keyboard => &mut self.keyboard,
            ItemType::Mouse => &mut self.mouse,
            ItemType::TaskLamp => &mut self.task_lamp,
            ItemType::Footrest => &mut self.footrest,
            ItemType::Storage => &mut self.storage,
            ItemType::Divider => &mut self.divider,
            ItemType::MeetingTable => &mut self.meeting_table,
            ItemType::CoffeeTable => &mut self.coffee_table,
            ItemType::LoungeChair => &mut self.lounge_chair,
            ItemType::Whiteboard => &mut self.whiteboard,
            ItemType::PhoneBooth => &mut self.phone_booth,
            ItemType::FocusPod => &mut self.focus_pod,
        }
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutConfig {
    /// Ceiling height used for explicit room dimensions
    pub default_height: f64,

    /// Upper bound on the units (stations, pods, seats, booths) of one zone
    pub max_zone_units: u32,

    /// Canonical room for each area category
    pub rooms: ByArea<RoomDimensions>,

    pub clearances: Clearances,

    pub furniture: FurnitureCatalog,

    /// Zone recipes per workspace type
    pub recipes: RecipeRegistry,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_height: 2.7,
            max_zone_units: 64,
            rooms: ByArea::new(
                RoomDimensions::new(7.2, 6.0, 2.7),
                RoomDimensions::new(10.8, 8.4, 2.7),
                RoomDimensions::new(14.4, 12.0, 3.0),
            ),
            clearances: Clearances::default(),
            furniture: FurnitureCatalog::default(),
            recipes: RecipeRegistry::builtin(),
        }
    }
}

/// TOML structure for deserializing configuration overrides
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlLayoutConfig {
    default_height: Option<f64>,
    max_zone_units: Option<u32>,
    rooms: Option<TomlRooms>,
    clearances: Option<Clearances>,
    furniture: Option<FurnitureCatalog>,
    #[serde(default)]
    recipes: Vec<Recipe>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlRooms {
    small: Option<RoomDimensions>,
    medium: Option<RoomDimensions>,
    large: Option<RoomDimensions>,
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration overrides from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration overrides from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlLayoutConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(height) = parsed.default_height {
            config.default_height = height;
        }
        if let Some(max) = parsed.max_zone_units {
            config.max_zone_units = max;
        }
        if let Some(rooms) = parsed.rooms {
            config.rooms.small = rooms.small.unwrap_or(config.rooms.small);
            config.rooms.medium = rooms.medium.unwrap_or(config.rooms.medium);
            config.rooms.large = rooms.large.unwrap_or(config.rooms.large);
        }
        if let Some(clearances) = parsed.clearances {
            config.clearances = clearances;
        }
        if let Some(furniture) = parsed.furniture {
            config.furniture = furniture;
        }

        // the file's own recipes must be unique; each one replaces the built-in
        let overrides = RecipeRegistry::try_from(parsed.recipes)?;
        for recipe in Vec::<Recipe>::from(overrides) {
            config.recipes.insert(recipe)?;
        }

        config.check()?;
        Ok(config)
    }

    /// Reject sizes that would poison the geometry: every length must be a
    /// finite number, positive for furniture and rooms, non-negative for
    /// clearances and spacings.
    pub fn check(&self) -> Result<(), ConfigError> {
        positive("default_height", self.default_height)?;

        for category in AreaCategory::ALL {
            let room = self.room(category);
            let name = category.to_string();
            positive(&format!("rooms.{}.width", name), room.width)?;
            positive(&format!("rooms.{}.length", name), room.length)?;
            positive(&format!("rooms.{}.height", name), room.height)?;
        }

        let c = &self.clearances;
        non_negative("clearances.circulation", c.circulation)?;
        non_negative("clearances.accessible_spacing", c.accessible_spacing)?;
        non_negative("clearances.seat_clearance", c.seat_clearance)?;
        non_negative("clearances.chair_tuck", c.chair_tuck)?;
        non_negative("clearances.edge_inset", c.edge_inset)?;
        non_negative("clearances.presentation_clearance", c.presentation_clearance)?;

        for item_type in ItemType::ALL {
            let key = item_type.label().replace('-', "_");
            let field = |part: &str| format!("furniture.{}.{}", key, part);
            match self.primitive(item_type) {
                Primitive::Box {
                    width,
                    depth,
                    height,
                } => {
                    positive(&field("width"), width)?;
                    positive(&field("depth"), depth)?;
                    positive(&field("height"), height)?;
                }
                Primitive::Cylinder { radius, height } => {
                    positive(&field("radius"), radius)?;
                    positive(&field("height"), height)?;
                }
                Primitive::RoundedBox {
                    width,
                    depth,
                    height,
                    radius,
                } => {
                    positive(&field("width"), width)?;
                    positive(&field("depth"), depth)?;
                    positive(&field("height"), height)?;
                    non_negative(&field("radius"), radius)?;
                }
            }
        }

        for recipe in self.recipes.iter() {
            for zone in &recipe.zones {
                non_negative(
                    &format!("recipes.{}.{}.spacing", recipe.workspace_type, zone.id),
                    zone.spacing,
                )?;
            }
        }

        Ok(())
    }

    /// Serialize the full table, defaults included
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Canonical room for an area category
    pub fn room(&self, category: AreaCategory) -> RoomDimensions {
        self.rooms.get(category)
    }

    /// Shape used for an item type
    pub fn primitive(&self, item_type: ItemType) -> Primitive {
        self.furniture.primitive(item_type)
    }

    /// Set the canonical room for an area category
    pub fn with_room(mut self, category: AreaCategory, room: RoomDimensions) -> Self {
        match category {
            AreaCategory::Small => self.rooms.small = room,
            AreaCategory::Medium => self.rooms.medium = room,
            AreaCategory::Large => self.rooms.large = room,
        }
        self
    }

    /// Set the ceiling height for explicit room dimensions
    pub fn with_default_height(mut self, height: f64) -> Self {
        self.default_height = height;
        self
    }

    /// Set the clearance table
    pub fn with_clearances(mut self, clearances: Clearances) -> Self {
        self.clearances = clearances;
        self
    }

    /// Set the shape of one furniture type
    pub fn with_furniture(mut self, item_type: ItemType, primitive: Primitive) -> Self {
        self.furniture.set(item_type, primitive);
        self
    }

    /// Replace the recipe for the recipe's workspace type
    pub fn with_recipe(mut self, recipe: Recipe) -> Result<Self, ConfigError> {
        self.recipes.insert(recipe)?;
        Ok(self)
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value))
    }
}

fn invalid(field: &str, value: f64) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        value,
    }
}
