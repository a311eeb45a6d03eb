//! Layout templates: recipes, resolution and zone packing
//!
//! A workspace spec is resolved against the recipe registry and furniture
//! catalog into a [`LayoutTemplate`]: the room, plus every zone with its
//! arrangement, unit count, spacing rule and allocated rectangle.
//!
//! # Example
//!
//! ```rust
//! use workspace_layout::template::resolve;
//! use workspace_layout::{AreaCategory, LayoutConfig, WorkspaceSpec, WorkspaceType};
//!
//! let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Medium);
//! let template = resolve(&spec, &LayoutConfig::default()).unwrap();
//! assert_eq!(template.zones.len(), 3);
//! ```

mod packing;
mod registry;
mod resolver;
mod types;

pub use packing::pack;
pub use registry::{ArrangementKind, ByArea, Recipe, RecipeRegistry, RegistryError, ZoneRecipe};
pub use resolver::{resolve, scale_for_area, station_kit, StationOptions};
pub use types::{Arrangement, Companion, ItemSpec, Kit, LayoutTemplate, ZoneSpec};
