//! Recipe registry: which zones each workspace type gets
//!
//! Recipes are plain data. The resolver reads them together with the
//! furniture catalog to build a [`LayoutTemplate`](super::LayoutTemplate).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::types::{ItemType, ZoneKind};
use crate::spec::{AreaCategory, WorkspaceType};

/// Errors that can occur when building a recipe registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// Two recipes target the same workspace type
    #[error("duplicate recipe for workspace type: {workspace_type}")]
    Duplicate { workspace_type: WorkspaceType },

    /// Two zones of one recipe share an id
    #[error("duplicate zone id '{zone}' in {workspace_type} recipe")]
    DuplicateZone {
        workspace_type: WorkspaceType,
        zone: String,
    },
}

/// One value per area category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByArea<T> {
    pub small: T,
    pub medium: T,
    pub large: T,
}

impl<T: Copy> ByArea<T> {
    pub fn new(small: T, medium: T, large: T) -> Self {
        Self {
            small,
            medium,
            large,
        }
    }

    /// Same value for every category
    pub fn uniform(value: T) -> Self {
        Self::new(value, value, value)
    }

    pub fn get(&self, category: AreaCategory) -> T {
        match category {
            AreaCategory::Small => self.small,
            AreaCategory::Medium => self.medium,
            AreaCategory::Large => self.large,
        }
    }
}

/// How the units of a zone are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArrangementKind {
    /// Stations side by side along x
    Row,
    /// 2x2 desk clusters, pods side by side along x
    Pods,
    /// Seats around a round table
    Circular,
    /// Freestanding units in a two-column slot grid
    Anchored,
}

/// Declarative description of one zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecipe {
    pub id: String,
    pub kind: ZoneKind,
    pub arrangement: ArrangementKind,
    /// Units per area category: stations, pods, seats or booths.
    /// A count of zero omits the zone.
    pub count: ByArea<u32>,
    /// Minimum spacing between units of the zone, in meters
    pub spacing: f64,
    /// Ignore the requested workstation count
    #[serde(default)]
    pub fixed: bool,
    /// Put dividers inside pods
    #[serde(default)]
    pub dividers: bool,
    /// Desk, table or booth type. Desk zones switch to standing desks on request.
    pub primary: ItemType,
    /// Seat type for circular zones
    #[serde(default)]
    pub seat: Option<ItemType>,
}

impl ZoneRecipe {
    fn new(id: &str, kind: ZoneKind, arrangement: ArrangementKind, primary: ItemType) -> Self {
        Self {
            id: id.to_string(),
            kind,
            arrangement,
            count: ByArea::uniform(1),
            spacing: 0.0,
            fixed: false,
            dividers: false,
            primary,
            seat: None,
        }
    }

    pub fn row(id: &str, desk: ItemType) -> Self {
        Self::new(id, ZoneKind::Workstation, ArrangementKind::Row, desk)
    }

    pub fn pods(id: &str, desk: ItemType) -> Self {
        Self::new(id, ZoneKind::Workstation, ArrangementKind::Pods, desk)
    }

    pub fn circular(id: &str, kind: ZoneKind, table: ItemType, seat: ItemType) -> Self {
        Self {
            seat: Some(seat),
            ..Self::new(id, kind, ArrangementKind::Circular, table)
        }
    }

    pub fn anchored(id: &str, kind: ZoneKind, unit: ItemType) -> Self {
        Self::new(id, kind, ArrangementKind::Anchored, unit)
    }

    pub fn with_count(mut self, small: u32, medium: u32, large: u32) -> Self {
        self.count = ByArea::new(small, medium, large);
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_dividers(mut self) -> Self {
        self.dividers = true;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }
}

/// Ordered zone list for one workspace type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub workspace_type: WorkspaceType,
    pub zones: Vec<ZoneRecipe>,
}

impl Recipe {
    pub fn new(workspace_type: WorkspaceType, zones: Vec<ZoneRecipe>) -> Self {
        Self {
            workspace_type,
            zones,
        }
    }
}

/// Registry mapping each workspace type to its recipe
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Recipe>", into = "Vec<Recipe>")]
pub struct RecipeRegistry {
    recipes: BTreeMap<WorkspaceType, Recipe>,
}

impl RecipeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The recipes the engine ships with
    pub fn builtin() -> Self {
        let recipes = builtin_recipes()
            .into_iter()
            .map(|recipe| (recipe.workspace_type, recipe))
            .collect();
        Self { recipes }
    }

    /// Register a recipe; a second recipe for the same type is an error
    pub fn register(&mut self, recipe: Recipe) -> Result<(), RegistryError> {
        if self.recipes.contains_key(&recipe.workspace_type) {
            return Err(RegistryError::Duplicate {
                workspace_type: recipe.workspace_type,
            });
        }
        check_zone_ids(&recipe)?;
        self.recipes.insert(recipe.workspace_type, recipe);
        Ok(())
    }

    /// Register a recipe, replacing any existing one for the same type.
    /// Returns the replaced recipe.
    pub fn insert(&mut self, recipe: Recipe) -> Result<Option<Recipe>, RegistryError> {
        check_zone_ids(&recipe)?;
        Ok(self.recipes.insert(recipe.workspace_type, recipe))
    }

    pub fn get(&self, workspace_type: WorkspaceType) -> Option<&Recipe> {
        self.recipes.get(&workspace_type)
    }

    pub fn contains(&self, workspace_type: WorkspaceType) -> bool {
        self.recipes.contains_key(&workspace_type)
    }

    pub fn workspace_types(&self) -> impl Iterator<Item = WorkspaceType> + '_ {
        self.recipes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> + '_ {
        self.recipes.values()
    }
}

impl TryFrom<Vec<Recipe>> for RecipeRegistry {
    type Error = RegistryError;

    fn try_from(recipes: Vec<Recipe>) -> Result<Self, Self::Error> {
        let mut registry = Self::new();
        for recipe in recipes {
            registry.register(recipe)?;
        }
        Ok(registry)
    }
}

impl From<RecipeRegistry> for Vec<Recipe> {
    fn from(registry: RecipeRegistry) -> Self {
        registry.recipes.into_values().collect()
    }
}

fn check_zone_ids(recipe: &Recipe) -> Result<(), RegistryError> {
    for (i, zone) in recipe.zones.iter().enumerate() {
        if recipe.zones[..i].iter().any(|z| z.id == zone.id) {
            return Err(RegistryError::DuplicateZone {
                workspace_type: recipe.workspace_type,
                zone: zone.id.clone(),
            });
        }
    }
    Ok(())
}

fn builtin_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new(
            WorkspaceType::Individual,
            vec![ZoneRecipe::row("workstation", ItemType::Desk)
                .with_count(1, 1, 1)
                .with_spacing(0.6)
                .fixed()],
        ),
        Recipe::new(
            WorkspaceType::Collaborative,
            vec![
                ZoneRecipe::pods("workstations", ItemType::Desk)
                    .with_count(1, 2, 3)
                    .with_spacing(0.6)
                    .with_dividers(),
                ZoneRecipe::circular(
                    "meeting",
                    ZoneKind::Meeting,
                    ItemType::MeetingTable,
                    ItemType::Chair,
                )
                .with_count(6, 8, 8)
                .with_spacing(0.1),
                ZoneRecipe::circular(
                    "breakout",
                    ZoneKind::Breakout,
                    ItemType::CoffeeTable,
                    ItemType::LoungeChair,
                )
                .with_count(0, 4, 4)
                .with_spacing(0.1),
            ],
        ),
        Recipe::new(
            WorkspaceType::Hybrid,
            vec![
                ZoneRecipe::row("hot-desks", ItemType::Desk)
                    .with_count(3, 4, 6)
                    .with_spacing(0.6),
                ZoneRecipe::anchored("focus-pods", ZoneKind::FocusPod, ItemType::FocusPod)
                    .with_count(0, 2, 4)
                    .with_spacing(0.3),
                ZoneRecipe::anchored("phone-booths", ZoneKind::PhoneBooth, ItemType::PhoneBooth)
                    .with_count(2, 2, 2)
                    .with_spacing(0.3),
                ZoneRecipe::circular(
                    "meeting",
                    ZoneKind::Meeting,
                    ItemType::MeetingTable,
                    ItemType::Chair,
                )
                .with_count(6, 8, 8)
                .with_spacing(0.1),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_workspace_type() {
        let registry = RecipeRegistry::builtin();
        let types: Vec<_> = registry.workspace_types().collect();
        assert_eq!(
            types,
            vec![
                WorkspaceType::Individual,
                WorkspaceType::Collaborative,
                WorkspaceType::Hybrid
            ]
        );
    }

    #[test]
    fn test_builtin_counts_scale_with_area() {
        let registry = RecipeRegistry::builtin();
        let hybrid = registry.get(WorkspaceType::Hybrid).expect("hybrid recipe");
        let hot_desks = &hybrid.zones[0];
        assert_eq!(hot_desks.count.get(AreaCategory::Small), 3);
        assert_eq!(hot_desks.count.get(AreaCategory::Medium), 4);
        assert_eq!(hot_desks.count.get(AreaCategory::Large), 6);
        let booths = &hybrid.zones[2];
        assert_eq!(booths.count, ByArea::uniform(2));
    }

    #[test]
    fn test_registry_duplicate_error() {
        let mut registry = RecipeRegistry::new();
        let recipe = Recipe::new(WorkspaceType::Individual, vec![]);

        registry
            .register(recipe.clone())
            .expect("First register should succeed");
        let result = registry.register(recipe);
        assert!(matches!(result, Err(RegistryError::Duplicate { .. })));
    }

    #[test]
    fn test_registry_duplicate_zone_error() {
        let mut registry = RecipeRegistry::new();
        let recipe = Recipe::new(
            WorkspaceType::Hybrid,
            vec![
                ZoneRecipe::row("desks", ItemType::Desk),
                ZoneRecipe::row("desks", ItemType::Desk),
            ],
        );
        let result = registry.register(recipe);
        assert_eq!(
            result,
            Err(RegistryError::DuplicateZone {
                workspace_type: WorkspaceType::Hybrid,
                zone: "desks".to_string()
            })
        );
    }

    #[test]
    fn test_insert_replaces() {
        let mut registry = RecipeRegistry::builtin();
        let previous = registry
            .insert(Recipe::new(WorkspaceType::Individual, vec![]))
            .expect("valid recipe");
        assert!(previous.is_some());
        assert!(registry
            .get(WorkspaceType::Individual)
            .expect("individual")
            .zones
            .is_empty());
    }

    #[test]
    fn test_insert_checks_zone_ids() {
        let mut registry = RecipeRegistry::builtin();
        let recipe = Recipe::new(
            WorkspaceType::Individual,
            vec![
                ZoneRecipe::row("workstation", ItemType::Desk),
                ZoneRecipe::row("workstation", ItemType::StandingDesk),
            ],
        );
        let result = registry.insert(recipe);
        assert!(matches!(result, Err(RegistryError::DuplicateZone { .. })));
        // the built-in recipe is still there
        assert_eq!(
            registry
                .get(WorkspaceType::Individual)
                .map(|r| r.zones.len()),
            Some(1)
        );
    }

    #[test]
    fn test_builtin_zone_ids_are_unique() {
        for recipe in builtin_recipes() {
            assert_eq!(check_zone_ids(&recipe), Ok(()));
        }
    }
}
