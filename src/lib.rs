//! Workspace Layout - parametric furniture layout generation
//!
//! This library turns a workspace description (type, floor area, equipment,
//! physical considerations) into a hierarchical 3D furniture arrangement and
//! a list of clearance diagnostics.
//!
//! The pipeline is a single synchronous pass:
//!
//! ```text
//! WorkspaceSpec -> resolve -> LayoutTemplate -> generate -> SceneGraph -> validate -> LayoutResult
//! ```
//!
//! # Example
//!
//! ```rust
//! use workspace_layout::{generate_layout, AreaCategory, WorkspaceSpec, WorkspaceType};
//!
//! let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Medium);
//! let result = generate_layout(&spec).unwrap();
//! assert!(result.is_clean());
//! assert_eq!(result.scene_graph.root.zones.len(), 3);
//! ```

pub mod geometry;
pub mod layout;
pub mod spec;
pub mod template;

pub use geometry::{Footprint, Point, Position, Primitive, Rect};
pub use layout::{
    ConfigError, ItemType, LayoutConfig, LayoutError, LayoutResult, PlacedItem, SceneGraph,
    Violation, ZoneKind, ZoneNode,
};
pub use spec::{
    Area, AreaCategory, Equipment, PhysicalConsideration, SpecError, WorkspaceSpec, WorkspaceType,
};
pub use template::LayoutTemplate;

/// Generate a layout with the built-in configuration
///
/// # Example
///
/// ```rust
/// use workspace_layout::{generate_layout, AreaCategory, Equipment, WorkspaceSpec, WorkspaceType};
///
/// let spec = WorkspaceSpec::new(WorkspaceType::Individual, AreaCategory::Small)
///     .with_equipment(Equipment::ExtraMonitor);
/// let result = generate_layout(&spec).unwrap();
/// assert_eq!(result.scene_graph.count_of(workspace_layout::ItemType::Monitor), 2);
/// ```
pub fn generate_layout(spec: &WorkspaceSpec) -> Result<LayoutResult, LayoutError> {
    generate_layout_with_config(spec, &LayoutConfig::default())
}

/// Generate a layout with a custom configuration table
///
/// Resolution errors are returned as-is. Clearance problems never fail the
/// call; they are listed in [`LayoutResult::violations`] next to the graph.
///
/// # Example
///
/// ```rust
/// use workspace_layout::{generate_layout_with_config, AreaCategory, LayoutConfig, WorkspaceSpec, WorkspaceType};
///
/// let config = LayoutConfig::from_str("[clearances]\ncirculation = 0.8\n").unwrap();
/// let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Large);
/// let result = generate_layout_with_config(&spec, &config).unwrap();
/// assert!(result.is_clean());
/// ```
pub fn generate_layout_with_config(
    spec: &WorkspaceSpec,
    config: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    let template = template::resolve(spec, config)?;

    let scene_graph = layout::generate(&template);

    let violations = layout::validate(&scene_graph);
    if !violations.is_empty() {
        tracing::warn!(
            count = violations.len(),
            workspace_type = %spec.workspace_type,
            "layout has clearance violations"
        );
        for violation in &violations {
            tracing::debug!(%violation, "violation");
        }
    }

    Ok(LayoutResult {
        scene_graph,
        violations,
        template,
    })
}
