//! Template resolution - turns a workspace spec into sized, packed zones

use std::f64::consts::PI;

use crate::geometry::{Extent, Point, Rect};
use crate::layout::config::LayoutConfig;
use crate::layout::engine::{arrange, content_bounds};
use crate::layout::error::LayoutError;
use crate::layout::types::{ItemType, RoomDimensions, ZoneKind};
use crate::spec::{Area, AreaCategory, Equipment, PhysicalConsideration, WorkspaceSpec};

use super::packing::pack;
use super::registry::{ArrangementKind, ZoneRecipe};
use super::types::{Arrangement, Companion, ItemSpec, Kit, LayoutTemplate, ZoneSpec};

/// Desks per pod
const POD_SIZE: u32 = 4;

/// What goes on and around each desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StationOptions {
    pub standing: bool,
    pub monitors: u32,
    pub monitor_arm: bool,
    pub keyboard: bool,
    pub mouse: bool,
    pub task_lamp: bool,
    pub footrest: bool,
    pub storage: bool,
}

impl StationOptions {
    /// Derive station contents from equipment and physical considerations
    pub fn from_spec(spec: &WorkspaceSpec) -> Self {
        let wrist = spec.has_consideration(PhysicalConsideration::WristStrain);
        Self {
            standing: spec.has_equipment(Equipment::AdjustableDesk)
                || spec.has_consideration(PhysicalConsideration::BackPain)
                || spec.has_consideration(PhysicalConsideration::PreferStanding),
            monitors: if spec.has_equipment(Equipment::ExtraMonitor) {
                2
            } else {
                1
            },
            monitor_arm: spec.has_equipment(Equipment::MonitorArm)
                || spec.has_consideration(PhysicalConsideration::NeckPain),
            keyboard: spec.has_equipment(Equipment::ErgoKeyboard) || wrist,
            mouse: spec.has_equipment(Equipment::ErgoMouse) || wrist,
            task_lamp: spec.has_equipment(Equipment::TaskLighting)
                || spec.has_consideration(PhysicalConsideration::EyeStrain),
            footrest: spec.has_equipment(Equipment::Footrest),
            storage: spec.has_equipment(Equipment::Storage),
        }
    }
}

/// Resolve a workspace spec into a packed layout template
pub fn resolve(spec: &WorkspaceSpec, config: &LayoutConfig) -> Result<LayoutTemplate, LayoutError> {
    config
        .check()
        .map_err(|e| LayoutError::invalid_spec(e.to_string()))?;
    let (room, scale) = resolve_room(spec, config)?;

    let recipe = config.recipes.get(spec.workspace_type).ok_or_else(|| {
        LayoutError::invalid_spec(format!(
            "no recipe registered for workspace type '{}'",
            spec.workspace_type
        ))
    })?;

    let options = StationOptions::from_spec(spec);
    log_unused_tags(spec, &recipe.zones);

    let mut sized = Vec::new();
    for zone in &recipe.zones {
        let count = unit_count(zone, scale, spec);
        if count == 0 {
            tracing::debug!(zone = %zone.id, "zone has no units at this scale, omitting");
            continue;
        }
        if count > config.max_zone_units {
            return Err(LayoutError::invalid_spec(format!(
                "zone '{}' asks for {} units, at most {} are supported",
                zone.id, count, config.max_zone_units
            )));
        }

        let spacing = zone_spacing(zone, spec, config)?;
        let arrangement = build_arrangement(zone, &options, spec, config)?;
        let extent = zone_extent(&arrangement, count, spacing, config);
        tracing::debug!(
            zone = %zone.id,
            units = count,
            width = extent.width,
            length = extent.length,
            "sized zone"
        );
        sized.push((zone, arrangement, count, spacing, extent));
    }

    let extents: Vec<(&str, Extent)> = sized
        .iter()
        .map(|(zone, _, _, _, extent)| (zone.id.as_str(), *extent))
        .collect();
    let anchors = pack(&extents, &room)?;

    let zones = sized
        .into_iter()
        .zip(anchors)
        .map(|((zone, arrangement, count, spacing, extent), anchor)| ZoneSpec {
            id: zone.id.clone(),
            kind: zone.kind,
            footprint: arrangement.primary().footprint(),
            arrangement,
            item_count: count,
            min_spacing: spacing,
            anchor_offset: anchor,
            extent,
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        workspace_type = %spec.workspace_type,
        scale = %scale,
        zones = zones.len(),
        "resolved template"
    );

    Ok(LayoutTemplate {
        workspace_type: spec.workspace_type,
        scale,
        room_dimensions: room,
        zones,
    })
}

/// Room dimensions and the category whose recipe counts apply
fn resolve_room(
    spec: &WorkspaceSpec,
    config: &LayoutConfig,
) -> Result<(RoomDimensions, AreaCategory), LayoutError> {
    let (room, scale) = match spec.area_category {
        Area::Category(category) => (config.room(category), category),
        Area::Explicit { width, length } => {
            check_dimension("room width", width)?;
            check_dimension("room length", length)?;
            let room = RoomDimensions::new(width, length, config.default_height);
            (room, scale_for_area(room.floor_area(), config))
        }
    };

    check_dimension("room width", room.width)?;
    check_dimension("room length", room.length)?;
    check_dimension("room height", room.height)?;
    Ok((room, scale))
}

fn check_dimension(name: &str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid_spec(format!(
            "{} must be a positive number of meters, got {}",
            name, value
        )))
    }
}

/// Largest category whose canonical floor area fits in `area`, small otherwise
pub fn scale_for_area(area: f64, config: &LayoutConfig) -> AreaCategory {
    AreaCategory::ALL
        .into_iter()
        .filter(|c| config.room(*c).floor_area() <= area)
        .last()
        .unwrap_or(AreaCategory::Small)
}

/// Number of arrangement units for a zone
fn unit_count(zone: &ZoneRecipe, scale: AreaCategory, spec: &WorkspaceSpec) -> u32 {
    let base = zone.count.get(scale);
    if zone.fixed || zone.kind != ZoneKind::Workstation {
        return base;
    }

    match (zone.arrangement, spec.requested_workstations()) {
        (ArrangementKind::Row, Some(n)) => base.max(n),
        (ArrangementKind::Pods, Some(n)) => base.max(n.div_ceil(POD_SIZE)),
        _ => base,
    }
}

fn zone_spacing(
    zone: &ZoneRecipe,
    spec: &WorkspaceSpec,
    config: &LayoutConfig,
) -> Result<f64, LayoutError> {
    if !zone.spacing.is_finite() || zone.spacing < 0.0 {
        return Err(LayoutError::invalid_spec(format!(
            "zone '{}' has invalid spacing {}",
            zone.id, zone.spacing
        )));
    }

    if zone.kind == ZoneKind::Workstation
        && spec.has_consideration(PhysicalConsideration::LimitedMobility)
    {
        Ok(zone.spacing.max(config.clearances.accessible_spacing))
    } else {
        Ok(zone.spacing)
    }
}

fn build_arrangement(
    zone: &ZoneRecipe,
    options: &StationOptions,
    spec: &WorkspaceSpec,
    config: &LayoutConfig,
) -> Result<Arrangement, LayoutError> {
    let item = |item_type: ItemType| ItemSpec::new(item_type, config.primitive(item_type));

    let arrangement = match zone.arrangement {
        ArrangementKind::Row => Arrangement::Row {
            station: station_kit(zone.primary, options, config),
        },
        ArrangementKind::Pods => Arrangement::Pods {
            station: station_kit(zone.primary, options, config),
            divider: zone.dividers.then(|| item(ItemType::Divider)),
        },
        ArrangementKind::Circular => {
            let seat_type = zone.seat.ok_or_else(|| {
                LayoutError::invalid_spec(format!(
                    "circular zone '{}' has no seat type",
                    zone.id
                ))
            })?;
            let table = item(zone.primary);
            let seat = item(seat_type);
            let radius = table.footprint().width / 2.0
                + config.clearances.seat_clearance
                + seat.footprint().depth / 2.0;

            let mut extras = Vec::new();
            if zone.kind == ZoneKind::Meeting && spec.has_equipment(Equipment::Whiteboard) {
                let board = item(ItemType::Whiteboard);
                let behind = radius
                    + seat.footprint().depth / 2.0
                    + config.clearances.presentation_clearance
                    + board.footprint().depth / 2.0;
                extras.push(Companion::new(board, 0.0, 0.0, -behind));
            }

            Arrangement::Circular {
                table,
                seat,
                radius,
                extras,
            }
        }
        ArrangementKind::Anchored => Arrangement::Anchored {
            unit: item(zone.primary),
        },
    };

    Ok(arrangement)
}

/// Desk kit with the desk at the origin facing +z
///
/// Desk-top accessories sit at desk height, everything else on the floor.
pub fn station_kit(desk_type: ItemType, options: &StationOptions, config: &LayoutConfig) -> Kit {
    let item = |item_type: ItemType| ItemSpec::new(item_type, config.primitive(item_type));
    let c = &config.clearances;

    let desk_type = if options.standing && desk_type == ItemType::Desk {
        ItemType::StandingDesk
    } else {
        desk_type
    };
    let desk = item(desk_type);
    let desk_fp = desk.footprint();
    let (half_w, half_d) = (desk_fp.width / 2.0, desk_fp.depth / 2.0);
    let top = desk.geometry.height();

    let mut companions = Vec::new();

    let chair = item(ItemType::Chair);
    let chair_forward = -(half_d + chair.footprint().depth / 2.0 - c.chair_tuck);
    companions.push(Companion::new(chair, 0.0, 0.0, chair_forward));

    // screens face the user
    let monitor = item(ItemType::Monitor);
    let mon_fp = monitor.footprint();
    let mon_forward = half_d - c.edge_inset - mon_fp.depth / 2.0;
    if options.monitors >= 2 {
        let lateral = mon_fp.width / 2.0 + c.edge_inset / 2.0;
        companions.push(Companion::new(monitor, -lateral, top, mon_forward).rotated(PI));
        companions.push(Companion::new(monitor, lateral, top, mon_forward).rotated(PI));
    } else {
        companions.push(Companion::new(monitor, 0.0, top, mon_forward).rotated(PI));
    }

    if options.monitor_arm {
        companions.push(Companion::new(
            item(ItemType::MonitorArm),
            0.0,
            top,
            half_d - c.edge_inset,
        ));
    }

    let keyboard = item(ItemType::Keyboard);
    let kb_fp = keyboard.footprint();
    let kb_forward = -half_d + c.edge_inset + kb_fp.depth / 2.0;
    if options.keyboard {
        companions.push(Companion::new(keyboard, 0.0, top, kb_forward));
    }
    if options.mouse {
        let mouse = item(ItemType::Mouse);
        let lateral = kb_fp.width / 2.0 + c.edge_inset + mouse.footprint().width / 2.0;
        companions.push(Companion::new(mouse, lateral, top, kb_forward));
    }

    if options.task_lamp {
        let lamp = item(ItemType::TaskLamp);
        let r = lamp.footprint().width / 2.0;
        companions.push(Companion::new(
            lamp,
            -(half_w - c.edge_inset - r),
            top,
            -half_d + c.edge_inset + r,
        ));
    }

    let storage = item(ItemType::Storage);
    let storage_fp = storage.footprint();
    if options.footrest {
        let footrest = item(ItemType::Footrest);
        // shifted aside when the pedestal takes the right side
        let lateral = if options.storage {
            -storage_fp.width / 2.0
        } else {
            0.0
        };
        let forward = -half_d + c.edge_inset + footrest.footprint().depth / 2.0;
        companions.push(Companion::new(footrest, lateral, 0.0, forward));
    }
    if options.storage {
        companions.push(Companion::new(
            storage,
            half_w - c.edge_inset - storage_fp.width / 2.0,
            0.0,
            half_d - c.edge_inset - storage_fp.depth / 2.0,
        ));
    }

    Kit {
        primary: desk,
        companions,
    }
}

/// Allocated extent: content bounds plus half the circulation on every side
fn zone_extent(arrangement: &Arrangement, count: u32, spacing: f64, config: &LayoutConfig) -> Extent {
    let content = content_bounds(&arrange(arrangement, count, spacing))
        .unwrap_or_else(|| Rect::centered(Point::origin(), 0.0, 0.0));
    let allocated = content.inflate(config.clearances.circulation / 2.0);
    Extent::new(allocated.width, allocated.length)
}

fn log_unused_tags(spec: &WorkspaceSpec, zones: &[ZoneRecipe]) {
    if spec.has_equipment(Equipment::Whiteboard)
        && !zones.iter().any(|z| z.kind == ZoneKind::Meeting)
    {
        tracing::debug!(workspace_type = %spec.workspace_type, "no meeting zone, ignoring whiteboard");
    }

    if let Some(n) = spec.requested_workstations() {
        let scalable = zones
            .iter()
            .any(|z| z.kind == ZoneKind::Workstation && !z.fixed);
        if !scalable {
            tracing::debug!(
                workspace_type = %spec.workspace_type,
                requested = n,
                "workstation count is fixed, ignoring request"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::WorkspaceType;

    fn resolve_default(spec: &WorkspaceSpec) -> Result<LayoutTemplate, LayoutError> {
        resolve(spec, &LayoutConfig::default())
    }

    #[test]
    fn test_individual_has_one_station() {
        let spec = WorkspaceSpec::new(WorkspaceType::Individual, AreaCategory::Medium);
        let template = resolve_default(&spec).expect("resolves");
        assert_eq!(template.zones.len(), 1);
        assert_eq!(template.zones[0].item_count, 1);
        assert_eq!(template.zones[0].kind, ZoneKind::Workstation);
        assert_eq!(template.room_dimensions, RoomDimensions::new(10.8, 8.4, 2.7));
    }

    #[test]
    fn test_individual_ignores_workstation_request() {
        let spec = WorkspaceSpec::new(WorkspaceType::Individual, AreaCategory::Small)
            .with_equipment(Equipment::Workstations(5));
        let template = resolve_default(&spec).expect("resolves");
        assert_eq!(template.zones[0].item_count, 1);
    }

    #[test]
    fn test_collaborative_pods_scale_with_area() {
        for (category, pods) in [
            (AreaCategory::Small, 1),
            (AreaCategory::Medium, 2),
            (AreaCategory::Large, 3),
        ] {
            let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, category);
            let template = resolve_default(&spec).expect("resolves");
            let zone = template.zone("workstations").expect("workstations");
            assert_eq!(zone.item_count, pods, "{}", category);
        }
    }

    #[test]
    fn test_breakout_omitted_when_small() {
        let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Small);
        let template = resolve_default(&spec).expect("resolves");
        assert!(template.zone("breakout").is_none());
        assert!(template.zone("meeting").is_some());
    }

    #[test]
    fn test_hybrid_zone_counts() {
        let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Large);
        let template = resolve_default(&spec).expect("resolves");
        assert_eq!(template.zone("hot-desks").map(|z| z.item_count), Some(6));
        assert_eq!(template.zone("focus-pods").map(|z| z.item_count), Some(4));
        assert_eq!(template.zone("phone-booths").map(|z| z.item_count), Some(2));
        assert_eq!(template.zone("meeting").map(|z| z.item_count), Some(8));
    }

    #[test]
    fn test_workstation_request_raises_row_count() {
        let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Medium)
            .with_equipment(Equipment::Workstations(5));
        let template = resolve_default(&spec).expect("resolves");
        assert_eq!(template.zone("hot-desks").map(|z| z.item_count), Some(5));
    }

    #[test]
    fn test_collaborative_small_overflows_with_twelve_workstations() {
        let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Small)
            .with_equipment(Equipment::Workstations(12));
        let err = resolve_default(&spec).unwrap_err();
        assert_eq!(err.zone(), Some("workstations"));
    }

    #[test]
    fn test_standing_desk_from_back_pain() {
        let spec = WorkspaceSpec::new(WorkspaceType::Individual, AreaCategory::Small)
            .with_consideration(PhysicalConsideration::BackPain);
        let template = resolve_default(&spec).expect("resolves");
        assert_eq!(template.zones[0].arrangement.primary().item_type, ItemType::StandingDesk);
        assert!((template.zones[0].footprint.width - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_limited_mobility_widens_workstation_spacing() {
        let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Medium)
            .with_consideration(PhysicalConsideration::LimitedMobility);
        let template = resolve_default(&spec).expect("resolves");
        assert_eq!(template.zone("hot-desks").map(|z| z.min_spacing), Some(0.9));
        assert_eq!(template.zone("meeting").map(|z| z.min_spacing), Some(0.1));
    }

    #[test]
    fn test_station_kit_contents() {
        let config = LayoutConfig::default();
        let options = StationOptions {
            monitors: 2,
            monitor_arm: true,
            keyboard: true,
            mouse: true,
            task_lamp: true,
            footrest: true,
            storage: true,
            ..StationOptions::default()
        };
        let kit = station_kit(ItemType::Desk, &options, &config);
        let types: Vec<ItemType> = kit.companions.iter().map(|c| c.item.item_type).collect();
        assert_eq!(
            types,
            vec![
                ItemType::Chair,
                ItemType::Monitor,
                ItemType::Monitor,
                ItemType::MonitorArm,
                ItemType::Keyboard,
                ItemType::Mouse,
                ItemType::TaskLamp,
                ItemType::Footrest,
                ItemType::Storage,
            ]
        );

        // everything stays within the desk's width
        let bounds = kit.local_bounds();
        assert!((bounds.width - 1.2).abs() < 1e-9);

        let chair = &kit.companions[0];
        assert!((chair.offset.z + 0.45).abs() < 1e-9);
        let monitor = &kit.companions[1];
        assert!((monitor.offset.y - 0.74).abs() < 1e-9);
        let storage = kit.companions.last().expect("storage");
        assert_eq!(storage.offset.y, 0.0);
    }

    #[test]
    fn test_whiteboard_only_in_meeting_zone() {
        let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Medium)
            .with_equipment(Equipment::Whiteboard);
        let template = resolve_default(&spec).expect("resolves");

        let extras = |id: &str| match &template.zone(id).expect("zone").arrangement {
            Arrangement::Circular { extras, .. } => extras.len(),
            other => panic!("expected circular arrangement, got {:?}", other),
        };
        assert_eq!(extras("meeting"), 1);
        assert_eq!(extras("breakout"), 0);
    }

    #[test]
    fn test_explicit_dimensions() {
        let spec = WorkspaceSpec::with_dimensions(WorkspaceType::Hybrid, 11.0, 9.0);
        let template = resolve_default(&spec).expect("resolves");
        assert_eq!(template.room_dimensions, RoomDimensions::new(11.0, 9.0, 2.7));
        assert_eq!(template.scale, AreaCategory::Medium);
    }

    #[test]
    fn test_explicit_dimensions_must_be_positive() {
        for (w, l) in [(0.0, 5.0), (5.0, -1.0), (f64::NAN, 5.0), (f64::INFINITY, 5.0)] {
            let spec = WorkspaceSpec::with_dimensions(WorkspaceType::Individual, w, l);
            let err = resolve_default(&spec).unwrap_err();
            assert!(matches!(err, LayoutError::InvalidSpec { .. }), "{} x {}", w, l);
        }
    }

    #[test]
    fn test_scale_for_area() {
        let config = LayoutConfig::default();
        assert_eq!(scale_for_area(10.0, &config), AreaCategory::Small);
        assert_eq!(scale_for_area(43.2, &config), AreaCategory::Small);
        assert_eq!(scale_for_area(80.0, &config), AreaCategory::Small);
        assert_eq!(scale_for_area(90.72, &config), AreaCategory::Medium);
        assert_eq!(scale_for_area(500.0, &config), AreaCategory::Large);
    }

    #[test]
    fn test_missing_recipe_is_invalid_spec() {
        let mut config = LayoutConfig::default();
        config.recipes = crate::template::RecipeRegistry::new();
        let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Small);
        let err = resolve(&spec, &config).unwrap_err();
        assert!(err.to_string().contains("no recipe"));
    }

    #[test]
    fn test_zones_inside_room_and_disjoint() {
        let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Large);
        let template = resolve_default(&spec).expect("resolves");
        let floor = template.room_dimensions.floor();
        for (i, a) in template.zones.iter().enumerate() {
            assert!(floor.contains_rect(&a.rect()));
            for b in &template.zones[i + 1..] {
                assert!(!a.rect().intersects(&b.rect()));
            }
        }
    }

    #[test]
    fn test_huge_workstation_request_is_rejected() {
        let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Small)
            .with_equipment(Equipment::Workstations(u32::MAX));
        let err = resolve_default(&spec).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSpec { .. }), "{:?}", err);
        assert!(err.to_string().contains("'hot-desks'"), "{}", err);

        // pods divide the request first
        let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Large)
            .with_equipment(Equipment::Workstations(u32::MAX));
        let err = resolve_default(&spec).unwrap_err();
        assert!(err.to_string().contains("'workstations'"), "{}", err);
    }

    #[test]
    fn test_request_at_the_unit_cap_is_sized() {
        let config = LayoutConfig::default();
        let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Small)
            .with_equipment(Equipment::Workstations(config.max_zone_units));
        // sized and packed, then too wide for the room
        let err = resolve(&spec, &config).unwrap_err();
        assert!(matches!(err, LayoutError::TemplateOverflow { .. }), "{:?}", err);
    }

    #[test]
    fn test_invalid_config_is_invalid_spec() {
        let config = LayoutConfig::default().with_clearances(crate::layout::Clearances {
            circulation: f64::NAN,
            ..Default::default()
        });
        let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Small);
        let err = resolve(&spec, &config).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidSpec { .. }));
        assert!(err.to_string().contains("clearances.circulation"), "{}", err);
    }
}
