//! Whole-pipeline properties of generated layouts

use std::f64::consts::{PI, TAU};

use pretty_assertions::assert_eq;
use workspace_layout::layout::validate;
use workspace_layout::{
    generate_layout, AreaCategory, Equipment, ItemType, LayoutError, LayoutResult,
    PhysicalConsideration, WorkspaceSpec, WorkspaceType,
};

const TYPES: [WorkspaceType; 3] = [
    WorkspaceType::Individual,
    WorkspaceType::Collaborative,
    WorkspaceType::Hybrid,
];

const EQUIPMENT: [Equipment; 9] = [
    Equipment::AdjustableDesk,
    Equipment::MonitorArm,
    Equipment::ExtraMonitor,
    Equipment::Footrest,
    Equipment::ErgoKeyboard,
    Equipment::ErgoMouse,
    Equipment::TaskLighting,
    Equipment::Storage,
    Equipment::Whiteboard,
];

const CONSIDERATIONS: [PhysicalConsideration; 6] = [
    PhysicalConsideration::BackPain,
    PhysicalConsideration::WristStrain,
    PhysicalConsideration::NeckPain,
    PhysicalConsideration::EyeStrain,
    PhysicalConsideration::LimitedMobility,
    PhysicalConsideration::PreferStanding,
];

fn all_default_specs() -> Vec<WorkspaceSpec> {
    TYPES
        .iter()
        .flat_map(|t| AreaCategory::ALL.map(|c| WorkspaceSpec::new(*t, c)))
        .collect()
}

#[test]
fn test_every_default_combination_is_clean() {
    for spec in all_default_specs() {
        let result = generate_layout(&spec)
            .unwrap_or_else(|e| panic!("{:?}: {}", spec.area_category, e));
        assert!(
            result.is_clean(),
            "{} {:?}: {:?}",
            spec.workspace_type,
            spec.area_category,
            result.violations
        );
    }
}

#[test]
fn test_every_single_tag_fits_and_is_clean() {
    let tagged = all_default_specs().into_iter().flat_map(|base| {
        let with_equipment = EQUIPMENT.map(|e| base.clone().with_equipment(e));
        let with_consideration = CONSIDERATIONS.map(|c| base.clone().with_consideration(c));
        with_equipment.into_iter().chain(with_consideration)
    });

    for spec in tagged {
        let label = format!(
            "{} {:?} {:?} {:?}",
            spec.workspace_type, spec.area_category, spec.equipment, spec.physical_considerations
        );
        let result = generate_layout(&spec).unwrap_or_else(|e| panic!("{}: {}", label, e));
        assert!(result.is_clean(), "{}: {:?}", label, result.violations);
    }
}

#[test]
fn test_all_tags_together_fit_and_are_clean() {
    for base in all_default_specs() {
        let spec = EQUIPMENT
            .into_iter()
            .fold(base, |spec, e| spec.with_equipment(e));
        let spec = CONSIDERATIONS
            .into_iter()
            .fold(spec, |spec, c| spec.with_consideration(c));

        let result = generate_layout(&spec)
            .unwrap_or_else(|e| panic!("{} {:?}: {}", spec.workspace_type, spec.area_category, e));
        assert!(
            result.is_clean(),
            "{} {:?}: {:?}",
            spec.workspace_type,
            spec.area_category,
            result.violations
        );
    }
}

#[test]
fn test_unbounded_workstation_request_is_rejected() {
    let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Small)
        .with_equipment(Equipment::Workstations(u32::MAX));
    let err = generate_layout(&spec).unwrap_err();
    match err {
        LayoutError::InvalidSpec { reason } => {
            assert!(reason.contains("at most 64"), "{}", reason);
        }
        other => panic!("expected invalid spec, got {:?}", other),
    }
}

#[test]
fn test_generation_is_deterministic() {
    for spec in all_default_specs() {
        let first = generate_layout(&spec).unwrap();
        let second = generate_layout(&spec).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    }
}

#[test]
fn test_zones_stay_inside_room_and_apart() {
    for spec in all_default_specs() {
        let graph = generate_layout(&spec).unwrap().scene_graph;
        let floor = graph.root.room_dimensions.floor();
        let zones = &graph.root.zones;

        for (i, a) in zones.iter().enumerate() {
            assert!(floor.contains_rect(&a.bounds), "{} leaves the room", a.zone_id);
            for b in &zones[i + 1..] {
                // touching edges are fine
                assert!(
                    !a.bounds.inflate(-1e-9).intersects(&b.bounds),
                    "{} overlaps {}",
                    a.zone_id,
                    b.zone_id
                );
            }
        }
    }
}

#[test]
fn test_item_ids_are_unique() {
    let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Large)
        .with_equipment(Equipment::ExtraMonitor)
        .with_equipment(Equipment::Storage);
    let graph = generate_layout(&spec).unwrap().scene_graph;

    let mut ids: Vec<&str> = graph.items().map(|item| item.id.as_str()).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert!(graph.find_item("hot-desks.station-1.monitor-2").is_some());
}

#[test]
fn test_collaborative_medium_has_no_violations() {
    let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Medium)
        .with_equipment(Equipment::Whiteboard);
    let result = generate_layout(&spec).unwrap();

    assert!(result.violations.is_empty(), "{:?}", result.violations);
    assert_eq!(result.scene_graph.count_of(ItemType::Whiteboard), 1);
    assert_eq!(result.scene_graph.count_of(ItemType::Divider), 4);
}

#[test]
fn test_twelve_workstations_overflow_small_collaborative_room() {
    let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Small)
        .with_equipment(Equipment::Workstations(12));
    let err = generate_layout(&spec).unwrap_err();

    match err {
        LayoutError::TemplateOverflow { zone, reason } => {
            assert_eq!(zone, "workstations");
            assert!(reason.contains("room is 7.20 m wide"), "{}", reason);
        }
        other => panic!("expected overflow, got {:?}", other),
    }
}

#[test]
fn test_non_positive_dimensions_are_rejected() {
    let cases = [(0.0, 4.0), (5.0, -1.0), (f64::NAN, 4.0), (f64::INFINITY, 4.0)];
    for (width, length) in cases {
        let spec = WorkspaceSpec::with_dimensions(WorkspaceType::Individual, width, length);
        let err = generate_layout(&spec).unwrap_err();
        assert!(
            matches!(err, LayoutError::InvalidSpec { .. }),
            "{} x {}: {:?}",
            width,
            length,
            err
        );
    }
}

#[test]
fn test_six_seats_face_the_table() {
    let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Small);
    let graph = generate_layout(&spec).unwrap().scene_graph;
    let meeting = graph.zone("meeting").expect("meeting zone");

    let table = meeting
        .items
        .iter()
        .find(|item| item.item_type == ItemType::MeetingTable)
        .expect("table");
    let center = table.floor_point();

    let seats: Vec<_> = meeting
        .items
        .iter()
        .filter(|item| item.item_type == ItemType::Chair)
        .collect();
    assert_eq!(seats.len(), 6);

    let radius = seats[0].floor_point().distance(&center);
    for (i, seat) in seats.iter().enumerate() {
        let theta = i as f64 * TAU / 6.0;
        let p = seat.floor_point();
        assert!((p.distance(&center) - radius).abs() < 1e-9);
        assert!((p.x - center.x - radius * theta.sin()).abs() < 1e-9);
        assert!((p.z - center.z - radius * theta.cos()).abs() < 1e-9);
        assert!((seat.rotation - (theta + PI)).abs() < 1e-9);
    }
}

#[test]
fn test_accessible_spacing_reaches_the_graph() {
    let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Medium)
        .with_consideration(PhysicalConsideration::LimitedMobility);
    let result = generate_layout(&spec).unwrap();

    let desks = result.scene_graph.zone("hot-desks").expect("hot-desks");
    assert_eq!(desks.min_spacing, 0.9);
    assert!(result.is_clean(), "{:?}", result.violations);
}

#[test]
fn test_validate_is_idempotent() {
    let spec = WorkspaceSpec::new(WorkspaceType::Hybrid, AreaCategory::Large);
    let result = generate_layout(&spec).unwrap();

    let again = validate(&result.scene_graph);
    assert_eq!(again, result.violations);
    assert_eq!(validate(&result.scene_graph), again);
}

#[test]
fn test_result_json_round_trip() {
    let spec = WorkspaceSpec::new(WorkspaceType::Collaborative, AreaCategory::Large)
        .with_consideration(PhysicalConsideration::WristStrain);
    let result = generate_layout(&spec).unwrap();

    let json = result.to_json().unwrap();
    let parsed = LayoutResult::from_json(&json).unwrap();
    assert_eq!(parsed, result);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["sceneGraph"]["root"]["roomDimensions"].is_object());
    assert_eq!(value["template"]["workspaceType"], "collaborative");
}

#[test]
fn test_concurrent_generation_matches_sequential() {
    let specs = all_default_specs();
    let sequential: Vec<_> = specs.iter().map(|s| generate_layout(s).unwrap()).collect();

    let concurrent: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = specs
            .iter()
            .map(|spec| scope.spawn(move || generate_layout(spec).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    assert_eq!(concurrent, sequential);
}
