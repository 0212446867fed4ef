use floorplan_calculator::{GridTransform, LotKey};
use floorplan_core::{
    CornerAddress, EdgeAddress, EditTool, ObjectKind, Rejection, TileAddress, WallKind,
};
use floorplan_grid::{ClickReport, FloorGrid, FloorGridError, GridSettings};
use floorplan_rendering::{NullRenderer, RecordingRenderer};
use floorplan_system_click::{ClickOutcome, GesturePhase};
use floorplan_system_interactions::{Applied, OrphanPolicy};
use floorplan_system_pathfinder::PathError;
use glam::Vec2;

fn initialized(settings: GridSettings) -> FloorGrid<RecordingRenderer> {
    let mut grid = FloorGrid::new(settings, RecordingRenderer::new());
    grid.initialize(LotKey::Neighborhood1Lot1, 0.0)
        .expect("default lot initializes");
    grid
}

fn tile_point(grid: &FloorGrid<RecordingRenderer>, column: u32, row: u32) -> Vec2 {
    grid.calculator()
        .expect("initialized")
        .tile_to_world(TileAddress::new(column, row))
}

fn corner_point(grid: &FloorGrid<RecordingRenderer>, column: u32, row: u32) -> Vec2 {
    grid.calculator()
        .expect("initialized")
        .corner_to_world(CornerAddress::new(column, row))
}

fn drag(
    grid: &mut FloorGrid<RecordingRenderer>,
    tool: EditTool,
    from: Vec2,
    to: Vec2,
) -> ClickReport {
    let _ = grid.handle_click(tool, from, true).expect("initialized");
    let _ = grid.handle_click(tool, to, true).expect("initialized");
    grid.handle_click(tool, to, false).expect("initialized")
}

fn build_room(grid: &mut FloorGrid<RecordingRenderer>, from: (u32, u32), to: (u32, u32)) {
    let from = tile_point(grid, from.0, from.1);
    let to = tile_point(grid, to.0, to.1);
    let report = drag(grid, EditTool::BuildRoom(WallKind::Solid), from, to);
    assert!(report.applied(), "room drag must be accepted: {report:?}");
}

fn place(grid: &mut FloorGrid<RecordingRenderer>, kind: ObjectKind, column: u32, row: u32) -> ClickReport {
    let point = tile_point(grid, column, row);
    drag(grid, EditTool::PlaceObject(kind), point, point)
}

#[test]
fn every_operation_before_initialize_fails_loudly() {
    let mut grid = FloorGrid::new(GridSettings::default(), NullRenderer);
    let tile = TileAddress::new(0, 0);

    assert!(!grid.is_initialized());
    assert!(matches!(
        grid.handle_click(EditTool::RemoveWall, Vec2::ZERO, true),
        Err(FloorGridError::NotInitialized)
    ));
    assert!(matches!(grid.tile(tile), Err(FloorGridError::NotInitialized)));
    assert!(matches!(
        grid.edge(EdgeAddress::horizontal(0, 0)),
        Err(FloorGridError::NotInitialized)
    ));
    assert!(matches!(
        grid.corner(CornerAddress::new(0, 0)),
        Err(FloorGridError::NotInitialized)
    ));
    assert!(matches!(grid.room_containing(tile), Err(FloorGridError::NotInitialized)));
    assert!(matches!(grid.all_rooms(), Err(FloorGridError::NotInitialized)));
    assert!(matches!(grid.find_path(tile, tile), Err(FloorGridError::NotInitialized)));
    assert!(matches!(grid.objects(), Err(FloorGridError::NotInitialized)));
    assert!(matches!(grid.preview(), Err(FloorGridError::NotInitialized)));
    assert!(matches!(grid.geometry(), Err(FloorGridError::NotInitialized)));
    assert!(matches!(grid.clear(), Err(FloorGridError::NotInitialized)));
    assert!(matches!(grid.floor_height(), Err(FloorGridError::NotInitialized)));
}

#[test]
fn initialize_attaches_the_mesh_once() {
    let mut grid = initialized(GridSettings::default());

    assert!(matches!(
        grid.initialize(LotKey::Neighborhood1Lot2, 0.0),
        Err(FloorGridError::AlreadyInitialized)
    ));
    assert_eq!(grid.renderer().attach_count(), 1);
    assert_eq!(grid.renderer().regenerate_count(), 1);
    let geometry = grid.renderer().latest().expect("initial mesh generated");
    assert_eq!(geometry.tiles.len(), 16 * 12);
    assert!(geometry.walls.is_empty());
    assert_eq!(grid.lot().expect("initialized"), LotKey::Neighborhood1Lot1);
}

#[test]
fn enclosing_a_block_yields_one_room_with_its_tiles() {
    let mut grid = initialized(GridSettings::default());

    build_room(&mut grid, (2, 2), (4, 4));

    let rooms = grid.all_rooms().expect("initialized");
    assert_eq!(rooms.len(), 1, "a closed ring must yield exactly one room");
    assert_eq!(rooms[0].area(), 9);
    for row in 2..=4 {
        for column in 2..=4 {
            assert!(rooms[0].contains(TileAddress::new(column, row)));
        }
    }
    assert_eq!(
        grid.room_containing(TileAddress::new(3, 3))
            .expect("initialized")
            .map(|room| room.id),
        Some(rooms[0].id)
    );
    assert_eq!(grid.room_containing(TileAddress::new(0, 0)).expect("initialized"), None);

    let geometry = grid.renderer().latest().expect("mesh regenerated");
    assert_eq!(geometry.walls.len(), 12);
    assert_eq!(geometry.rooms.len(), 1);
    assert_eq!(grid.renderer().regenerate_count(), 2);
}

#[test]
fn wall_set_then_removed_restores_rooms_and_paths() {
    let mut grid = initialized(GridSettings::default());
    let from = TileAddress::new(0, 0);
    let to = TileAddress::new(6, 0);
    let path_before = grid.find_path(from, to).expect("open floor is connected");
    let geometry_before = grid.geometry().expect("initialized");

    let start = corner_point(&grid, 3, 0);
    let end = corner_point(&grid, 3, 1);
    let built = drag(&mut grid, EditTool::BuildWall(WallKind::Solid), start, end);
    assert!(built.applied());
    assert_eq!(
        grid.edge(EdgeAddress::vertical(3, 0)).expect("edge in bounds").wall,
        Some(WallKind::Solid)
    );

    let removed = drag(&mut grid, EditTool::RemoveWall, end, start);
    assert!(removed.applied());

    assert_eq!(grid.geometry().expect("initialized"), geometry_before);
    assert!(grid.all_rooms().expect("initialized").is_empty());
    assert_eq!(grid.find_path(from, to).expect("route restored"), path_before);
}

#[test]
fn overlapping_placement_is_refused_without_side_effects() {
    let mut grid = initialized(GridSettings::default());

    assert!(place(&mut grid, ObjectKind::Table, 5, 5).applied());
    let geometry_before = grid.geometry().expect("initialized");
    let regenerations = grid.renderer().regenerate_count();

    let second = place(&mut grid, ObjectKind::Table, 6, 5);

    assert_eq!(second.rejection(), Some(Rejection::Occupied));
    assert_eq!(grid.geometry().expect("initialized"), geometry_before);
    assert_eq!(grid.objects().expect("initialized").len(), 1);
    assert_eq!(
        grid.renderer().regenerate_count(),
        regenerations,
        "a refused edit must not regenerate the mesh",
    );
}

#[test]
fn closed_ring_blocks_routes_until_a_gap_opens() {
    let mut grid = initialized(GridSettings::default());
    build_room(&mut grid, (3, 3), (5, 5));
    let outside = TileAddress::new(0, 0);
    let inside = TileAddress::new(4, 4);

    assert!(matches!(
        grid.find_path(outside, inside),
        Err(FloorGridError::Path(PathError::NoPath))
    ));

    let gap_start = corner_point(&grid, 4, 3);
    let gap_end = corner_point(&grid, 5, 3);
    let removed = drag(&mut grid, EditTool::RemoveWall, gap_start, gap_end);
    assert_eq!(
        removed.edit,
        Some(Ok(Applied::Walls {
            changed: vec![EdgeAddress::horizontal(4, 3)],
            orphaned: Vec::new(),
        }))
    );

    let path = grid.find_path(outside, inside).expect("gap reopens a route");
    assert_eq!(path.first(), Some(&outside));
    assert_eq!(path.last(), Some(&inside));
    assert!(grid.all_rooms().expect("initialized").is_empty());
}

#[test]
fn drag_released_off_the_floor_commits_nothing() {
    let mut grid = initialized(GridSettings::default());
    let before = grid.geometry().expect("initialized");
    let regenerations = grid.renderer().regenerate_count();
    let tool = EditTool::BuildWall(WallKind::Half);

    let _ = grid
        .handle_click(tool, corner_point(&grid, 1, 1), true)
        .expect("initialized");
    let _ = grid
        .handle_click(tool, corner_point(&grid, 6, 1), true)
        .expect("initialized");
    assert_eq!(grid.gesture_phase().expect("initialized"), GesturePhase::Dragging);
    let report = grid
        .handle_click(tool, Vec2::new(-5000.0, 100.0), false)
        .expect("initialized");

    assert_eq!(report.outcome, ClickOutcome::Cancelled);
    assert_eq!(report.edit, None);
    assert_eq!(grid.geometry().expect("initialized"), before);
    assert_eq!(grid.renderer().regenerate_count(), regenerations);
}

#[test]
fn reject_policy_protects_furnished_rooms() {
    let mut grid = initialized(GridSettings::default());
    build_room(&mut grid, (1, 1), (3, 3));
    assert!(place(&mut grid, ObjectKind::Bed, 1, 1).applied());

    let (start, end) = (corner_point(&grid, 1, 1), corner_point(&grid, 2, 1));
    let report = drag(&mut grid, EditTool::RemoveWall, start, end);

    assert!(matches!(
        report.rejection(),
        Some(Rejection::WouldOrphanObject { .. })
    ));
    assert_eq!(grid.all_rooms().expect("initialized").len(), 1);
    assert_eq!(
        grid.edge(EdgeAddress::horizontal(1, 1)).expect("edge in bounds").wall,
        Some(WallKind::Solid)
    );
}

#[test]
fn allow_policy_reports_orphaned_objects() {
    let mut grid = initialized(GridSettings {
        orphan_policy: OrphanPolicy::Allow,
        ..GridSettings::default()
    });
    build_room(&mut grid, (1, 1), (3, 3));
    assert!(place(&mut grid, ObjectKind::Bathtub, 2, 3).applied());
    let bathtub = grid.objects().expect("initialized")[0].id;

    let (start, end) = (corner_point(&grid, 1, 1), corner_point(&grid, 2, 1));
    let report = drag(&mut grid, EditTool::RemoveWall, start, end);

    assert!(matches!(
        report.edit,
        Some(Ok(Applied::Walls { ref orphaned, .. })) if orphaned == &vec![bathtub]
    ));
    assert!(grid.all_rooms().expect("initialized").is_empty());
    assert_eq!(grid.objects().expect("initialized").len(), 1, "orphan stays placed");
}

#[test]
fn preview_reports_whether_the_edit_would_be_accepted() {
    let mut grid = initialized(GridSettings::default());
    let tool = EditTool::PlaceObject(ObjectKind::Bed);

    assert_eq!(grid.preview().expect("initialized"), None);
    let _ = grid
        .handle_click(tool, tile_point(&grid, 8, 8), true)
        .expect("initialized");
    let preview = grid
        .preview()
        .expect("initialized")
        .expect("gesture in progress");

    assert_eq!(preview.verdict, Err(Rejection::NotEnclosed));
    let report = grid
        .handle_click(tool, tile_point(&grid, 8, 8), false)
        .expect("initialized");
    assert_eq!(report.rejection(), Some(Rejection::NotEnclosed));
}

#[test]
fn clear_keeps_the_lot_but_empties_the_floor() {
    let mut grid = initialized(GridSettings::default());
    build_room(&mut grid, (0, 0), (2, 2));
    assert!(place(&mut grid, ObjectKind::Chair, 1, 1).applied());

    grid.clear().expect("initialized");

    assert!(grid.all_rooms().expect("initialized").is_empty());
    assert!(grid.objects().expect("initialized").is_empty());
    assert!(!grid.tile(TileAddress::new(1, 1)).expect("tile in bounds").is_occupied());
    assert_eq!(grid.lot().expect("initialized"), LotKey::Neighborhood1Lot1);
    let geometry = grid.renderer().latest().expect("mesh regenerated");
    assert!(geometry.walls.is_empty());
    assert!(geometry.objects.is_empty());
}

#[test]
fn centered_lot_routes_clicks_to_the_same_tiles() {
    let mut grid = FloorGrid::new(GridSettings::default(), RecordingRenderer::new());
    grid.initialize(LotKey::Neighborhood2Lot1, 300.0)
        .expect("centered lot initializes");

    let report = place(&mut grid, ObjectKind::Chair, 23, 15);

    assert!(report.applied());
    assert!(grid
        .tile(TileAddress::new(23, 15))
        .expect("last tile in bounds")
        .is_occupied());
    let geometry = grid.renderer().latest().expect("mesh regenerated");
    assert!((geometry.floor_height - 300.0).abs() < f32::EPSILON);
}

#[test]
fn queries_outside_the_floor_report_out_of_bounds() {
    let grid = initialized(GridSettings::default());

    assert!(matches!(
        grid.tile(TileAddress::new(16, 0)),
        Err(FloorGridError::Floor(floorplan_core::FloorError::OutOfBounds))
    ));
    assert!(matches!(
        grid.find_path(TileAddress::new(0, 0), TileAddress::new(0, 12)),
        Err(FloorGridError::Path(PathError::OutOfBounds))
    ));
}
