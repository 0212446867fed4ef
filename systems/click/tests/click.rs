use floorplan_calculator::AnchoredGrid;
use floorplan_core::{
    EdgeAddress, EditCommand, EditTool, FloorExtent, ObjectAction, ObjectKind, TileAddress,
    WallAction, WallKind,
};
use floorplan_system_click::{ClickOutcome, ClickRouter, GesturePhase};
use glam::Vec2;

fn grid() -> AnchoredGrid {
    AnchoredGrid::new(Vec2::ZERO, 100.0, FloorExtent::new(4, 4))
}

#[test]
fn wall_drag_commits_edges_between_corners() {
    let grid = grid();
    let mut router = ClickRouter::new();
    let mut commands = Vec::new();
    let tool = EditTool::BuildWall(WallKind::Solid);

    assert_eq!(
        router.handle(tool, Vec2::new(102.0, 98.0), true, &grid, &mut commands),
        ClickOutcome::Started
    );
    assert_eq!(router.phase(), GesturePhase::Pressed);
    assert_eq!(
        router.handle(tool, Vec2::new(296.0, 130.0), true, &grid, &mut commands),
        ClickOutcome::Dragged
    );
    assert_eq!(router.phase(), GesturePhase::Dragging);
    assert_eq!(
        router.handle(tool, Vec2::new(301.0, 120.0), true, &grid, &mut commands),
        ClickOutcome::Held
    );
    assert!(commands.is_empty(), "nothing commits while the pointer is held");

    let expected = EditCommand::Walls(WallAction::Build {
        edges: vec![EdgeAddress::horizontal(1, 1), EdgeAddress::horizontal(2, 1)],
        kind: WallKind::Solid,
    });
    assert_eq!(router.preview(), Some(expected.clone()));
    assert_eq!(
        router.handle(tool, Vec2::new(301.0, 120.0), false, &grid, &mut commands),
        ClickOutcome::Committed
    );
    assert_eq!(commands, vec![expected]);
    assert_eq!(router.phase(), GesturePhase::Idle);
}

#[test]
fn release_outside_the_floor_commits_nothing() {
    let grid = grid();
    let mut router = ClickRouter::new();
    let mut commands = Vec::new();
    let tool = EditTool::BuildRoom(WallKind::Solid);

    let _ = router.handle(tool, Vec2::new(50.0, 50.0), true, &grid, &mut commands);
    let _ = router.handle(tool, Vec2::new(250.0, 250.0), true, &grid, &mut commands);
    let outcome = router.handle(tool, Vec2::new(900.0, 250.0), false, &grid, &mut commands);

    assert_eq!(outcome, ClickOutcome::Cancelled);
    assert!(commands.is_empty(), "release off the floor must not commit");
    assert_eq!(router.phase(), GesturePhase::Idle);
}

#[test]
fn leaving_the_floor_mid_drag_discards_the_gesture() {
    let grid = grid();
    let mut router = ClickRouter::new();
    let mut commands = Vec::new();
    let tool = EditTool::RemoveWall;

    let _ = router.handle(tool, Vec2::new(0.0, 0.0), true, &grid, &mut commands);
    assert_eq!(
        router.handle(tool, Vec2::new(-300.0, 0.0), true, &grid, &mut commands),
        ClickOutcome::Cancelled
    );
    assert_eq!(router.phase(), GesturePhase::Cancelled);
    assert_eq!(router.preview(), None);

    let _ = router.handle(tool, Vec2::new(200.0, 0.0), true, &grid, &mut commands);
    assert_eq!(
        router.handle(tool, Vec2::new(200.0, 0.0), false, &grid, &mut commands),
        ClickOutcome::Cancelled,
        "returning to the floor does not revive a discarded gesture",
    );
    assert!(commands.is_empty());
    assert_eq!(router.phase(), GesturePhase::Idle);
}

#[test]
fn press_outside_the_floor_stays_idle() {
    let grid = grid();
    let mut router = ClickRouter::new();
    let mut commands = Vec::new();

    assert_eq!(
        router.handle(
            EditTool::PlaceObject(ObjectKind::Chair),
            Vec2::new(-10.0, 50.0),
            true,
            &grid,
            &mut commands,
        ),
        ClickOutcome::Ignored
    );
    assert_eq!(router.phase(), GesturePhase::Idle);
}

#[test]
fn changing_tools_mid_gesture_cancels_it() {
    let grid = grid();
    let mut router = ClickRouter::new();
    let mut commands = Vec::new();

    let _ = router.handle(
        EditTool::BuildWall(WallKind::Half),
        Vec2::new(0.0, 0.0),
        true,
        &grid,
        &mut commands,
    );
    assert_eq!(
        router.handle(
            EditTool::RemoveWall,
            Vec2::new(200.0, 0.0),
            true,
            &grid,
            &mut commands,
        ),
        ClickOutcome::Cancelled
    );
    let _ = router.handle(
        EditTool::RemoveWall,
        Vec2::new(200.0, 0.0),
        false,
        &grid,
        &mut commands,
    );
    assert!(commands.is_empty());
}

#[test]
fn click_without_drag_on_a_corner_commits_nothing() {
    let grid = grid();
    let mut router = ClickRouter::new();
    let mut commands = Vec::new();
    let tool = EditTool::BuildWall(WallKind::Solid);

    let _ = router.handle(tool, Vec2::new(200.0, 200.0), true, &grid, &mut commands);
    assert_eq!(
        router.handle(tool, Vec2::new(200.0, 200.0), false, &grid, &mut commands),
        ClickOutcome::Released
    );
    assert!(commands.is_empty(), "zero-length wall runs commit nothing");
}

#[test]
fn object_placement_follows_the_release_tile() {
    let grid = grid();
    let mut router = ClickRouter::new();
    let mut commands = Vec::new();
    let tool = EditTool::PlaceObject(ObjectKind::Table);

    let _ = router.handle(tool, Vec2::new(50.0, 50.0), true, &grid, &mut commands);
    let _ = router.handle(tool, Vec2::new(250.0, 350.0), true, &grid, &mut commands);
    let _ = router.handle(tool, Vec2::new(250.0, 350.0), false, &grid, &mut commands);

    assert_eq!(
        commands,
        vec![EditCommand::Object(ObjectAction::Place {
            kind: ObjectKind::Table,
            anchor: TileAddress::new(2, 3),
        })]
    );
}

#[test]
fn room_drag_walls_in_the_spanned_rectangle() {
    let grid = grid();
    let mut router = ClickRouter::new();
    let mut commands = Vec::new();
    let tool = EditTool::BuildRoom(WallKind::Door);

    let _ = router.handle(tool, Vec2::new(350.0, 150.0), true, &grid, &mut commands);
    let _ = router.handle(tool, Vec2::new(150.0, 250.0), false, &grid, &mut commands);

    let [EditCommand::Walls(WallAction::Build { edges, kind })] = commands.as_slice() else {
        panic!("room drag must commit one wall build, got {commands:?}");
    };
    assert_eq!(*kind, WallKind::Door);
    assert_eq!(edges.len(), 10, "a 3x2 rectangle has ten perimeter edges");
    assert!(edges.contains(&EdgeAddress::horizontal(1, 1)));
    assert!(edges.contains(&EdgeAddress::vertical(4, 2)));
}
