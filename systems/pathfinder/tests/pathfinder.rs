use floorplan_core::{FloorExtent, ObjectKind, TileAddress, TileRect, TileRectSize, WallKind};
use floorplan_floor::{FloorData, ObjectsData};
use floorplan_system_pathfinder::{PathError, PathFinder};

fn ring() -> TileRect {
    TileRect::from_origin_and_size(TileAddress::new(2, 2), TileRectSize::new(3, 3))
}

fn walled_floor() -> FloorData {
    let mut floor = FloorData::new(FloorExtent::new(8, 8));
    let mut events = Vec::new();
    for edge in ring().perimeter_edges() {
        let _ = floor
            .set_edge(edge, Some(WallKind::Solid), &mut events)
            .expect("ring lies inside the floor");
    }
    floor
}

#[test]
fn complete_ring_separates_inside_from_outside() {
    let floor = walled_floor();
    let finder = PathFinder::from_floor(&floor);

    assert_eq!(
        finder.find_path(TileAddress::new(0, 0), TileAddress::new(3, 3)),
        Err(PathError::NoPath),
        "a closed ring must block every route inside",
    );
}

#[test]
fn one_gap_reconnects_the_ring() {
    let mut floor = walled_floor();
    let mut events = Vec::new();
    let gap = ring().perimeter_edges()[1];
    let _ = floor
        .set_edge(gap, None, &mut events)
        .expect("gap lies inside the floor");
    let finder = PathFinder::from_floor(&floor);

    let path = finder
        .find_path(TileAddress::new(0, 0), TileAddress::new(3, 3))
        .expect("the gap must reopen a route");

    assert_eq!(path.first(), Some(&TileAddress::new(0, 0)));
    assert_eq!(path.last(), Some(&TileAddress::new(3, 3)));
    assert!(
        path.windows(2)
            .all(|step| step[0].manhattan_distance(step[1]) == 1),
        "route must move between orthogonal neighbours",
    );
    assert!(path.contains(&TileAddress::new(3, 2)), "route must pass the gap tile");
    assert!(
        path.windows(2)
            .all(|step| !floor.is_blocked_between(step[0], step[1])),
        "route must never cross a wall",
    );
}

#[test]
fn door_in_ring_keeps_the_route_open() {
    let mut floor = walled_floor();
    let mut events = Vec::new();
    let door = ring().perimeter_edges()[0];
    let _ = floor
        .set_edge(door, Some(WallKind::Door), &mut events)
        .expect("door lies inside the floor");

    let finder = PathFinder::from_floor(&floor);

    assert!(finder
        .find_path(TileAddress::new(0, 0), TileAddress::new(4, 4))
        .is_ok());
}

#[test]
fn objects_force_a_detour() {
    let mut floor = FloorData::new(FloorExtent::new(5, 3));
    let mut objects = ObjectsData::new();
    let mut events = Vec::new();
    let _ = objects
        .place(&mut floor, ObjectKind::Table, TileAddress::new(1, 1), &mut events)
        .expect("table fits");
    let _ = objects
        .place(&mut floor, ObjectKind::Chair, TileAddress::new(3, 1), &mut events)
        .expect("chair fits");

    let finder = PathFinder::from_floor(&floor);
    let path = finder
        .find_path(TileAddress::new(0, 1), TileAddress::new(4, 1))
        .expect("route around the furniture exists");

    assert_eq!(path.len(), 7, "detour adds one step up and one step down");
    assert!(
        path.iter().all(|tile| floor.occupant(*tile).is_none()),
        "route must avoid occupied tiles",
    );
}

#[test]
fn identical_queries_yield_identical_routes() {
    let floor = FloorData::new(FloorExtent::new(6, 6));
    let first = PathFinder::from_floor(&floor)
        .find_path(TileAddress::new(0, 5), TileAddress::new(5, 0))
        .expect("open floor is connected");
    let second = PathFinder::from_floor(&floor)
        .find_path(TileAddress::new(0, 5), TileAddress::new(5, 0))
        .expect("open floor is connected");

    assert_eq!(first, second);
}

#[test]
fn wall_set_then_cleared_restores_the_route() {
    let mut floor = FloorData::new(FloorExtent::new(4, 4));
    let from = TileAddress::new(0, 0);
    let to = TileAddress::new(3, 0);
    let before = PathFinder::from_floor(&floor).find_path(from, to);
    let mut events = Vec::new();
    let edge = floorplan_core::EdgeAddress::vertical(2, 0);

    let _ = floor
        .set_edge(edge, Some(WallKind::Solid), &mut events)
        .expect("edge in bounds");
    let _ = floor.set_edge(edge, None, &mut events).expect("edge in bounds");

    assert_eq!(PathFinder::from_floor(&floor).find_path(from, to), before);
}
