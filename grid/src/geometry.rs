//! Derives mesh-ready geometry from floor state.

use floorplan_calculator::{GridCalculator, GridTransform};
use floorplan_core::CornerAddress;
use floorplan_floor::{FloorData, ObjectsData};
use floorplan_rendering::{
    wall_color, CornerPost, FloorGeometry, ObjectBox, RoomOutline, TileQuad, WallSegment,
};
use floorplan_system_rooms::RoomsManager;
use glam::Vec2;

pub(crate) fn build(
    calculator: &GridCalculator,
    floor_height: f32,
    floor: &FloorData,
    objects: &ObjectsData,
    rooms: &RoomsManager,
) -> FloorGeometry {
    let lift = |point: Vec2| point.extend(floor_height);
    let corner = |column: u32, row: u32| lift(calculator.corner_to_world(CornerAddress::new(column, row)));
    let mut geometry = FloorGeometry::new(floor.extent(), floor_height, calculator.tile_size());

    geometry.tiles = floor
        .tiles()
        .map(|tile| {
            let (column, row) = (tile.address.column(), tile.address.row());
            TileQuad {
                tile: tile.address,
                corners: [
                    corner(column, row),
                    corner(column + 1, row),
                    corner(column + 1, row + 1),
                    corner(column, row + 1),
                ],
                room: rooms.room_id_at(tile.address),
                occupied: tile.is_occupied(),
            }
        })
        .collect();

    geometry.walls = floor
        .present_edges()
        .filter_map(|edge| {
            let kind = edge.wall?;
            let (start, end) = calculator.edge_to_world(edge.address);
            Some(WallSegment {
                edge: edge.address,
                kind,
                start: lift(start),
                end: lift(end),
                color: wall_color(kind),
            })
        })
        .collect();

    geometry.posts = floor
        .corners_with_arms()
        .filter(|post| post.arms.needs_post())
        .map(|post| CornerPost {
            corner: post.address,
            position: lift(calculator.corner_to_world(post.address)),
            arms: post.arms.count(),
        })
        .collect();

    geometry.objects = objects
        .iter()
        .map(|object| {
            let origin = object.footprint.origin();
            let size = object.footprint.size();
            let a = corner(origin.column(), origin.row());
            let b = corner(origin.column() + size.width(), origin.row() + size.height());
            ObjectBox {
                object: object.id,
                kind: object.kind,
                footprint: object.footprint,
                min: a.min(b),
                max: a.max(b),
            }
        })
        .collect();

    geometry.rooms = rooms
        .all_rooms()
        .into_iter()
        .map(|room| RoomOutline {
            room: room.id,
            segments: room
                .boundary
                .iter()
                .map(|edge| {
                    let (start, end) = calculator.edge_to_world(*edge);
                    (lift(start), lift(end))
                })
                .collect(),
            area: room.world_area(calculator.tile_size()),
        })
        .collect();

    geometry
}
