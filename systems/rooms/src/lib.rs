#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Room detection derived from wall topology.
//!
//! Rooms are recomputed wholesale from the floor after every topology change.
//! Every present wall, doors included, acts as a barrier; the tiles reachable
//! from outside the floor through a gap in the perimeter are never a room.

use std::collections::VecDeque;

use floorplan_core::{Direction, EdgeAddress, FloorExtent, RoomId, TileAddress, TileRect};
use floorplan_floor::FloorData;

/// Enclosed, connected region of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    /// Identifier within the snapshot the room was detected in.
    pub id: RoomId,
    /// Member tiles in row-major order.
    pub tiles: Vec<TileAddress>,
    /// Walls separating the room from everything else, sorted and unique.
    pub boundary: Vec<EdgeAddress>,
}

impl Room {
    /// Number of tiles in the room.
    #[must_use]
    pub fn area(&self) -> usize {
        self.tiles.len()
    }

    /// Floor area in world units for the provided tile side length.
    #[must_use]
    pub fn world_area(&self, tile_size: f32) -> f32 {
        self.tiles.len() as f32 * tile_size * tile_size
    }

    /// Reports whether the tile belongs to the room.
    #[must_use]
    pub fn contains(&self, tile: TileAddress) -> bool {
        self.tiles
            .binary_search_by_key(&row_major(tile), |member| row_major(*member))
            .is_ok()
    }
}

/// Detects every room on the floor.
///
/// Ids are assigned in row-major order of each room's first tile, so identical
/// topology always yields identical ids.
#[must_use]
pub fn detect_rooms(floor: &FloorData) -> Vec<Room> {
    let labels = label_tiles(floor);
    let extent = floor.extent();
    let mut rooms: Vec<Room> = Vec::new();

    for (tile, label) in extent.tiles().zip(labels.iter()) {
        let Label::Room(index) = *label else {
            continue;
        };
        if index == rooms.len() {
            rooms.push(Room {
                id: RoomId::new(u32::try_from(index).unwrap_or(u32::MAX)),
                tiles: Vec::new(),
                boundary: Vec::new(),
            });
        }
        if let Some(room) = rooms.get_mut(index) {
            room.tiles.push(tile);
        }
    }

    for room in &mut rooms {
        let mut boundary = Vec::new();
        for tile in &room.tiles {
            for direction in Direction::ALL {
                let edge = tile.boundary(direction);
                if floor.wall(edge).is_none() {
                    continue;
                }
                let outside = extent
                    .neighbor(*tile, direction)
                    .and_then(|neighbor| extent.tile_index(neighbor))
                    .map_or(true, |index| {
                        labels.get(index) != Some(&Label::Room(room_index(room.id)))
                    });
                if outside {
                    boundary.push(edge);
                }
            }
        }
        boundary.sort_unstable();
        boundary.dedup();
        room.boundary = boundary;
    }

    rooms
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Label {
    Unvisited,
    Exterior,
    Room(usize),
}

fn label_tiles(floor: &FloorData) -> Vec<Label> {
    let extent = floor.extent();
    let mut labels = vec![Label::Unvisited; extent.tile_count()];

    let exterior_seeds = extent.tiles().filter(|tile| {
        Direction::ALL.into_iter().any(|direction| {
            extent.neighbor(*tile, direction).is_none()
                && floor.wall(tile.boundary(direction)).is_none()
        })
    });
    flood(floor, &mut labels, exterior_seeds, Label::Exterior);

    let mut next_room = 0;
    for tile in extent.tiles() {
        let Some(index) = extent.tile_index(tile) else {
            continue;
        };
        if labels[index] != Label::Unvisited {
            continue;
        }
        flood(floor, &mut labels, std::iter::once(tile), Label::Room(next_room));
        next_room += 1;
    }

    labels
}

fn flood(
    floor: &FloorData,
    labels: &mut [Label],
    seeds: impl IntoIterator<Item = TileAddress>,
    label: Label,
) {
    let extent = floor.extent();
    let mut queue = VecDeque::new();

    for seed in seeds {
        if let Some(index) = extent.tile_index(seed) {
            if labels[index] == Label::Unvisited {
                labels[index] = label;
                queue.push_back(seed);
            }
        }
    }

    while let Some(tile) = queue.pop_front() {
        for direction in Direction::ALL {
            let Some(neighbor) = extent.neighbor(tile, direction) else {
                continue;
            };
            if floor.wall(tile.boundary(direction)).is_some() {
                continue;
            }
            let Some(index) = extent.tile_index(neighbor) else {
                continue;
            };
            if labels[index] != Label::Unvisited {
                continue;
            }
            labels[index] = label;
            queue.push_back(neighbor);
        }
    }
}

fn room_index(id: RoomId) -> usize {
    usize::try_from(id.get()).unwrap_or(usize::MAX)
}

fn row_major(tile: TileAddress) -> (u32, u32) {
    (tile.row(), tile.column())
}

/// Cached room snapshot for one floor.
#[derive(Clone, Debug)]
pub struct RoomsManager {
    extent: FloorExtent,
    rooms: Vec<Room>,
    membership: Vec<Option<RoomId>>,
}

impl Default for RoomsManager {
    fn default() -> Self {
        Self {
            extent: FloorExtent::new(0, 0),
            rooms: Vec::new(),
            membership: Vec::new(),
        }
    }
}

impl RoomsManager {
    /// Creates a manager with no rooms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a manager already rebuilt from the floor.
    #[must_use]
    pub fn from_floor(floor: &FloorData) -> Self {
        let mut manager = Self::new();
        manager.rebuild(floor);
        manager
    }

    /// Recomputes every room from the floor's current walls.
    pub fn rebuild(&mut self, floor: &FloorData) {
        self.extent = floor.extent();
        self.rooms = detect_rooms(floor);
        self.membership = vec![None; self.extent.tile_count()];
        for room in &self.rooms {
            for tile in &room.tiles {
                if let Some(index) = self.extent.tile_index(*tile) {
                    self.membership[index] = Some(room.id);
                }
            }
        }
    }

    /// Forgets every room.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Identifier of the room containing the tile.
    #[must_use]
    pub fn room_id_at(&self, tile: TileAddress) -> Option<RoomId> {
        self.extent
            .tile_index(tile)
            .and_then(|index| self.membership.get(index).copied().flatten())
    }

    /// Copy of the room containing the tile.
    #[must_use]
    pub fn room_containing(&self, tile: TileAddress) -> Option<Room> {
        let id = self.room_id_at(tile)?;
        self.rooms.get(room_index(id)).cloned()
    }

    /// Room holding every tile of the rectangle, if a single one does.
    #[must_use]
    pub fn room_enclosing(&self, footprint: TileRect) -> Option<RoomId> {
        let mut tiles = footprint.tiles();
        let first = self.room_id_at(tiles.next()?)?;
        tiles
            .all(|tile| self.room_id_at(tile) == Some(first))
            .then_some(first)
    }

    /// Copies of every room in id order.
    #[must_use]
    pub fn all_rooms(&self) -> Vec<Room> {
        self.rooms.clone()
    }

    /// Number of detected rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
