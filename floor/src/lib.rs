#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative floor state: tiles, walls on tile edges, derived corners and
//! placed objects.
//!
//! Every mutation reports what changed through [`FloorEvent`] values pushed
//! into a caller-provided buffer. Mutations that leave state unchanged push
//! nothing, so an empty buffer means dependent systems have nothing to redo.

mod objects;

pub use objects::{ObjectsData, PlacedObject};

use floorplan_core::{
    CornerAddress, Direction, EdgeAddress, EdgeSides, FloorError, FloorEvent, FloorExtent,
    ObjectId, TileAddress, WallKind,
};

/// Single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    /// Address of the tile.
    pub address: TileAddress,
    /// Object covering the tile, if any.
    pub occupant: Option<ObjectId>,
}

impl Tile {
    /// Reports whether an object covers the tile.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Snapshot of a single edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Address of the edge.
    pub address: EdgeAddress,
    /// Wall standing on the edge, if any.
    pub wall: Option<WallKind>,
    /// In-bounds tiles on either side of the edge.
    pub sides: EdgeSides,
}

impl Edge {
    /// Reports whether a wall of any kind stands on the edge.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.wall.is_some()
    }
}

/// Set of walls meeting at a corner, one bit per direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CornerArms(u8);

impl CornerArms {
    /// Reports whether a wall leaves the corner in the provided direction.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & arm_bit(direction) != 0
    }

    /// Reports whether no wall touches the corner.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of walls meeting at the corner.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Reports whether the corner needs a post: a wall ends, turns or branches
    /// there rather than passing straight through.
    #[must_use]
    pub const fn needs_post(self) -> bool {
        let north_south = arm_bit(Direction::North) | arm_bit(Direction::South);
        let east_west = arm_bit(Direction::East) | arm_bit(Direction::West);
        !self.is_empty() && self.0 != north_south && self.0 != east_west
    }

    /// Directions with a wall, in north/east/south/west order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }

    fn with(self, direction: Direction) -> Self {
        Self(self.0 | arm_bit(direction))
    }
}

const fn arm_bit(direction: Direction) -> u8 {
    match direction {
        Direction::North => 0b0001,
        Direction::East => 0b0010,
        Direction::South => 0b0100,
        Direction::West => 0b1000,
    }
}

/// Snapshot of a single corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Corner {
    /// Address of the corner.
    pub address: CornerAddress,
    /// Walls meeting at the corner.
    pub arms: CornerArms,
}

/// Tile grid, edge grid and corner grid of one floor.
///
/// Wall presence is stored once per edge, so a wall reads the same from both
/// adjacent tiles. Corner arms are cached and refreshed whenever one of the
/// corner's incident edges changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorData {
    extent: FloorExtent,
    occupants: Vec<Option<ObjectId>>,
    walls: Vec<Option<WallKind>>,
    corners: Vec<CornerArms>,
}

impl FloorData {
    /// Creates an empty floor of the provided size.
    #[must_use]
    pub fn new(extent: FloorExtent) -> Self {
        Self {
            extent,
            occupants: vec![None; extent.tile_count()],
            walls: vec![None; extent.edge_count()],
            corners: vec![CornerArms::default(); extent.corner_count()],
        }
    }

    /// Tile dimensions of the floor.
    #[must_use]
    pub const fn extent(&self) -> FloorExtent {
        self.extent
    }

    /// Clears the floor and resizes it to the new extent.
    pub fn resize(&mut self, extent: FloorExtent) {
        *self = Self::new(extent);
    }

    /// Looks up a tile.
    pub fn tile(&self, address: TileAddress) -> Result<Tile, FloorError> {
        let index = self
            .extent
            .tile_index(address)
            .ok_or(FloorError::OutOfBounds)?;
        Ok(Tile {
            address,
            occupant: self.occupants[index],
        })
    }

    /// Looks up an edge.
    pub fn edge(&self, address: EdgeAddress) -> Result<Edge, FloorError> {
        let index = self
            .extent
            .edge_index(address)
            .ok_or(FloorError::OutOfBounds)?;
        Ok(Edge {
            address,
            wall: self.walls[index],
            sides: self.extent.edge_sides(address),
        })
    }

    /// Looks up a corner.
    pub fn corner(&self, address: CornerAddress) -> Result<Corner, FloorError> {
        let index = self
            .extent
            .corner_index(address)
            .ok_or(FloorError::OutOfBounds)?;
        Ok(Corner {
            address,
            arms: self.corners[index],
        })
    }

    /// Wall standing on the edge; `None` for empty or out-of-range edges.
    #[must_use]
    pub fn wall(&self, address: EdgeAddress) -> Option<WallKind> {
        self.extent
            .edge_index(address)
            .and_then(|index| self.walls[index])
    }

    /// Edge separating two adjacent tiles; `None` when they are not adjacent
    /// or the edge lies outside the floor.
    #[must_use]
    pub fn edge_between(&self, a: TileAddress, b: TileAddress) -> Option<Edge> {
        EdgeAddress::between(a, b).and_then(|edge| self.edge(edge).ok())
    }

    /// Reports whether a movement-blocking wall separates two adjacent tiles.
    #[must_use]
    pub fn is_blocked_between(&self, a: TileAddress, b: TileAddress) -> bool {
        self.edge_between(a, b)
            .and_then(|edge| edge.wall)
            .map_or(false, WallKind::blocks_movement)
    }

    /// Object covering the tile; `None` for empty or out-of-range tiles.
    #[must_use]
    pub fn occupant(&self, address: TileAddress) -> Option<ObjectId> {
        self.extent
            .tile_index(address)
            .and_then(|index| self.occupants[index])
    }

    /// Places or removes a wall on an edge.
    ///
    /// Returns `Ok(false)` without emitting events when the edge already holds
    /// the requested state. Otherwise refreshes both endpoint corners and
    /// pushes [`FloorEvent::EdgeChanged`].
    pub fn set_edge(
        &mut self,
        address: EdgeAddress,
        wall: Option<WallKind>,
        out_events: &mut Vec<FloorEvent>,
    ) -> Result<bool, FloorError> {
        let index = self
            .extent
            .edge_index(address)
            .ok_or(FloorError::OutOfBounds)?;
        if self.walls[index] == wall {
            return Ok(false);
        }

        self.walls[index] = wall;
        let (start, end) = address.endpoints();
        self.refresh_corner(start);
        self.refresh_corner(end);
        out_events.push(FloorEvent::EdgeChanged {
            edge: address,
            wall,
        });
        Ok(true)
    }

    /// Assigns or clears the object covering a tile.
    ///
    /// Clearing always succeeds. Assigning fails with
    /// [`FloorError::TileOccupied`] when the tile already has an occupant.
    pub fn set_tile_occupant(
        &mut self,
        address: TileAddress,
        occupant: Option<ObjectId>,
        out_events: &mut Vec<FloorEvent>,
    ) -> Result<(), FloorError> {
        let index = self
            .extent
            .tile_index(address)
            .ok_or(FloorError::OutOfBounds)?;
        let current = self.occupants[index];
        if let (Some(existing), Some(_)) = (current, occupant) {
            return Err(FloorError::TileOccupied {
                tile: address,
                occupant: existing,
            });
        }
        if current == occupant {
            return Ok(());
        }

        self.occupants[index] = occupant;
        out_events.push(FloorEvent::TileOccupancyChanged {
            tile: address,
            occupant,
        });
        Ok(())
    }

    /// Iterates every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.extent
            .tiles()
            .zip(self.occupants.iter().copied())
            .map(|(address, occupant)| Tile { address, occupant })
    }

    /// Iterates every edge that holds a wall, horizontal edges first.
    pub fn present_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.walls.iter().enumerate().filter_map(|(index, wall)| {
            let wall = (*wall)?;
            let address = self.extent.edge_at(index)?;
            Some(Edge {
                address,
                wall: Some(wall),
                sides: self.extent.edge_sides(address),
            })
        })
    }

    /// Iterates every corner touched by at least one wall.
    pub fn corners_with_arms(&self) -> impl Iterator<Item = Corner> + '_ {
        self.corners
            .iter()
            .enumerate()
            .filter(|(_, arms)| !arms.is_empty())
            .filter_map(|(index, arms)| {
                Some(Corner {
                    address: self.extent.corner_at(index)?,
                    arms: *arms,
                })
            })
    }

    fn refresh_corner(&mut self, corner: CornerAddress) {
        let Some(index) = self.extent.corner_index(corner) else {
            return;
        };
        let arms = Direction::ALL
            .into_iter()
            .filter(|direction| {
                corner
                    .arm(*direction)
                    .map_or(false, |edge| self.wall(edge).is_some())
            })
            .fold(CornerArms::default(), CornerArms::with);
        self.corners[index] = arms;
    }
}
