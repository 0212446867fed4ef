#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tile-level route search over a floor plan.
//!
//! [`PathFinder::rebuild`] snapshots which moves between neighbouring tiles
//! are legal. Every [`PathFinder::find_path`] call runs a fresh A* search over
//! that snapshot; routes are never cached.

use floorplan_core::{Direction, FloorExtent, TileAddress};
use floorplan_floor::FloorData;
use pathfinding::prelude::astar;
use thiserror::Error;

/// Failures reported by route queries.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum PathError {
    /// No route connects the endpoints.
    #[error("no path connects the requested tiles")]
    NoPath,
    /// An endpoint lies outside the floor.
    #[error("path endpoint lies outside the floor")]
    OutOfBounds,
}

/// Traversal map and A* search for one floor.
#[derive(Clone, Debug)]
pub struct PathFinder {
    extent: FloorExtent,
    open: Vec<bool>,
    moves: Vec<u8>,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self {
            extent: FloorExtent::new(0, 0),
            open: Vec::new(),
            moves: Vec::new(),
        }
    }
}

impl PathFinder {
    /// Creates a path finder with an empty traversal map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a path finder already rebuilt from the floor.
    #[must_use]
    pub fn from_floor(floor: &FloorData) -> Self {
        let mut finder = Self::new();
        finder.rebuild(floor);
        finder
    }

    /// Captures the floor's blocking walls and occupied tiles.
    pub fn rebuild(&mut self, floor: &FloorData) {
        let extent = floor.extent();
        self.extent = extent;
        self.open = floor.tiles().map(|tile| !tile.is_occupied()).collect();
        self.moves = vec![0; extent.tile_count()];

        for (index, tile) in extent.tiles().enumerate() {
            if !self.open[index] {
                continue;
            }
            let mut mask = 0;
            for direction in Direction::ALL {
                let Some(neighbor) = extent.neighbor(tile, direction) else {
                    continue;
                };
                if floor.occupant(neighbor).is_some() || floor.is_blocked_between(tile, neighbor)
                {
                    continue;
                }
                mask |= move_bit(direction);
            }
            self.moves[index] = mask;
        }
    }

    /// Forgets the traversal map.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reports whether a route may pass through the tile.
    #[must_use]
    pub fn is_traversable(&self, tile: TileAddress) -> bool {
        self.extent
            .tile_index(tile)
            .map_or(false, |index| self.open[index])
    }

    /// Reports whether a single step from the tile in the direction is legal.
    #[must_use]
    pub fn can_step(&self, tile: TileAddress, direction: Direction) -> bool {
        self.extent
            .tile_index(tile)
            .map_or(false, |index| self.moves[index] & move_bit(direction) != 0)
    }

    /// Shortest route between two tiles, endpoints included.
    ///
    /// Steps cost one and the search expands neighbours in north, east, south,
    /// west order, so identical topology always yields the identical route.
    pub fn find_path(
        &self,
        from: TileAddress,
        to: TileAddress,
    ) -> Result<Vec<TileAddress>, PathError> {
        if !self.extent.contains_tile(from) || !self.extent.contains_tile(to) {
            return Err(PathError::OutOfBounds);
        }
        if !self.is_traversable(from) || !self.is_traversable(to) {
            return Err(PathError::NoPath);
        }
        if from == to {
            return Ok(vec![from]);
        }

        astar(
            &from,
            |tile| self.successors(*tile),
            |tile| tile.manhattan_distance(to),
            |tile| *tile == to,
        )
        .map(|(path, _cost)| path)
        .ok_or(PathError::NoPath)
    }

    fn successors(&self, tile: TileAddress) -> impl Iterator<Item = (TileAddress, u32)> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |direction| self.can_step(tile, *direction))
            .filter_map(move |direction| self.extent.neighbor(tile, direction))
            .map(|neighbor| (neighbor, 1))
    }
}

const fn move_bit(direction: Direction) -> u8 {
    match direction {
        Direction::North => 0b0001,
        Direction::East => 0b0010,
        Direction::South => 0b0100,
        Direction::West => 0b1000,
    }
}
