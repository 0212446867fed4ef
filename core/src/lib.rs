#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the floorplan engine.
//!
//! This crate defines the addressing scheme and message surface that connect
//! the click router, the interaction systems and the authoritative floor
//! state. The click router emits [`EditCommand`] values describing desired
//! edits, interaction systems validate and apply them to the floor, and the
//! floor reports every accepted mutation as a [`FloorEvent`] so dependent
//! systems (rooms, pathfinding, mesh regeneration) can react synchronously.
//!
//! Tiles are addressed by column and row. Rows grow toward the south. Edges
//! are stored once per boundary, so the wall between two tiles has exactly one
//! [`EdgeAddress`] no matter which side it is looked up from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cardinal directions on the tile grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    North,
    /// Toward increasing column indices.
    East,
    /// Toward increasing row indices.
    South,
    /// Toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in the fixed order used by neighbour expansion.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Location of a single tile expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileAddress {
    column: u32,
    row: u32,
}

impl TileAddress {
    /// Creates a new tile address.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two tiles.
    #[must_use]
    pub fn manhattan_distance(self, other: TileAddress) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Tile one step away in the provided direction, ignoring floor bounds.
    ///
    /// Returns `None` only when the step would underflow or overflow the
    /// coordinate space.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<TileAddress> {
        match direction {
            Direction::North => Some(Self::new(self.column, self.row.checked_sub(1)?)),
            Direction::East => Some(Self::new(self.column.checked_add(1)?, self.row)),
            Direction::South => Some(Self::new(self.column, self.row.checked_add(1)?)),
            Direction::West => Some(Self::new(self.column.checked_sub(1)?, self.row)),
        }
    }

    /// Edge lying on the provided side of the tile.
    #[must_use]
    pub fn boundary(self, side: Direction) -> EdgeAddress {
        match side {
            Direction::North => EdgeAddress::horizontal(self.column, self.row),
            Direction::South => EdgeAddress::horizontal(self.column, self.row.saturating_add(1)),
            Direction::West => EdgeAddress::vertical(self.column, self.row),
            Direction::East => EdgeAddress::vertical(self.column.saturating_add(1), self.row),
        }
    }
}

/// Grid vertex shared by up to four tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CornerAddress {
    column: u32,
    row: u32,
}

impl CornerAddress {
    /// Creates a new corner address.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Column of the vertex, ranging over `0..=columns`.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Row of the vertex, ranging over `0..=rows`.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Edge leaving the corner in the provided direction, ignoring bounds.
    #[must_use]
    pub fn arm(self, direction: Direction) -> Option<EdgeAddress> {
        match direction {
            Direction::North => Some(EdgeAddress::vertical(
                self.column,
                self.row.checked_sub(1)?,
            )),
            Direction::East => Some(EdgeAddress::horizontal(self.column, self.row)),
            Direction::South => Some(EdgeAddress::vertical(self.column, self.row)),
            Direction::West => Some(EdgeAddress::horizontal(
                self.column.checked_sub(1)?,
                self.row,
            )),
        }
    }
}

/// Orientation of an edge segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    /// Runs west to east, separating a tile from its northern neighbour.
    Horizontal,
    /// Runs north to south, separating a tile from its western neighbour.
    Vertical,
}

/// Boundary segment between two tiles, or between a tile and the exterior.
///
/// A horizontal edge `(c, r)` spans corners `(c, r)` to `(c + 1, r)` and
/// separates tile `(c, r - 1)` from tile `(c, r)`. A vertical edge `(c, r)`
/// spans corners `(c, r)` to `(c, r + 1)` and separates tile `(c - 1, r)` from
/// tile `(c, r)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeAddress {
    orientation: Orientation,
    column: u32,
    row: u32,
}

impl EdgeAddress {
    /// Creates a horizontal edge address.
    #[must_use]
    pub const fn horizontal(column: u32, row: u32) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            column,
            row,
        }
    }

    /// Creates a vertical edge address.
    #[must_use]
    pub const fn vertical(column: u32, row: u32) -> Self {
        Self {
            orientation: Orientation::Vertical,
            column,
            row,
        }
    }

    /// Orientation of the edge.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Column component of the edge address.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Row component of the edge address.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Edge separating two orthogonally adjacent tiles.
    ///
    /// The result is the same regardless of argument order. Returns `None`
    /// when the tiles are not neighbours.
    #[must_use]
    pub fn between(a: TileAddress, b: TileAddress) -> Option<Self> {
        if a.row() == b.row() {
            if b.column().checked_sub(a.column()) == Some(1) {
                return Some(Self::vertical(b.column(), a.row()));
            }
            if a.column().checked_sub(b.column()) == Some(1) {
                return Some(Self::vertical(a.column(), a.row()));
            }
        } else if a.column() == b.column() {
            if b.row().checked_sub(a.row()) == Some(1) {
                return Some(Self::horizontal(a.column(), b.row()));
            }
            if a.row().checked_sub(b.row()) == Some(1) {
                return Some(Self::horizontal(a.column(), a.row()));
            }
        }
        None
    }

    /// Corners at the start and end of the segment.
    #[must_use]
    pub fn endpoints(self) -> (CornerAddress, CornerAddress) {
        let start = CornerAddress::new(self.column, self.row);
        let end = match self.orientation {
            Orientation::Horizontal => {
                CornerAddress::new(self.column.saturating_add(1), self.row)
            }
            Orientation::Vertical => CornerAddress::new(self.column, self.row.saturating_add(1)),
        };
        (start, end)
    }

    /// Tiles on either side of the edge, ignoring floor bounds.
    ///
    /// The first entry is the northern (horizontal) or western (vertical)
    /// tile; it is `None` when the edge lies on the zero row or column.
    #[must_use]
    pub fn sides(self) -> (Option<TileAddress>, TileAddress) {
        match self.orientation {
            Orientation::Horizontal => (
                self.row
                    .checked_sub(1)
                    .map(|row| TileAddress::new(self.column, row)),
                TileAddress::new(self.column, self.row),
            ),
            Orientation::Vertical => (
                self.column
                    .checked_sub(1)
                    .map(|column| TileAddress::new(column, self.row)),
                TileAddress::new(self.column, self.row),
            ),
        }
    }
}

/// Tiles separated by an edge, restricted to those inside the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSides {
    /// Northern or western tile, `None` when it lies outside the floor.
    pub first: Option<TileAddress>,
    /// Southern or eastern tile, `None` when it lies outside the floor.
    pub second: Option<TileAddress>,
}

impl EdgeSides {
    /// Reports whether one side of the edge is the exterior.
    #[must_use]
    pub const fn is_perimeter(&self) -> bool {
        self.first.is_none() || self.second.is_none()
    }
}

/// Dimensions of a floor measured in whole tiles.
///
/// Provides bounds checks and dense row-major indexing for tiles, edges and
/// corners so every storage layer agrees on the same address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloorExtent {
    columns: u32,
    rows: u32,
}

impl FloorExtent {
    /// Creates a new extent descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the extent contains no tiles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Total number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        dense_count(self.columns, self.rows)
    }

    /// Number of horizontal edges, `columns × (rows + 1)`.
    #[must_use]
    pub fn horizontal_edge_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        dense_count(self.columns, self.rows.saturating_add(1))
    }

    /// Number of vertical edges, `(columns + 1) × rows`.
    #[must_use]
    pub fn vertical_edge_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        dense_count(self.columns.saturating_add(1), self.rows)
    }

    /// Total number of edges of both orientations.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.horizontal_edge_count() + self.vertical_edge_count()
    }

    /// Total number of corners, `(columns + 1) × (rows + 1)`.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        dense_count(self.columns.saturating_add(1), self.rows.saturating_add(1))
    }

    /// Reports whether the tile lies inside the floor.
    #[must_use]
    pub const fn contains_tile(&self, tile: TileAddress) -> bool {
        tile.column < self.columns && tile.row < self.rows
    }

    /// Reports whether the edge belongs to the floor.
    #[must_use]
    pub const fn contains_edge(&self, edge: EdgeAddress) -> bool {
        if self.columns == 0 || self.rows == 0 {
            return false;
        }
        match edge.orientation {
            Orientation::Horizontal => edge.column < self.columns && edge.row <= self.rows,
            Orientation::Vertical => edge.column <= self.columns && edge.row < self.rows,
        }
    }

    /// Reports whether the corner belongs to the floor.
    #[must_use]
    pub const fn contains_corner(&self, corner: CornerAddress) -> bool {
        if self.columns == 0 || self.rows == 0 {
            return false;
        }
        corner.column <= self.columns && corner.row <= self.rows
    }

    /// Reports whether every tile of the rectangle lies inside the floor.
    #[must_use]
    pub fn contains_rect(&self, rect: TileRect) -> bool {
        if rect.size.width == 0 || rect.size.height == 0 {
            return false;
        }
        let Some(last_column) = rect.origin.column.checked_add(rect.size.width - 1) else {
            return false;
        };
        let Some(last_row) = rect.origin.row.checked_add(rect.size.height - 1) else {
            return false;
        };
        self.contains_tile(rect.origin)
            && self.contains_tile(TileAddress::new(last_column, last_row))
    }

    /// Row-major dense index of the tile.
    #[must_use]
    pub fn tile_index(&self, tile: TileAddress) -> Option<usize> {
        if !self.contains_tile(tile) {
            return None;
        }
        dense_index(self.columns, tile.column, tile.row)
    }

    /// Tile stored at the provided dense index.
    #[must_use]
    pub fn tile_at(&self, index: usize) -> Option<TileAddress> {
        let (column, row) = split_index(self.columns, index)?;
        let tile = TileAddress::new(column, row);
        self.contains_tile(tile).then_some(tile)
    }

    /// Dense index of the edge; horizontal edges precede vertical ones.
    #[must_use]
    pub fn edge_index(&self, edge: EdgeAddress) -> Option<usize> {
        if !self.contains_edge(edge) {
            return None;
        }
        match edge.orientation {
            Orientation::Horizontal => dense_index(self.columns, edge.column, edge.row),
            Orientation::Vertical => {
                let offset = dense_index(self.columns.checked_add(1)?, edge.column, edge.row)?;
                self.horizontal_edge_count().checked_add(offset)
            }
        }
    }

    /// Edge stored at the provided dense index.
    #[must_use]
    pub fn edge_at(&self, index: usize) -> Option<EdgeAddress> {
        let horizontal = self.horizontal_edge_count();
        let edge = if index < horizontal {
            let (column, row) = split_index(self.columns, index)?;
            EdgeAddress::horizontal(column, row)
        } else {
            let (column, row) = split_index(self.columns.checked_add(1)?, index - horizontal)?;
            EdgeAddress::vertical(column, row)
        };
        self.contains_edge(edge).then_some(edge)
    }

    /// Row-major dense index of the corner.
    #[must_use]
    pub fn corner_index(&self, corner: CornerAddress) -> Option<usize> {
        if !self.contains_corner(corner) {
            return None;
        }
        dense_index(self.columns.checked_add(1)?, corner.column, corner.row)
    }

    /// Corner stored at the provided dense index.
    #[must_use]
    pub fn corner_at(&self, index: usize) -> Option<CornerAddress> {
        let (column, row) = split_index(self.columns.checked_add(1)?, index)?;
        let corner = CornerAddress::new(column, row);
        self.contains_corner(corner).then_some(corner)
    }

    /// Tiles on either side of the edge that lie inside the floor.
    #[must_use]
    pub fn edge_sides(&self, edge: EdgeAddress) -> EdgeSides {
        let (first, second) = edge.sides();
        EdgeSides {
            first: first.filter(|tile| self.contains_tile(*tile)),
            second: Some(second).filter(|tile| self.contains_tile(*tile)),
        }
    }

    /// In-bounds neighbour of the tile in the provided direction.
    #[must_use]
    pub fn neighbor(&self, tile: TileAddress, direction: Direction) -> Option<TileAddress> {
        tile.step(direction)
            .filter(|neighbor| self.contains_tile(*neighbor))
    }

    /// Iterates every tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = TileAddress> {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| TileAddress::new(column, row)))
    }
}

fn dense_count(columns: u32, rows: u32) -> usize {
    let count = u64::from(columns) * u64::from(rows);
    usize::try_from(count).unwrap_or(0)
}

fn dense_index(width: u32, column: u32, row: u32) -> Option<usize> {
    let width = usize::try_from(width).ok()?;
    let column = usize::try_from(column).ok()?;
    let row = usize::try_from(row).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

fn split_index(width: u32, index: usize) -> Option<(u32, u32)> {
    let width = usize::try_from(width).ok()?;
    if width == 0 {
        return None;
    }
    let column = u32::try_from(index % width).ok()?;
    let row = u32::try_from(index / width).ok()?;
    Some((column, row))
}

/// Size of a [`TileRect`] measured in whole tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRectSize {
    width: u32,
    height: u32,
}

impl TileRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in tiles.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in tiles.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Axis-aligned rectangle expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    origin: TileAddress,
    size: TileRectSize,
}

impl TileRect {
    /// Constructs a rectangle from an origin tile and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: TileAddress, size: TileRectSize) -> Self {
        Self { origin, size }
    }

    /// Smallest rectangle containing both tiles.
    #[must_use]
    pub fn spanning(a: TileAddress, b: TileAddress) -> Self {
        let origin = TileAddress::new(a.column.min(b.column), a.row.min(b.row));
        let size = TileRectSize::new(
            a.column.abs_diff(b.column) + 1,
            a.row.abs_diff(b.row) + 1,
        );
        Self { origin, size }
    }

    /// North-west tile anchoring the rectangle.
    #[must_use]
    pub const fn origin(&self) -> TileAddress {
        self.origin
    }

    /// Dimensions of the rectangle.
    #[must_use]
    pub const fn size(&self) -> TileRectSize {
        self.size
    }

    /// Number of tiles covered by the rectangle.
    #[must_use]
    pub fn area(&self) -> u64 {
        u64::from(self.size.width) * u64::from(self.size.height)
    }

    /// Reports whether the tile lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, tile: TileAddress) -> bool {
        let column_offset = tile.column.checked_sub(self.origin.column);
        let row_offset = tile.row.checked_sub(self.origin.row);
        matches!(
            (column_offset, row_offset),
            (Some(column), Some(row)) if column < self.size.width && row < self.size.height
        )
    }

    /// Iterates the covered tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = TileAddress> {
        let origin = self.origin;
        let width = self.size.width;
        (0..self.size.height).flat_map(move |row| {
            (0..width).map(move |column| {
                TileAddress::new(
                    origin.column.saturating_add(column),
                    origin.row.saturating_add(row),
                )
            })
        })
    }

    /// Edges enclosing the rectangle, clockwise from the north-west corner.
    #[must_use]
    pub fn perimeter_edges(&self) -> Vec<EdgeAddress> {
        let mut edges = Vec::new();
        let west = self.origin.column;
        let north = self.origin.row;
        let east = west.saturating_add(self.size.width);
        let south = north.saturating_add(self.size.height);

        for column in west..east {
            edges.push(EdgeAddress::horizontal(column, north));
        }
        for row in north..south {
            edges.push(EdgeAddress::vertical(east, row));
        }
        for column in (west..east).rev() {
            edges.push(EdgeAddress::horizontal(column, south));
        }
        for row in (north..south).rev() {
            edges.push(EdgeAddress::vertical(west, row));
        }
        edges
    }

    /// Edges separating two tiles that both lie inside the rectangle.
    #[must_use]
    pub fn interior_edges(&self) -> Vec<EdgeAddress> {
        let mut edges = Vec::new();
        for tile in self.tiles() {
            for direction in [Direction::East, Direction::South] {
                if let Some(neighbor) = tile.step(direction) {
                    if self.contains(neighbor) {
                        edges.push(tile.boundary(direction));
                    }
                }
            }
        }
        edges
    }
}

/// Construction style of a wall segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    /// Full-height wall.
    Solid,
    /// Waist-high wall; still blocks movement.
    Half,
    /// Doorway; encloses rooms but can be walked through.
    Door,
}

impl WallKind {
    /// Reports whether actors are prevented from crossing the wall.
    #[must_use]
    pub const fn blocks_movement(self) -> bool {
        match self {
            Self::Solid | Self::Half => true,
            Self::Door => false,
        }
    }
}

/// Types of objects that can be placed on a floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Single-tile seat.
    Chair,
    /// Two tiles wide, one tile deep.
    Table,
    /// Two by two tiles; needs an enclosing room.
    Bed,
    /// Two tiles wide, one tile deep; needs an enclosing room.
    Bathtub,
}

impl ObjectKind {
    /// Footprint size occupied by the object, anchored at its north-west tile.
    #[must_use]
    pub const fn footprint(self) -> TileRectSize {
        match self {
            Self::Chair => TileRectSize::new(1, 1),
            Self::Table | Self::Bathtub => TileRectSize::new(2, 1),
            Self::Bed => TileRectSize::new(2, 2),
        }
    }

    /// Reports whether the object must sit entirely inside one room.
    #[must_use]
    pub const fn requires_room(self) -> bool {
        matches!(self, Self::Bed | Self::Bathtub)
    }
}

/// Unique identifier assigned to a placed object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates a new object identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier assigned to a detected room within one room snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(u32);

impl RoomId {
    /// Creates a new room identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Edit tools the host can activate in build mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditTool {
    /// Drags a straight run of walls between two corners.
    BuildWall(WallKind),
    /// Drags a straight run of corners whose walls are demolished.
    RemoveWall,
    /// Drags a tile rectangle whose perimeter is walled in.
    BuildRoom(WallKind),
    /// Places an object anchored at the released tile.
    PlaceObject(ObjectKind),
    /// Removes the object covering the released tile.
    RemoveObject,
}

impl EditTool {
    /// Reports whether the tool targets grid corners rather than tiles.
    #[must_use]
    pub const fn targets_corners(self) -> bool {
        matches!(self, Self::BuildWall(_) | Self::RemoveWall)
    }
}

/// Wall edits accumulated by a wall or room gesture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallAction {
    /// Raises walls of the provided kind on every listed edge.
    Build {
        /// Edges receiving a wall.
        edges: Vec<EdgeAddress>,
        /// Kind of wall to raise.
        kind: WallKind,
    },
    /// Removes the walls on every listed edge.
    Demolish {
        /// Edges whose walls are removed.
        edges: Vec<EdgeAddress>,
    },
}

impl WallAction {
    /// Edges touched by the action.
    #[must_use]
    pub fn edges(&self) -> &[EdgeAddress] {
        match self {
            Self::Build { edges, .. } | Self::Demolish { edges } => edges,
        }
    }
}

/// Object edits produced by an object gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectAction {
    /// Places a new object anchored at the provided tile.
    Place {
        /// Kind of object to place.
        kind: ObjectKind,
        /// North-west tile of the footprint.
        anchor: TileAddress,
    },
    /// Removes whichever object covers the provided tile.
    Remove {
        /// Tile covered by the object targeted for removal.
        tile: TileAddress,
    },
}

/// Edits committed by the click router at the end of a gesture.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditCommand {
    /// Wall mutation routed to the wall interactions.
    Walls(WallAction),
    /// Object mutation routed to the object interactions.
    Object(ObjectAction),
}

/// Events reported by the floor after accepting a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloorEvent {
    /// Wall topology changed on a single edge.
    EdgeChanged {
        /// Edge whose state changed.
        edge: EdgeAddress,
        /// New wall on the edge, `None` when removed.
        wall: Option<WallKind>,
    },
    /// A tile gained or lost its occupant.
    TileOccupancyChanged {
        /// Tile whose occupant changed.
        tile: TileAddress,
        /// New occupant, `None` when vacated.
        occupant: Option<ObjectId>,
    },
    /// An object was placed on the floor.
    ObjectPlaced {
        /// Identifier allocated to the object.
        object: ObjectId,
        /// Kind of object placed.
        kind: ObjectKind,
        /// Tiles covered by the object.
        footprint: TileRect,
    },
    /// An object was removed from the floor.
    ObjectRemoved {
        /// Identifier of the removed object.
        object: ObjectId,
        /// Tiles the object previously covered.
        footprint: TileRect,
    },
}

impl FloorEvent {
    /// Reports whether the event alters wall topology.
    #[must_use]
    pub const fn changes_topology(&self) -> bool {
        matches!(self, Self::EdgeChanged { .. })
    }
}

/// Failures reported by floor storage primitives.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum FloorError {
    /// The address lies outside the configured floor extent.
    #[error("address lies outside the configured floor extent")]
    OutOfBounds,
    /// The tile already holds an occupant.
    #[error("tile ({}, {}) is already occupied by object {}", .tile.column(), .tile.row(), .occupant.get())]
    TileOccupied {
        /// Tile that rejected the occupant.
        tile: TileAddress,
        /// Object currently occupying the tile.
        occupant: ObjectId,
    },
    /// No object with the identifier exists on the floor.
    #[error("no object with identifier {} exists on this floor", .0.get())]
    MissingObject(ObjectId),
}

/// Reasons an edit is refused by the interaction systems.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The edit reaches outside the floor.
    #[error("edit reaches outside the floor")]
    OutOfBounds,
    /// The edit conflicts with an occupied tile or object footprint.
    #[error("edit conflicts with an occupied tile")]
    Occupied,
    /// Removing the walls would leave a room-bound object outside any room.
    #[error("removing these walls would leave object {} outside a room", .object.get())]
    WouldOrphanObject {
        /// First object that would lose its enclosing room.
        object: ObjectId,
    },
    /// The object needs an enclosing room that the target lacks.
    #[error("object requires an enclosing room")]
    NotEnclosed,
    /// The object footprint straddles an existing wall.
    #[error("object footprint straddles a wall")]
    CrossesWall,
    /// No object covers the targeted tile.
    #[error("no object to remove at the targeted tile")]
    MissingObject,
}

impl From<FloorError> for Rejection {
    fn from(error: FloorError) -> Self {
        match error {
            FloorError::OutOfBounds => Self::OutOfBounds,
            FloorError::TileOccupied { .. } => Self::Occupied,
            FloorError::MissingObject(_) => Self::MissingObject,
        }
    }
}
