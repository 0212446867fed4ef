#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Coordinate calculators that map world space onto floor grid addresses.
//!
//! Every lot shares the same address space shape (a `columns × rows` tile
//! grid) but places it differently in the world. [`GridTransform`] carries the
//! shared capability set; implementors only describe how a world point maps
//! into local grid units, where one unit spans one tile and `(0, 0)` is the
//! north-west corner of the floor. [`GridCalculator`] is the tagged variant
//! selected once per floor from a [`LotKey`].
//!
//! All conversions are pure. Points outside the floor produce an explicit
//! [`OutOfBounds`] value because pointer input routinely leaves the grid
//! during drags.

mod lots;

pub use lots::{LotConfig, LotConfigError, LotKey, LotLayout, LotTable};

use floorplan_core::{CornerAddress, EdgeAddress, FloorExtent, TileAddress};
use glam::Vec2;
use thiserror::Error;

/// Distance in tiles within which a point just past the border still counts
/// as lying on it, absorbing float error from world round trips.
pub const BORDER_TOLERANCE: f32 = 1e-3;

/// Reported when a world point maps outside the floor extent.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("world point {point} lies outside the floor")]
pub struct OutOfBounds {
    /// World point that failed to resolve.
    pub point: Vec2,
}

/// Nearest edge to a world point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeHit {
    /// Edge closest to the point.
    pub edge: EdgeAddress,
    /// Perpendicular distance from the point to the edge in world units.
    pub distance: f32,
}

/// Nearest corner to a world point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerHit {
    /// Corner closest to the point.
    pub corner: CornerAddress,
    /// Distance from the point to the corner in world units.
    pub distance: f32,
}

/// Shared coordinate-transform capability of every lot layout.
pub trait GridTransform {
    /// Tile dimensions of the floor.
    fn extent(&self) -> FloorExtent;

    /// Side length of one tile in world units.
    fn tile_size(&self) -> f32;

    /// Converts a world point into local grid units.
    fn to_local(&self, world: Vec2) -> Vec2;

    /// Converts local grid units back into a world point.
    fn to_world(&self, local: Vec2) -> Vec2;

    /// Converts a world point into local units, rejecting points off the floor.
    ///
    /// The far border is inclusive so corners and edges along it resolve.
    /// Points within [`BORDER_TOLERANCE`] of the border are clamped onto it.
    fn local_inside(&self, world: Vec2) -> Result<Vec2, OutOfBounds> {
        let extent = self.extent();
        let local = self.to_local(world);
        let max = Vec2::new(extent.columns() as f32, extent.rows() as f32);
        let inside = !extent.is_empty()
            && local.x >= -BORDER_TOLERANCE
            && local.y >= -BORDER_TOLERANCE
            && local.x <= max.x + BORDER_TOLERANCE
            && local.y <= max.y + BORDER_TOLERANCE;
        if inside {
            Ok(local.clamp(Vec2::ZERO, max))
        } else {
            Err(OutOfBounds { point: world })
        }
    }

    /// Tile containing the world point.
    fn world_to_tile(&self, world: Vec2) -> Result<TileAddress, OutOfBounds> {
        let local = self.local_inside(world)?;
        let extent = self.extent();
        let column = clamp_cell(local.x, extent.columns());
        let row = clamp_cell(local.y, extent.rows());
        Ok(TileAddress::new(column, row))
    }

    /// World position of the tile centre.
    fn tile_to_world(&self, tile: TileAddress) -> Vec2 {
        self.to_world(Vec2::new(
            tile.column() as f32 + 0.5,
            tile.row() as f32 + 0.5,
        ))
    }

    /// Edge nearest to the world point along with its snap distance.
    ///
    /// Ties between a horizontal and a vertical candidate favour the
    /// horizontal edge.
    fn world_to_edge(&self, world: Vec2) -> Result<EdgeHit, OutOfBounds> {
        let local = self.local_inside(world)?;
        let extent = self.extent();
        let horizontal_row = local.y.round();
        let horizontal_distance = (local.y - horizontal_row).abs();
        let vertical_column = local.x.round();
        let vertical_distance = (local.x - vertical_column).abs();

        let hit = if horizontal_distance <= vertical_distance {
            EdgeHit {
                edge: EdgeAddress::horizontal(
                    clamp_cell(local.x, extent.columns()),
                    horizontal_row as u32,
                ),
                distance: horizontal_distance * self.tile_size(),
            }
        } else {
            EdgeHit {
                edge: EdgeAddress::vertical(
                    vertical_column as u32,
                    clamp_cell(local.y, extent.rows()),
                ),
                distance: vertical_distance * self.tile_size(),
            }
        };
        Ok(hit)
    }

    /// Start and end of the edge in world space.
    fn edge_to_world(&self, edge: EdgeAddress) -> (Vec2, Vec2) {
        let (start, end) = edge.endpoints();
        (self.corner_to_world(start), self.corner_to_world(end))
    }

    /// Corner nearest to the world point along with its snap distance.
    fn world_to_corner(&self, world: Vec2) -> Result<CornerHit, OutOfBounds> {
        let local = self.local_inside(world)?;
        let snapped = local.round();
        Ok(CornerHit {
            corner: CornerAddress::new(snapped.x as u32, snapped.y as u32),
            distance: local.distance(snapped) * self.tile_size(),
        })
    }

    /// World position of the corner.
    fn corner_to_world(&self, corner: CornerAddress) -> Vec2 {
        self.to_world(Vec2::new(corner.column() as f32, corner.row() as f32))
    }
}

fn clamp_cell(value: f32, cells: u32) -> u32 {
    (value.floor() as u32).min(cells.saturating_sub(1))
}

/// Lot whose origin is the north-west corner of tile `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchoredGrid {
    origin: Vec2,
    tile_size: f32,
    extent: FloorExtent,
}

impl AnchoredGrid {
    /// Creates an anchored layout.
    #[must_use]
    pub const fn new(origin: Vec2, tile_size: f32, extent: FloorExtent) -> Self {
        Self {
            origin,
            tile_size,
            extent,
        }
    }
}

impl GridTransform for AnchoredGrid {
    fn extent(&self) -> FloorExtent {
        self.extent
    }

    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn to_local(&self, world: Vec2) -> Vec2 {
        (world - self.origin) / self.tile_size
    }

    fn to_world(&self, local: Vec2) -> Vec2 {
        self.origin + local * self.tile_size
    }
}

/// Lot whose origin is the geometric centre of the floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenteredGrid {
    center: Vec2,
    tile_size: f32,
    extent: FloorExtent,
}

impl CenteredGrid {
    /// Creates a centred layout.
    #[must_use]
    pub const fn new(center: Vec2, tile_size: f32, extent: FloorExtent) -> Self {
        Self {
            center,
            tile_size,
            extent,
        }
    }

    fn half_extent(&self) -> Vec2 {
        Vec2::new(
            self.extent.columns() as f32 * 0.5,
            self.extent.rows() as f32 * 0.5,
        )
    }
}

impl GridTransform for CenteredGrid {
    fn extent(&self) -> FloorExtent {
        self.extent
    }

    fn tile_size(&self) -> f32 {
        self.tile_size
    }

    fn to_local(&self, world: Vec2) -> Vec2 {
        (world - self.center) / self.tile_size + self.half_extent()
    }

    fn to_world(&self, local: Vec2) -> Vec2 {
        self.center + (local - self.half_extent()) * self.tile_size
    }
}

/// Coordinate calculator selected for a floor from its lot layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridCalculator {
    /// Origin at the north-west corner of the lot.
    Anchored(AnchoredGrid),
    /// Origin at the centre of the lot.
    Centered(CenteredGrid),
}

impl GridCalculator {
    /// Builds the calculator described by a lot configuration.
    #[must_use]
    pub fn for_lot(config: &LotConfig) -> Self {
        match config.layout {
            LotLayout::Anchored => Self::Anchored(AnchoredGrid::new(
                config.origin(),
                config.tile_size,
                config.extent(),
            )),
            LotLayout::Centered => Self::Centered(CenteredGrid::new(
                config.origin(),
                config.tile_size,
                config.extent(),
            )),
        }
    }
}

impl GridTransform for GridCalculator {
    fn extent(&self) -> FloorExtent {
        match self {
            Self::Anchored(grid) => grid.extent(),
            Self::Centered(grid) => grid.extent(),
        }
    }

    fn tile_size(&self) -> f32 {
        match self {
            Self::Anchored(grid) => grid.tile_size(),
            Self::Centered(grid) => grid.tile_size(),
        }
    }

    fn to_local(&self, world: Vec2) -> Vec2 {
        match self {
            Self::Anchored(grid) => grid.to_local(world),
            Self::Centered(grid) => grid.to_local(world),
        }
    }

    fn to_world(&self, local: Vec2) -> Vec2 {
        match self {
            Self::Anchored(grid) => grid.to_world(local),
            Self::Centered(grid) => grid.to_world(local),
        }
    }
}
