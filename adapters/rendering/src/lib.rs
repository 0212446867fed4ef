#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared mesh contracts for floorplan adapters.
//!
//! The engine never draws anything itself. After every committed edit it
//! hands a [`FloorGeometry`] snapshot to a [`MeshRenderer`], which owns the
//! actual procedural mesh.

use anyhow::{ensure, Result as AnyResult};
use floorplan_core::{
    CornerAddress, EdgeAddress, FloorExtent, ObjectId, ObjectKind, RoomId, TileAddress, TileRect,
    WallKind,
};
use glam::Vec3;

/// RGBA color attached to generated geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Default material color for a wall kind.
#[must_use]
pub fn wall_color(kind: WallKind) -> Color {
    let plaster = Color::from_rgb_u8(196, 180, 160);
    match kind {
        WallKind::Solid => plaster,
        WallKind::Half => plaster.lighten(0.35),
        WallKind::Door => Color::from_rgb_u8(120, 86, 60),
    }
}

/// Floor quad covering one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileQuad {
    /// Tile the quad covers.
    pub tile: TileAddress,
    /// Corners in north-west, north-east, south-east, south-west order.
    pub corners: [Vec3; 4],
    /// Room the tile belongs to, if any.
    pub room: Option<RoomId>,
    /// Whether an object covers the tile.
    pub occupied: bool,
}

/// Wall standing on one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    /// Edge holding the wall.
    pub edge: EdgeAddress,
    /// Construction style of the wall.
    pub kind: WallKind,
    /// Start of the segment at floor height.
    pub start: Vec3,
    /// End of the segment at floor height.
    pub end: Vec3,
    /// Material color for the wall.
    pub color: Color,
}

/// Post drawn where walls end, turn or branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerPost {
    /// Corner the post stands on.
    pub corner: CornerAddress,
    /// Post position at floor height.
    pub position: Vec3,
    /// Number of walls meeting at the corner.
    pub arms: u32,
}

/// Axis-aligned footprint box of a placed object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectBox {
    /// Identifier of the object.
    pub object: ObjectId,
    /// Kind of object.
    pub kind: ObjectKind,
    /// Tiles covered by the object.
    pub footprint: TileRect,
    /// Minimum corner of the box.
    pub min: Vec3,
    /// Maximum corner of the box.
    pub max: Vec3,
}

/// Wall outline enclosing a detected room.
#[derive(Clone, Debug, PartialEq)]
pub struct RoomOutline {
    /// Identifier of the room.
    pub room: RoomId,
    /// Boundary segments at floor height.
    pub segments: Vec<(Vec3, Vec3)>,
    /// Floor area in world units.
    pub area: f32,
}

/// World-space geometry of one floor, ready for meshing.
#[derive(Clone, Debug, PartialEq)]
pub struct FloorGeometry {
    /// Tile dimensions of the floor.
    pub extent: FloorExtent,
    /// Vertical position of the floor.
    pub floor_height: f32,
    /// Side length of one tile in world units.
    pub tile_size: f32,
    /// One quad per tile in row-major order.
    pub tiles: Vec<TileQuad>,
    /// Every standing wall.
    pub walls: Vec<WallSegment>,
    /// Posts at wall ends and junctions.
    pub posts: Vec<CornerPost>,
    /// Every placed object.
    pub objects: Vec<ObjectBox>,
    /// Every detected room.
    pub rooms: Vec<RoomOutline>,
}

impl FloorGeometry {
    /// Creates an empty geometry snapshot.
    #[must_use]
    pub const fn new(extent: FloorExtent, floor_height: f32, tile_size: f32) -> Self {
        Self {
            extent,
            floor_height,
            tile_size,
            tiles: Vec::new(),
            walls: Vec::new(),
            posts: Vec::new(),
            objects: Vec::new(),
            rooms: Vec::new(),
        }
    }
}

/// Procedural mesh collaborator owned by a floor.
pub trait MeshRenderer {
    /// Creates the mesh and attaches it to the host scene. Called once.
    fn create_and_attach(&mut self) -> AnyResult<()>;

    /// Rebuilds the mesh from a fresh geometry snapshot.
    fn regenerate(&mut self, geometry: &FloorGeometry) -> AnyResult<()>;
}

/// Renderer that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl MeshRenderer for NullRenderer {
    fn create_and_attach(&mut self) -> AnyResult<()> {
        Ok(())
    }

    fn regenerate(&mut self, _geometry: &FloorGeometry) -> AnyResult<()> {
        Ok(())
    }
}

/// Renderer that keeps the latest snapshot for inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    attach_count: u32,
    regenerate_count: u32,
    latest: Option<FloorGeometry>,
}

impl RecordingRenderer {
    /// Creates a renderer that has not been attached yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `create_and_attach` calls received.
    #[must_use]
    pub const fn attach_count(&self) -> u32 {
        self.attach_count
    }

    /// Number of `regenerate` calls received.
    #[must_use]
    pub const fn regenerate_count(&self) -> u32 {
        self.regenerate_count
    }

    /// Geometry passed to the most recent `regenerate` call.
    #[must_use]
    pub fn latest(&self) -> Option<&FloorGeometry> {
        self.latest.as_ref()
    }
}

impl MeshRenderer for RecordingRenderer {
    fn create_and_attach(&mut self) -> AnyResult<()> {
        ensure!(self.attach_count == 0, "mesh is already attached");
        self.attach_count += 1;
        Ok(())
    }

    fn regenerate(&mut self, geometry: &FloorGeometry) -> AnyResult<()> {
        ensure!(self.attach_count > 0, "mesh regenerated before it was attached");
        self.regenerate_count += 1;
        self.latest = Some(geometry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_walls_are_lighter_than_solid_walls() {
        let solid = wall_color(WallKind::Solid);
        let half = wall_color(WallKind::Half);
        assert!(half.red > solid.red);
        assert!(half.green > solid.green);
        assert!(half.blue > solid.blue);
        assert!((half.alpha - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn recording_renderer_requires_attachment_first() {
        let mut renderer = RecordingRenderer::new();
        let geometry = FloorGeometry::new(FloorExtent::new(2, 2), 0.0, 100.0);

        assert!(renderer.regenerate(&geometry).is_err());
        renderer.create_and_attach().expect("first attach succeeds");
        assert!(renderer.create_and_attach().is_err(), "second attach is refused");
        renderer.regenerate(&geometry).expect("attached renderer regenerates");

        assert_eq!(renderer.attach_count(), 1);
        assert_eq!(renderer.regenerate_count(), 1);
        assert_eq!(renderer.latest(), Some(&geometry));
    }
}
