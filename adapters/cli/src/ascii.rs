//! Text renderer used by the command-line adapter.

use anyhow::{ensure, Result as AnyResult};
use floorplan_core::{ObjectKind, Orientation, TileAddress, WallKind};
use floorplan_rendering::{FloorGeometry, MeshRenderer};

/// Mesh renderer that draws the floor plan as text.
#[derive(Debug, Default)]
pub(crate) struct AsciiRenderer {
    attached: bool,
    regenerations: u32,
    frame: String,
}

impl AsciiRenderer {
    /// Most recently drawn plan.
    pub(crate) fn frame(&self) -> &str {
        &self.frame
    }

    /// Number of plans drawn so far.
    pub(crate) const fn regenerations(&self) -> u32 {
        self.regenerations
    }
}

impl MeshRenderer for AsciiRenderer {
    fn create_and_attach(&mut self) -> AnyResult<()> {
        ensure!(!self.attached, "ascii renderer is already attached");
        self.attached = true;
        Ok(())
    }

    fn regenerate(&mut self, geometry: &FloorGeometry) -> AnyResult<()> {
        ensure!(self.attached, "ascii renderer regenerated before attach");
        self.regenerations += 1;
        self.frame = render_plan(geometry, &[]);
        Ok(())
    }
}

/// Draws tiles, walls, posts and objects, marking `path` tiles with `*`.
///
/// Corners and edges sit on even rows and columns of the character grid;
/// tiles sit on odd ones.
pub(crate) fn render_plan(geometry: &FloorGeometry, path: &[TileAddress]) -> String {
    let width = cells(geometry.extent.columns());
    let height = cells(geometry.extent.rows());
    let mut canvas = vec![vec![' '; width]; height];

    for quad in &geometry.tiles {
        let glyph = match quad.room {
            Some(room) => char::from_digit(room.get() % 10, 10).unwrap_or('#'),
            None => '.',
        };
        put(&mut canvas, tile_cell(quad.tile), glyph);
    }

    for object in &geometry.objects {
        let glyph = match object.kind {
            ObjectKind::Chair => 'c',
            ObjectKind::Table => 't',
            ObjectKind::Bed => 'b',
            ObjectKind::Bathtub => 'u',
        };
        for tile in object.footprint.tiles() {
            put(&mut canvas, tile_cell(tile), glyph);
        }
    }

    for tile in path {
        put(&mut canvas, tile_cell(*tile), '*');
    }

    for wall in &geometry.walls {
        let column = cell(wall.edge.column());
        let row = cell(wall.edge.row());
        let (position, glyph) = match (wall.edge.orientation(), wall.kind) {
            (Orientation::Horizontal, WallKind::Solid) => ((column + 1, row), '-'),
            (Orientation::Horizontal, WallKind::Half) => ((column + 1, row), '~'),
            (Orientation::Vertical, WallKind::Solid) => ((column, row + 1), '|'),
            (Orientation::Vertical, WallKind::Half) => ((column, row + 1), '!'),
            (Orientation::Horizontal, WallKind::Door) => ((column + 1, row), 'D'),
            (Orientation::Vertical, WallKind::Door) => ((column, row + 1), 'D'),
        };
        put(&mut canvas, position, glyph);
    }

    for post in &geometry.posts {
        put(
            &mut canvas,
            (cell(post.corner.column()), cell(post.corner.row())),
            '+',
        );
    }

    let mut plan = String::with_capacity(height * (width + 1));
    for line in canvas {
        let line: String = line.into_iter().collect();
        plan.push_str(line.trim_end());
        plan.push('\n');
    }
    plan
}

fn cells(tiles: u32) -> usize {
    cell(tiles) + 1
}

fn cell(index: u32) -> usize {
    usize::try_from(index).unwrap_or(0) * 2
}

fn tile_cell(tile: TileAddress) -> (usize, usize) {
    (cell(tile.column()) + 1, cell(tile.row()) + 1)
}

fn put(canvas: &mut [Vec<char>], (column, row): (usize, usize), glyph: char) {
    if let Some(slot) = canvas.get_mut(row).and_then(|line| line.get_mut(column)) {
        *slot = glyph;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_core::{CornerAddress, EdgeAddress, FloorExtent, RoomId};
    use floorplan_rendering::{wall_color, CornerPost, TileQuad, WallSegment};
    use glam::Vec3;

    fn quad(column: u32, row: u32, room: Option<RoomId>) -> TileQuad {
        TileQuad {
            tile: TileAddress::new(column, row),
            corners: [Vec3::ZERO; 4],
            room,
            occupied: false,
        }
    }

    #[test]
    fn plan_draws_walls_between_tiles() {
        let mut geometry = FloorGeometry::new(FloorExtent::new(2, 1), 0.0, 1.0);
        geometry.tiles = vec![quad(0, 0, Some(RoomId::new(3))), quad(1, 0, None)];
        geometry.walls = vec![WallSegment {
            edge: EdgeAddress::vertical(1, 0),
            kind: WallKind::Door,
            start: Vec3::ZERO,
            end: Vec3::ZERO,
            color: wall_color(WallKind::Door),
        }];
        geometry.posts = vec![CornerPost {
            corner: CornerAddress::new(1, 0),
            position: Vec3::ZERO,
            arms: 1,
        }];

        let plan = render_plan(&geometry, &[TileAddress::new(1, 0)]);

        assert_eq!(plan, "  +\n 3D*\n\n");
    }
}
