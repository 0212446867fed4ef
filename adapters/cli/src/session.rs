//! Scripted build-mode session replayed through a [`FloorGrid`].

use std::io::Write;

use anyhow::{Context, Result};
use floorplan_calculator::GridTransform;
use floorplan_core::{CornerAddress, EditTool, ObjectKind, TileAddress, WallKind};
use floorplan_grid::{ClickReport, FloorGrid};
use floorplan_rendering::MeshRenderer;
use glam::Vec2;

use crate::ascii::render_plan;

/// Grid point a scripted pointer sample lands on.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Target {
    /// Centre of the tile at `(column, row)`.
    Tile(u32, u32),
    /// Corner at `(column, row)`.
    Corner(u32, u32),
}

/// One press, drag and release with a single tool.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Step {
    pub(crate) label: &'static str,
    pub(crate) tool: EditTool,
    pub(crate) from: Target,
    pub(crate) to: Target,
}

/// Builds a two-room house with furniture, then attempts two illegal edits.
pub(crate) const SCRIPT: &[Step] = &[
    Step {
        label: "outer walls",
        tool: EditTool::BuildRoom(WallKind::Solid),
        from: Target::Tile(1, 1),
        to: Target::Tile(5, 4),
    },
    Step {
        label: "partition",
        tool: EditTool::BuildWall(WallKind::Solid),
        from: Target::Corner(3, 1),
        to: Target::Corner(3, 5),
    },
    Step {
        label: "interior door",
        tool: EditTool::BuildWall(WallKind::Door),
        from: Target::Corner(3, 3),
        to: Target::Corner(3, 4),
    },
    Step {
        label: "front door",
        tool: EditTool::BuildWall(WallKind::Door),
        from: Target::Corner(6, 2),
        to: Target::Corner(6, 3),
    },
    Step {
        label: "bed",
        tool: EditTool::PlaceObject(ObjectKind::Bed),
        from: Target::Tile(1, 1),
        to: Target::Tile(1, 1),
    },
    Step {
        label: "bathtub",
        tool: EditTool::PlaceObject(ObjectKind::Bathtub),
        from: Target::Tile(4, 4),
        to: Target::Tile(4, 4),
    },
    Step {
        label: "garden table",
        tool: EditTool::PlaceObject(ObjectKind::Table),
        from: Target::Tile(8, 2),
        to: Target::Tile(8, 2),
    },
    Step {
        label: "garden chair",
        tool: EditTool::PlaceObject(ObjectKind::Chair),
        from: Target::Tile(8, 3),
        to: Target::Tile(8, 3),
    },
    Step {
        label: "outdoor bathtub",
        tool: EditTool::PlaceObject(ObjectKind::Bathtub),
        from: Target::Tile(8, 6),
        to: Target::Tile(8, 6),
    },
    Step {
        label: "open the bedroom",
        tool: EditTool::RemoveWall,
        from: Target::Corner(1, 1),
        to: Target::Corner(3, 1),
    },
];

/// Tiles the scripted walk travels between.
pub(crate) const WALK: (TileAddress, TileAddress) =
    (TileAddress::new(10, 1), TileAddress::new(2, 4));

/// Tally of scripted edits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) applied: usize,
    pub(crate) rejected: usize,
    pub(crate) rooms: usize,
    pub(crate) path_length: Option<usize>,
}

/// Replays [`SCRIPT`] and writes a report of every step to `out`.
pub(crate) fn run<R, W>(grid: &mut FloorGrid<R>, out: &mut W) -> Result<Summary>
where
    R: MeshRenderer,
    W: Write,
{
    let mut summary = Summary::default();

    writeln!(out, "lot {}", grid.lot()?)?;
    for step in SCRIPT {
        let report = replay(grid, step)?;
        let verdict = match &report.edit {
            Some(Ok(_)) => {
                summary.applied += 1;
                "applied".to_owned()
            }
            Some(Err(rejection)) => {
                summary.rejected += 1;
                format!("rejected: {rejection}")
            }
            None => format!("{:?}", report.outcome).to_lowercase(),
        };
        writeln!(out, "  {:<18} {verdict}", step.label)?;
    }

    let tile_size = grid.calculator()?.tile_size();
    let rooms = grid.all_rooms()?;
    summary.rooms = rooms.len();
    writeln!(out, "rooms")?;
    for room in &rooms {
        writeln!(
            out,
            "  room {}: {} tiles, {} square units, {} boundary walls",
            room.id.get(),
            room.area(),
            room.world_area(tile_size),
            room.boundary.len(),
        )?;
    }

    let (from, to) = WALK;
    let path = match grid.find_path(from, to) {
        Ok(path) => {
            summary.path_length = Some(path.len());
            writeln!(
                out,
                "path ({}, {}) -> ({}, {}): {} tiles",
                from.column(),
                from.row(),
                to.column(),
                to.row(),
                path.len()
            )?;
            path
        }
        Err(error) => {
            writeln!(out, "path: {error}")?;
            Vec::new()
        }
    };

    let geometry = grid.geometry()?;
    write!(out, "{}", render_plan(&geometry, &path))?;
    Ok(summary)
}

fn replay<R: MeshRenderer>(grid: &mut FloorGrid<R>, step: &Step) -> Result<ClickReport> {
    let from = world_point(grid, step.from)?;
    let to = world_point(grid, step.to)?;
    let _ = grid.handle_click(step.tool, from, true)?;
    let _ = grid.handle_click(step.tool, to, true)?;
    grid.handle_click(step.tool, to, false)
        .with_context(|| format!("step `{}` failed", step.label))
}

fn world_point<R: MeshRenderer>(grid: &FloorGrid<R>, target: Target) -> Result<Vec2> {
    let calculator = grid.calculator()?;
    Ok(match target {
        Target::Tile(column, row) => calculator.tile_to_world(TileAddress::new(column, row)),
        Target::Corner(column, row) => {
            calculator.corner_to_world(CornerAddress::new(column, row))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use floorplan_calculator::LotKey;
    use floorplan_core::Rejection;
    use floorplan_grid::GridSettings;
    use floorplan_system_interactions::OrphanPolicy;
    use floorplan_rendering::RecordingRenderer;

    fn session(settings: GridSettings, lot: LotKey) -> (Summary, String) {
        let mut grid = FloorGrid::new(settings, RecordingRenderer::new());
        grid.initialize(lot, 0.0).expect("lot initializes");
        let mut out = Vec::new();
        let summary = run(&mut grid, &mut out).expect("session runs");
        (summary, String::from_utf8(out).expect("utf-8 report"))
    }

    #[test]
    fn script_builds_two_rooms_on_every_lot() {
        for lot in LotKey::ALL {
            let (summary, report) = session(GridSettings::default(), lot);
            assert_eq!(summary.applied, 8, "{lot}: {report}");
            assert_eq!(summary.rejected, 2, "{lot}: {report}");
            assert_eq!(summary.rooms, 2, "{lot}: {report}");
        }
    }

    #[test]
    fn walk_passes_through_both_doors() {
        let (summary, report) = session(GridSettings::default(), LotKey::default());
        // Both doors lie on a Manhattan-optimal route: 11 moves, 12 tiles.
        assert_eq!(summary.path_length, Some(12), "{report}");
        assert!(report.contains("D"), "doors should be drawn: {report}");
    }

    #[test]
    fn allowing_orphans_opens_the_bedroom() {
        let settings = GridSettings {
            orphan_policy: OrphanPolicy::Allow,
            ..GridSettings::default()
        };
        let (summary, report) = session(settings, LotKey::default());
        assert_eq!(summary.applied, 9, "{report}");
        assert_eq!(summary.rooms, 1, "{report}");
        assert!(report.contains(&Rejection::NotEnclosed.to_string()));
    }
}
