#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure gesture system that turns pointer input into edit commands.
//!
//! The router resolves every pointer sample to a grid target through the
//! floor's calculator and accumulates the edit described by the active tool.
//! Nothing is committed until the pointer is released over the floor.

use floorplan_calculator::GridTransform;
use floorplan_core::{
    CornerAddress, EdgeAddress, EditCommand, EditTool, ObjectAction, TileAddress, TileRect,
    WallAction,
};
use glam::Vec2;

/// Grid element a gesture is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureTarget {
    /// Corner targeted by wall tools.
    Corner(CornerAddress),
    /// Tile targeted by room and object tools.
    Tile(TileAddress),
}

/// Observable state of the gesture state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No gesture in progress.
    Idle,
    /// Pointer held on the target it was pressed on.
    Pressed,
    /// Pointer held and moved to another target.
    Dragging,
    /// Gesture discarded; waits for the release.
    Cancelled,
}

/// Result of routing a single pointer sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClickOutcome {
    /// The sample had no effect.
    Ignored,
    /// A gesture started.
    Started,
    /// The gesture target moved.
    Dragged,
    /// The pointer is still held on the same target.
    Held,
    /// The gesture was discarded without committing.
    Cancelled,
    /// The release committed an edit command.
    Committed,
    /// The release ended the gesture with nothing to commit.
    Released,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Gesture {
    Idle,
    Active {
        tool: EditTool,
        anchor: GestureTarget,
        current: GestureTarget,
        dragged: bool,
    },
    Cancelled,
}

/// Gesture state machine for build-mode tools.
#[derive(Clone, Debug)]
pub struct ClickRouter {
    gesture: Gesture,
}

impl Default for ClickRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickRouter {
    /// Creates an idle router.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            gesture: Gesture::Idle,
        }
    }

    /// Current phase of the gesture.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self.gesture {
            Gesture::Idle => GesturePhase::Idle,
            Gesture::Active { dragged: false, .. } => GesturePhase::Pressed,
            Gesture::Active { dragged: true, .. } => GesturePhase::Dragging,
            Gesture::Cancelled => GesturePhase::Cancelled,
        }
    }

    /// Abandons any gesture in progress.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Routes one pointer sample.
    ///
    /// `is_pressed` reports whether the pointer button is held. Committed
    /// edits are appended to `out`; at most one per call.
    pub fn handle<T>(
        &mut self,
        tool: EditTool,
        world_point: Vec2,
        is_pressed: bool,
        calculator: &T,
        out: &mut Vec<EditCommand>,
    ) -> ClickOutcome
    where
        T: GridTransform,
    {
        let target = resolve_target(tool, world_point, calculator);

        match (self.gesture, is_pressed) {
            (Gesture::Idle, true) => match target {
                Some(target) => {
                    self.gesture = Gesture::Active {
                        tool,
                        anchor: target,
                        current: target,
                        dragged: false,
                    };
                    ClickOutcome::Started
                }
                None => ClickOutcome::Ignored,
            },
            (Gesture::Idle, false) => ClickOutcome::Ignored,
            (Gesture::Cancelled, true) => ClickOutcome::Cancelled,
            (Gesture::Cancelled, false) => {
                self.gesture = Gesture::Idle;
                ClickOutcome::Cancelled
            }
            (
                Gesture::Active {
                    tool: active,
                    anchor,
                    current,
                    dragged,
                },
                true,
            ) => match target {
                Some(target) if active == tool => {
                    self.gesture = Gesture::Active {
                        tool,
                        anchor,
                        current: target,
                        dragged: dragged || target != anchor,
                    };
                    if target == current {
                        ClickOutcome::Held
                    } else {
                        ClickOutcome::Dragged
                    }
                }
                _ => {
                    self.gesture = Gesture::Cancelled;
                    ClickOutcome::Cancelled
                }
            },
            (
                Gesture::Active {
                    tool: active,
                    anchor,
                    ..
                },
                false,
            ) => {
                self.gesture = Gesture::Idle;
                let Some(target) = target.filter(|_| active == tool) else {
                    return ClickOutcome::Cancelled;
                };
                match build_command(tool, anchor, target) {
                    Some(command) => {
                        out.push(command);
                        ClickOutcome::Committed
                    }
                    None => ClickOutcome::Released,
                }
            }
        }
    }

    /// Command that releasing at the current target would commit.
    #[must_use]
    pub fn preview(&self) -> Option<EditCommand> {
        match self.gesture {
            Gesture::Active {
                tool,
                anchor,
                current,
                ..
            } => build_command(tool, anchor, current),
            Gesture::Idle | Gesture::Cancelled => None,
        }
    }
}

fn resolve_target<T>(tool: EditTool, world_point: Vec2, calculator: &T) -> Option<GestureTarget>
where
    T: GridTransform,
{
    if tool.targets_corners() {
        calculator
            .world_to_corner(world_point)
            .ok()
            .map(|hit| GestureTarget::Corner(hit.corner))
    } else {
        calculator
            .world_to_tile(world_point)
            .ok()
            .map(GestureTarget::Tile)
    }
}

fn build_command(
    tool: EditTool,
    anchor: GestureTarget,
    current: GestureTarget,
) -> Option<EditCommand> {
    match (tool, anchor, current) {
        (EditTool::BuildWall(kind), GestureTarget::Corner(a), GestureTarget::Corner(b)) => {
            let edges = wall_run(a, b);
            (!edges.is_empty()).then(|| EditCommand::Walls(WallAction::Build { edges, kind }))
        }
        (EditTool::RemoveWall, GestureTarget::Corner(a), GestureTarget::Corner(b)) => {
            let edges = wall_run(a, b);
            (!edges.is_empty()).then(|| EditCommand::Walls(WallAction::Demolish { edges }))
        }
        (EditTool::BuildRoom(kind), GestureTarget::Tile(a), GestureTarget::Tile(b)) => {
            Some(EditCommand::Walls(WallAction::Build {
                edges: TileRect::spanning(a, b).perimeter_edges(),
                kind,
            }))
        }
        (EditTool::PlaceObject(kind), _, GestureTarget::Tile(tile)) => {
            Some(EditCommand::Object(ObjectAction::Place { kind, anchor: tile }))
        }
        (EditTool::RemoveObject, _, GestureTarget::Tile(tile)) => {
            Some(EditCommand::Object(ObjectAction::Remove { tile }))
        }
        _ => None,
    }
}

/// Straight run of edges from `start` toward `end` along the dominant axis.
///
/// The run stays on the start corner's row or column; ties favour the
/// horizontal axis. Equal corners yield an empty run.
#[must_use]
pub fn wall_run(start: CornerAddress, end: CornerAddress) -> Vec<EdgeAddress> {
    let columns = start.column().abs_diff(end.column());
    let rows = start.row().abs_diff(end.row());
    if columns == 0 && rows == 0 {
        return Vec::new();
    }

    if columns >= rows {
        let west = start.column().min(end.column());
        let east = start.column().max(end.column());
        (west..east)
            .map(|column| EdgeAddress::horizontal(column, start.row()))
            .collect()
    } else {
        let north = start.row().min(end.row());
        let south = start.row().max(end.row());
        (north..south)
            .map(|row| EdgeAddress::vertical(start.column(), row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_run_follows_the_dominant_axis() {
        assert_eq!(
            wall_run(CornerAddress::new(3, 1), CornerAddress::new(0, 2)),
            vec![
                EdgeAddress::horizontal(0, 1),
                EdgeAddress::horizontal(1, 1),
                EdgeAddress::horizontal(2, 1),
            ]
        );
        assert_eq!(
            wall_run(CornerAddress::new(2, 0), CornerAddress::new(3, 2)),
            vec![EdgeAddress::vertical(2, 0), EdgeAddress::vertical(2, 1)]
        );
        assert!(wall_run(CornerAddress::new(1, 1), CornerAddress::new(1, 1)).is_empty());
    }

    #[test]
    fn ties_favour_horizontal_runs() {
        assert_eq!(
            wall_run(CornerAddress::new(0, 0), CornerAddress::new(1, 1)),
            vec![EdgeAddress::horizontal(0, 0)]
        );
    }

    #[test]
    fn object_tools_target_the_current_tile() {
        let tile = TileAddress::new(2, 3);
        assert_eq!(
            build_command(
                EditTool::RemoveObject,
                GestureTarget::Tile(TileAddress::new(0, 0)),
                GestureTarget::Tile(tile),
            ),
            Some(EditCommand::Object(ObjectAction::Remove { tile }))
        );
    }
}
