#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-floor coordinator tying calculator, floor state, interactions, rooms
//! and pathfinding together.
//!
//! [`FloorGrid`] owns every subsystem of one floor. Pointer input enters
//! through [`FloorGrid::handle_click`]; committed edits are applied, rooms and
//! the traversal map are rebuilt, and the mesh renderer is asked to regenerate
//! before the call returns. [`Building`] stacks floors in an arena.

mod building;
mod geometry;
mod settings;

pub use building::{Building, FloorId, DEFAULT_STOREY_HEIGHT};
pub use settings::{GridSettings, SettingsError};

use std::fmt;

use floorplan_calculator::{GridCalculator, LotKey};
use floorplan_core::{
    CornerAddress, EdgeAddress, EditCommand, EditTool, FloorError, FloorEvent, Rejection,
    TileAddress,
};
use floorplan_floor::{Corner, Edge, FloorData, ObjectsData, PlacedObject, Tile};
use floorplan_rendering::{FloorGeometry, MeshRenderer};
use floorplan_system_click::{ClickOutcome, ClickRouter, GesturePhase};
use floorplan_system_interactions::{Applied, ObjectInteractions, WallInteractions};
use floorplan_system_pathfinder::{PathError, PathFinder};
use floorplan_system_rooms::{Room, RoomsManager};
use glam::Vec2;
use thiserror::Error;

/// Failures reported by the floor coordinator.
#[derive(Debug, Error)]
pub enum FloorGridError {
    /// The floor was used before [`FloorGrid::initialize`].
    #[error("floor grid used before initialize")]
    NotInitialized,
    /// [`FloorGrid::initialize`] was called twice.
    #[error("floor grid is already initialized")]
    AlreadyInitialized,
    /// The lot table has no entry for the requested lot.
    #[error("lot `{0}` has no configuration")]
    UnknownLot(LotKey),
    /// A floor query failed.
    #[error(transparent)]
    Floor(#[from] FloorError),
    /// A route query failed.
    #[error(transparent)]
    Path(#[from] PathError),
    /// The mesh renderer failed.
    #[error(transparent)]
    Renderer(#[from] anyhow::Error),
}

/// What a single pointer sample did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickReport {
    /// Gesture transition caused by the sample.
    pub outcome: ClickOutcome,
    /// Result of the edit committed by the sample, if any.
    pub edit: Option<Result<Applied, Rejection>>,
}

impl ClickReport {
    /// Reports whether the sample committed an edit that was accepted.
    #[must_use]
    pub fn applied(&self) -> bool {
        matches!(self.edit, Some(Ok(_)))
    }

    /// Rejection reason for a committed edit that was refused.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self.edit {
            Some(Err(rejection)) => Some(rejection),
            _ => None,
        }
    }
}

/// Edit the current gesture would commit, with its legality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditPreview {
    /// Command that releasing now would commit.
    pub command: EditCommand,
    /// Whether the command would be accepted.
    pub verdict: Result<(), Rejection>,
}

#[derive(Debug)]
struct FloorState {
    lot: LotKey,
    floor_height: f32,
    calculator: GridCalculator,
    floor: FloorData,
    objects: ObjectsData,
    walls: WallInteractions,
    object_rules: ObjectInteractions,
    router: ClickRouter,
    rooms: RoomsManager,
    paths: PathFinder,
}

impl FloorState {
    fn apply(
        &mut self,
        command: &EditCommand,
        out_events: &mut Vec<FloorEvent>,
    ) -> Result<Applied, Rejection> {
        match command {
            EditCommand::Walls(action) => {
                self.walls
                    .try_apply(action, &mut self.floor, &self.objects, out_events)
            }
            EditCommand::Object(action) => self.object_rules.try_apply(
                *action,
                &mut self.floor,
                &mut self.objects,
                &self.rooms,
                out_events,
            ),
        }
    }

    fn validate(&self, command: &EditCommand) -> Result<(), Rejection> {
        match command {
            EditCommand::Walls(action) => self
                .walls
                .validate(action, &self.floor, &self.objects)
                .map(|_| ()),
            EditCommand::Object(action) => {
                self.object_rules
                    .validate(*action, &self.floor, &self.objects, &self.rooms)
            }
        }
    }

    fn refresh(&mut self, events: &[FloorEvent]) {
        if events.iter().any(FloorEvent::changes_topology) {
            self.rooms.rebuild(&self.floor);
        }
        self.paths.rebuild(&self.floor);
    }

    fn geometry(&self) -> FloorGeometry {
        geometry::build(
            &self.calculator,
            self.floor_height,
            &self.floor,
            &self.objects,
            &self.rooms,
        )
    }
}

/// Coordinator for one floor of a building.
#[derive(Debug)]
pub struct FloorGrid<R> {
    index: u32,
    debug: bool,
    settings: GridSettings,
    renderer: R,
    state: Option<FloorState>,
}

impl<R> FloorGrid<R>
where
    R: MeshRenderer,
{
    /// Creates an uninitialized floor.
    #[must_use]
    pub fn new(settings: GridSettings, renderer: R) -> Self {
        Self::with_index(0, settings, renderer)
    }

    pub(crate) fn with_index(index: u32, settings: GridSettings, renderer: R) -> Self {
        Self {
            index,
            debug: false,
            settings,
            renderer,
            state: None,
        }
    }

    /// Selects the lot's calculator, sizes the floor and attaches the mesh.
    ///
    /// Must be called exactly once before any other floor operation.
    pub fn initialize(&mut self, lot: LotKey, floor_height: f32) -> Result<(), FloorGridError> {
        if self.state.is_some() {
            return Err(FloorGridError::AlreadyInitialized);
        }
        let config = self
            .settings
            .lots
            .get(lot)
            .ok_or(FloorGridError::UnknownLot(lot))?;

        let calculator = GridCalculator::for_lot(config);
        let floor = FloorData::new(config.extent());
        let state = FloorState {
            lot,
            floor_height,
            calculator,
            rooms: RoomsManager::from_floor(&floor),
            paths: PathFinder::from_floor(&floor),
            floor,
            objects: ObjectsData::new(),
            walls: WallInteractions::new(self.settings.orphan_policy),
            object_rules: ObjectInteractions::new(),
            router: ClickRouter::new(),
        };

        self.renderer.create_and_attach()?;
        self.renderer.regenerate(&state.geometry())?;
        debug_log(
            self.debug,
            self.index,
            "init",
            format_args!(
                "initialized {lot} with {} x {} tiles at height {floor_height}",
                config.columns, config.rows
            ),
        );
        self.state = Some(state);
        Ok(())
    }

    /// Routes one pointer sample for the active tool.
    ///
    /// A committed edit is applied, rooms and the traversal map are rebuilt
    /// and the mesh is regenerated before this returns. Refused edits are
    /// reported in [`ClickReport::edit`] and leave the floor unchanged.
    pub fn handle_click(
        &mut self,
        tool: EditTool,
        world_point: Vec2,
        is_pressed: bool,
    ) -> Result<ClickReport, FloorGridError> {
        let (index, debug) = (self.index, self.debug);
        let Some(state) = self.state.as_mut() else {
            return Err(not_initialized(index, "handle_click"));
        };

        let mut commands = Vec::new();
        let outcome = state.router.handle(
            tool,
            world_point,
            is_pressed,
            &state.calculator,
            &mut commands,
        );
        debug_log(
            debug,
            index,
            "click",
            format_args!("{tool:?} at {world_point} pressed={is_pressed}: {outcome:?}"),
        );

        let Some(command) = commands.pop() else {
            return Ok(ClickReport {
                outcome,
                edit: None,
            });
        };

        let mut events = Vec::new();
        let result = state.apply(&command, &mut events);
        match &result {
            Ok(applied) => debug_log(
                debug,
                index,
                "commit",
                format_args!("{applied:?} ({} floor events)", events.len()),
            ),
            Err(rejection) => debug_log(
                debug,
                index,
                "reject",
                format_args!("{command:?} refused: {rejection}"),
            ),
        }

        if !events.is_empty() {
            state.refresh(&events);
            self.renderer.regenerate(&state.geometry())?;
        }

        Ok(ClickReport {
            outcome,
            edit: Some(result),
        })
    }

    /// Empties every wall and object while keeping the lot.
    pub fn clear(&mut self) -> Result<(), FloorGridError> {
        let (index, debug) = (self.index, self.debug);
        let Some(state) = self.state.as_mut() else {
            return Err(not_initialized(index, "clear"));
        };
        let extent = state.floor.extent();
        state.floor.resize(extent);
        state.objects.clear();
        state.router.reset();
        state.rooms.rebuild(&state.floor);
        state.paths.rebuild(&state.floor);
        self.renderer.regenerate(&state.geometry())?;
        debug_log(debug, index, "commit", format_args!("floor cleared"));
        Ok(())
    }

    /// Looks up a tile.
    pub fn tile(&self, address: TileAddress) -> Result<Tile, FloorGridError> {
        Ok(self.state("tile")?.floor.tile(address)?)
    }

    /// Looks up an edge.
    pub fn edge(&self, address: EdgeAddress) -> Result<Edge, FloorGridError> {
        Ok(self.state("edge")?.floor.edge(address)?)
    }

    /// Looks up a corner.
    pub fn corner(&self, address: CornerAddress) -> Result<Corner, FloorGridError> {
        Ok(self.state("corner")?.floor.corner(address)?)
    }

    /// Copy of the room containing the tile.
    pub fn room_containing(&self, tile: TileAddress) -> Result<Option<Room>, FloorGridError> {
        Ok(self.state("room_containing")?.rooms.room_containing(tile))
    }

    /// Copies of every room.
    pub fn all_rooms(&self) -> Result<Vec<Room>, FloorGridError> {
        Ok(self.state("all_rooms")?.rooms.all_rooms())
    }

    /// Shortest walkable route between two tiles.
    pub fn find_path(
        &self,
        from: TileAddress,
        to: TileAddress,
    ) -> Result<Vec<TileAddress>, FloorGridError> {
        Ok(self.state("find_path")?.paths.find_path(from, to)?)
    }

    /// Copies of every placed object in identifier order.
    pub fn objects(&self) -> Result<Vec<PlacedObject>, FloorGridError> {
        Ok(self.state("objects")?.objects.iter().copied().collect())
    }

    /// Edit the current gesture would commit, if any.
    pub fn preview(&self) -> Result<Option<EditPreview>, FloorGridError> {
        let state = self.state("preview")?;
        Ok(state.router.preview().map(|command| EditPreview {
            verdict: state.validate(&command),
            command,
        }))
    }

    /// Phase of the gesture in progress.
    pub fn gesture_phase(&self) -> Result<GesturePhase, FloorGridError> {
        Ok(self.state("gesture_phase")?.router.phase())
    }

    /// Fresh geometry snapshot of the floor.
    pub fn geometry(&self) -> Result<FloorGeometry, FloorGridError> {
        Ok(self.state("geometry")?.geometry())
    }

    /// Coordinate calculator selected for the floor's lot.
    pub fn calculator(&self) -> Result<&GridCalculator, FloorGridError> {
        Ok(&self.state("calculator")?.calculator)
    }

    /// Lot the floor was initialized with.
    pub fn lot(&self) -> Result<LotKey, FloorGridError> {
        Ok(self.state("lot")?.lot)
    }

    /// Vertical position of the floor.
    pub fn floor_height(&self) -> Result<f32, FloorGridError> {
        Ok(self.state("floor_height")?.floor_height)
    }

    /// Reports whether [`FloorGrid::initialize`] has succeeded.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Position of the floor within its building.
    #[must_use]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Enables or disables debug logging for this floor.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Reports whether debug logging is enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Mesh renderer owned by the floor.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    fn state(&self, operation: &'static str) -> Result<&FloorState, FloorGridError> {
        self.state
            .as_ref()
            .ok_or_else(|| not_initialized(self.index, operation))
    }
}

fn not_initialized(floor: u32, operation: &'static str) -> FloorGridError {
    tracing::error!(floor, operation, "floor grid used before initialize");
    FloorGridError::NotInitialized
}

fn debug_log(enabled: bool, floor: u32, category: &'static str, message: fmt::Arguments<'_>) {
    if enabled {
        tracing::debug!(floor, category, "{message}");
    }
}
