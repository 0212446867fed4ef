//! Arena of stacked floors.

use floorplan_calculator::LotKey;
use floorplan_rendering::MeshRenderer;

use crate::{FloorGrid, FloorGridError, GridSettings};

/// Vertical distance between consecutive floors in world units.
pub const DEFAULT_STOREY_HEIGHT: f32 = 100.0;

/// Index of a floor within its [`Building`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloorId(u32);

impl FloorId {
    /// Creates a new floor identifier with the provided numeric value.
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

/// Floors stacked bottom to top.
///
/// Floors never reference each other directly; adjacency is answered by
/// index lookups on the arena.
#[derive(Debug)]
pub struct Building<R> {
    settings: GridSettings,
    storey_height: f32,
    floors: Vec<FloorGrid<R>>,
}

impl<R> Building<R>
where
    R: MeshRenderer,
{
    /// Creates an empty building with the default storey height.
    #[must_use]
    pub fn new(settings: GridSettings) -> Self {
        Self::with_storey_height(settings, DEFAULT_STOREY_HEIGHT)
    }

    /// Creates an empty building with a custom storey height.
    #[must_use]
    pub fn with_storey_height(settings: GridSettings, storey_height: f32) -> Self {
        Self {
            settings,
            storey_height,
            floors: Vec::new(),
        }
    }

    /// Stacks a new initialized floor on top of the building.
    ///
    /// Floor `n` sits at `n * storey_height`. The floor is only added when
    /// initialization succeeds.
    pub fn add_floor(&mut self, lot: LotKey, renderer: R) -> Result<FloorId, FloorGridError> {
        let index = u32::try_from(self.floors.len()).unwrap_or(u32::MAX);
        let mut floor = FloorGrid::with_index(index, self.settings.clone(), renderer);
        floor.initialize(lot, index as f32 * self.storey_height)?;
        self.floors.push(floor);
        Ok(FloorId::new(index))
    }

    /// Floor directly above, if any.
    #[must_use]
    pub fn floor_above(&self, id: FloorId) -> Option<FloorId> {
        let above = FloorId::new(id.get().checked_add(1)?);
        self.contains(above).then_some(above)
    }

    /// Floor directly below, if any.
    #[must_use]
    pub fn floor_below(&self, id: FloorId) -> Option<FloorId> {
        let below = FloorId::new(id.get().checked_sub(1)?);
        self.contains(below).then_some(below)
    }

    /// Looks up a floor.
    #[must_use]
    pub fn floor(&self, id: FloorId) -> Option<&FloorGrid<R>> {
        self.floors.get(usize::try_from(id.get()).ok()?)
    }

    /// Looks up a floor for mutation.
    pub fn floor_mut(&mut self, id: FloorId) -> Option<&mut FloorGrid<R>> {
        self.floors.get_mut(usize::try_from(id.get()).ok()?)
    }

    /// Number of floors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.floors.len()
    }

    /// Reports whether the building has no floors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty()
    }

    /// Vertical distance between consecutive floors.
    #[must_use]
    pub const fn storey_height(&self) -> f32 {
        self.storey_height
    }

    /// Enables or disables debug logging on every floor.
    pub fn set_debug(&mut self, debug: bool) {
        for floor in &mut self.floors {
            floor.set_debug(debug);
        }
    }

    fn contains(&self, id: FloorId) -> bool {
        usize::try_from(id.get()).map_or(false, |index| index < self.floors.len())
    }
}
