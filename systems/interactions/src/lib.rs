#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Legality checks and application of committed edits.
//!
//! Each interaction validates a whole action before touching the floor, so a
//! rejected multi-edge drag leaves no partial state behind.

use floorplan_core::{
    EdgeAddress, FloorEvent, ObjectAction, ObjectId, Rejection, TileRect, WallAction,
};
use floorplan_floor::{FloorData, ObjectsData, PlacedObject};
use floorplan_system_rooms::RoomsManager;
use serde::Deserialize;

/// How wall removal treats objects that need an enclosing room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Refuse removals that would leave such an object outside a room.
    #[default]
    Reject,
    /// Apply the removal and report the orphaned objects.
    Allow,
}

/// Outcome of an accepted edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Applied {
    /// Walls were raised or demolished.
    Walls {
        /// Edges whose state actually changed.
        changed: Vec<EdgeAddress>,
        /// Room-bound objects left outside any room by the edit.
        orphaned: Vec<ObjectId>,
    },
    /// An object was placed.
    ObjectPlaced {
        /// Snapshot of the placed object.
        object: PlacedObject,
    },
    /// An object was removed.
    ObjectRemoved {
        /// Snapshot of the removed object.
        object: PlacedObject,
    },
}

impl Applied {
    /// Reports whether the edit altered the floor at all.
    #[must_use]
    pub fn changed_floor(&self) -> bool {
        match self {
            Self::Walls { changed, .. } => !changed.is_empty(),
            Self::ObjectPlaced { .. } | Self::ObjectRemoved { .. } => true,
        }
    }
}

/// Applies wall runs and room perimeters.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallInteractions {
    orphan_policy: OrphanPolicy,
}

impl WallInteractions {
    /// Creates wall interactions with the provided orphan policy.
    #[must_use]
    pub const fn new(orphan_policy: OrphanPolicy) -> Self {
        Self { orphan_policy }
    }

    /// Policy applied to removals that orphan room-bound objects.
    #[must_use]
    pub const fn orphan_policy(&self) -> OrphanPolicy {
        self.orphan_policy
    }

    /// Checks the action without mutating anything.
    ///
    /// On success returns the room-bound objects the action would orphan, which
    /// is always empty under [`OrphanPolicy::Reject`].
    pub fn validate(
        &self,
        action: &WallAction,
        floor: &FloorData,
        objects: &ObjectsData,
    ) -> Result<Vec<ObjectId>, Rejection> {
        let extent = floor.extent();
        if action.edges().iter().any(|edge| !extent.contains_edge(*edge)) {
            return Err(Rejection::OutOfBounds);
        }

        match action {
            WallAction::Build { edges, .. } => {
                if edges.iter().any(|edge| splits_object(floor, *edge)) {
                    return Err(Rejection::Occupied);
                }
                Ok(Vec::new())
            }
            WallAction::Demolish { edges } => {
                let orphaned = orphaned_by_removal(edges, floor, objects);
                match (self.orphan_policy, orphaned.first()) {
                    (OrphanPolicy::Reject, Some(object)) => {
                        Err(Rejection::WouldOrphanObject { object: *object })
                    }
                    _ => Ok(orphaned),
                }
            }
        }
    }

    /// Validates and applies the action.
    pub fn try_apply(
        &self,
        action: &WallAction,
        floor: &mut FloorData,
        objects: &ObjectsData,
        out_events: &mut Vec<FloorEvent>,
    ) -> Result<Applied, Rejection> {
        let orphaned = self.validate(action, floor, objects)?;
        let wall = match action {
            WallAction::Build { kind, .. } => Some(*kind),
            WallAction::Demolish { .. } => None,
        };

        let mut changed = Vec::new();
        for edge in action.edges() {
            if floor.set_edge(*edge, wall, out_events)? {
                changed.push(*edge);
            }
        }

        for object in &orphaned {
            tracing::warn!(
                object = object.get(),
                "wall removal left a room-bound object outside any room"
            );
        }

        Ok(Applied::Walls { changed, orphaned })
    }
}

fn splits_object(floor: &FloorData, edge: EdgeAddress) -> bool {
    let sides = floor.extent().edge_sides(edge);
    match (sides.first, sides.second) {
        (Some(first), Some(second)) => {
            let occupant = floor.occupant(first);
            occupant.is_some() && occupant == floor.occupant(second)
        }
        _ => false,
    }
}

fn orphaned_by_removal(
    edges: &[EdgeAddress],
    floor: &FloorData,
    objects: &ObjectsData,
) -> Vec<ObjectId> {
    if edges.iter().all(|edge| floor.wall(*edge).is_none()) {
        return Vec::new();
    }
    let room_bound: Vec<&PlacedObject> = objects
        .iter()
        .filter(|object| object.kind.requires_room())
        .collect();
    if room_bound.is_empty() {
        return Vec::new();
    }

    let before = RoomsManager::from_floor(floor);
    let mut scratch = floor.clone();
    let mut discarded = Vec::new();
    for edge in edges {
        let _ = scratch.set_edge(*edge, None, &mut discarded);
    }
    let after = RoomsManager::from_floor(&scratch);

    room_bound
        .into_iter()
        .filter(|object| {
            before.room_enclosing(object.footprint).is_some()
                && after.room_enclosing(object.footprint).is_none()
        })
        .map(|object| object.id)
        .collect()
}

/// Applies object placement and removal.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectInteractions;

impl ObjectInteractions {
    /// Creates object interactions.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Checks the action without mutating anything.
    pub fn validate(
        &self,
        action: ObjectAction,
        floor: &FloorData,
        objects: &ObjectsData,
        rooms: &RoomsManager,
    ) -> Result<(), Rejection> {
        match action {
            ObjectAction::Place { kind, anchor } => {
                let footprint = TileRect::from_origin_and_size(anchor, kind.footprint());
                if !floor.extent().contains_rect(footprint) {
                    return Err(Rejection::OutOfBounds);
                }
                if footprint.tiles().any(|tile| floor.occupant(tile).is_some()) {
                    return Err(Rejection::Occupied);
                }
                if footprint
                    .interior_edges()
                    .into_iter()
                    .any(|edge| floor.wall(edge).is_some())
                {
                    return Err(Rejection::CrossesWall);
                }
                if kind.requires_room() && rooms.room_enclosing(footprint).is_none() {
                    return Err(Rejection::NotEnclosed);
                }
                Ok(())
            }
            ObjectAction::Remove { tile } => {
                if !floor.extent().contains_tile(tile) {
                    return Err(Rejection::OutOfBounds);
                }
                objects
                    .object_at(floor, tile)
                    .map(|_| ())
                    .ok_or(Rejection::MissingObject)
            }
        }
    }

    /// Validates and applies the action.
    pub fn try_apply(
        &self,
        action: ObjectAction,
        floor: &mut FloorData,
        objects: &mut ObjectsData,
        rooms: &RoomsManager,
        out_events: &mut Vec<FloorEvent>,
    ) -> Result<Applied, Rejection> {
        self.validate(action, floor, objects, rooms)?;
        match action {
            ObjectAction::Place { kind, anchor } => {
                let id = objects.place(floor, kind, anchor, out_events)?;
                let object = *objects.get(id).ok_or(Rejection::MissingObject)?;
                Ok(Applied::ObjectPlaced { object })
            }
            ObjectAction::Remove { tile } => {
                let id = floor.occupant(tile).ok_or(Rejection::MissingObject)?;
                let object = objects.remove(floor, id, out_events)?;
                Ok(Applied::ObjectRemoved { object })
            }
        }
    }
}
