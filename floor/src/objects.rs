//! Registry of placed objects and identifier allocation.

use std::collections::BTreeMap;

use floorplan_core::{
    FloorError, FloorEvent, ObjectId, ObjectKind, TileAddress, TileRect,
};

use crate::FloorData;

/// Snapshot of an object placed on the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedObject {
    /// Identifier allocated when the object was placed.
    pub id: ObjectId,
    /// Kind of object.
    pub kind: ObjectKind,
    /// Tiles covered by the object.
    pub footprint: TileRect,
}

impl PlacedObject {
    /// North-west tile the object is anchored at.
    #[must_use]
    pub const fn anchor(&self) -> TileAddress {
        self.footprint.origin()
    }
}

/// Objects placed on one floor.
///
/// Tile occupancy lives in [`FloorData`]; the registry owns the object records
/// and keeps both sides consistent. Identifiers are never reused within a
/// registry's lifetime, even after [`ObjectsData::clear`].
#[derive(Clone, Debug, Default)]
pub struct ObjectsData {
    entries: BTreeMap<ObjectId, PlacedObject>,
    next_object_id: u32,
}

impl ObjectsData {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places an object anchored at the provided tile.
    ///
    /// The whole footprint is checked before any tile is claimed, so a failed
    /// placement leaves the floor untouched.
    pub fn place(
        &mut self,
        floor: &mut FloorData,
        kind: ObjectKind,
        anchor: TileAddress,
        out_events: &mut Vec<FloorEvent>,
    ) -> Result<ObjectId, FloorError> {
        let footprint = TileRect::from_origin_and_size(anchor, kind.footprint());
        if !floor.extent().contains_rect(footprint) {
            return Err(FloorError::OutOfBounds);
        }
        if let Some((tile, occupant)) = footprint
            .tiles()
            .find_map(|tile| floor.occupant(tile).map(|occupant| (tile, occupant)))
        {
            return Err(FloorError::TileOccupied { tile, occupant });
        }

        let id = ObjectId::new(self.next_object_id);
        self.next_object_id = self.next_object_id.wrapping_add(1);
        for tile in footprint.tiles() {
            floor.set_tile_occupant(tile, Some(id), out_events)?;
        }
        let _ = self.entries.insert(
            id,
            PlacedObject {
                id,
                kind,
                footprint,
            },
        );
        out_events.push(FloorEvent::ObjectPlaced {
            object: id,
            kind,
            footprint,
        });
        Ok(id)
    }

    /// Removes an object and vacates every tile it covered.
    pub fn remove(
        &mut self,
        floor: &mut FloorData,
        id: ObjectId,
        out_events: &mut Vec<FloorEvent>,
    ) -> Result<PlacedObject, FloorError> {
        let object = self
            .entries
            .remove(&id)
            .ok_or(FloorError::MissingObject(id))?;
        for tile in object.footprint.tiles() {
            floor.set_tile_occupant(tile, None, out_events)?;
        }
        out_events.push(FloorEvent::ObjectRemoved {
            object: id,
            footprint: object.footprint,
        });
        Ok(object)
    }

    /// Looks up an object by identifier.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.entries.get(&id)
    }

    /// Object covering the tile, if any.
    #[must_use]
    pub fn object_at(&self, floor: &FloorData, tile: TileAddress) -> Option<&PlacedObject> {
        floor.occupant(tile).and_then(|id| self.get(id))
    }

    /// Iterates objects in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &PlacedObject> {
        self.entries.values()
    }

    /// Number of placed objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether no objects are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every object without touching tile occupancy.
    ///
    /// Callers clear the floor alongside the registry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
