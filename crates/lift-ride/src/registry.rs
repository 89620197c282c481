//! Process-wide membership index of entities currently riding.
//!
//! The registry answers one question fast — "is this entity already riding
//! something?" — which boarding uses to keep an entity from being captured
//! by two overlapping rides.  It is plain data passed by reference, never a
//! global.

use rustc_hash::FxHashMap;

use lift_core::{EntityId, RideId};

/// Entity → ride membership for all currently running rides.
#[derive(Default, Debug)]
pub struct ActiveRideRegistry {
    riders: FxHashMap<EntityId, RideId>,
}

impl ActiveRideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `entity` is a passenger or freezer of any active ride.
    #[inline]
    pub fn is_riding(&self, entity: EntityId) -> bool {
        self.riders.contains_key(&entity)
    }

    /// The ride `entity` currently belongs to, if any.
    pub fn ride_of(&self, entity: EntityId) -> Option<RideId> {
        self.riders.get(&entity).copied()
    }

    /// Record every occupant of a ride that just entered `RUNNING`.
    pub fn register(&mut self, ride: RideId, occupants: impl IntoIterator<Item = EntityId>) {
        for entity in occupants {
            self.riders.insert(entity, ride);
        }
    }

    /// Drop one entity's membership (left the shaft, quit, or teardown).
    pub fn release(&mut self, entity: EntityId) -> Option<RideId> {
        self.riders.remove(&entity)
    }

    /// Total entities riding across all active rides.
    pub fn rider_count(&self) -> usize {
        self.riders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.riders.is_empty()
    }
}
