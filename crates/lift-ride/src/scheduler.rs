//! The ride scheduler: owns all active rides and the logical clock.

use log::debug;

use lift_core::{EntityId, LiftConfig, LiftResult, RideId, TickClock};
use lift_model::Elevator;
use lift_world::World;

use crate::boarding;
use crate::observer::RideObserver;
use crate::registry::ActiveRideRegistry;
use crate::ride::ActiveRide;

/// Drives every active elevator from one heartbeat.
///
/// The embedding calls [`tick`][Self::tick] at a fixed period (the clock's
/// `tick_duration_ms`, 100 ms by default).  Each tick, every ride's state
/// machine runs to completion before the next ride is touched — rides are
/// time-sliced, never concurrent.  External events must come in through
/// [`release_entity`][Self::release_entity] (or another `&mut self` method)
/// on the same thread, which is what serializes them against tick
/// execution.
pub struct RideScheduler {
    pub config: LiftConfig,
    pub clock: TickClock,
    pub registry: ActiveRideRegistry,
    rides: Vec<ActiveRide>,
    next_ride_id: u32,
}

impl RideScheduler {
    pub fn new(config: LiftConfig) -> Self {
        Self::with_clock(config, TickClock::default())
    }

    pub fn with_clock(config: LiftConfig, clock: TickClock) -> Self {
        Self {
            config,
            clock,
            registry: ActiveRideRegistry::new(),
            rides: Vec::new(),
            next_ride_id: 0,
        }
    }

    // ── Ride lifecycle ────────────────────────────────────────────────────

    /// Board and commit a scanned elevator.
    ///
    /// `Ok(None)` means no ride started (nobody on the boarding floor, or
    /// the sign points at its own floor) — not an error.  Usage and
    /// structural failures from destination resolution propagate to the
    /// caller; once this returns `Ok(Some(..))` the ride never raises again.
    pub fn start_ride<W: World, O: RideObserver>(
        &mut self,
        world: &mut W,
        mut elevator: Elevator,
        observer: &mut O,
    ) -> LiftResult<Option<RideId>> {
        let now = self.clock.current_tick;
        if !boarding::board(world, &self.config, &self.registry, &mut elevator, now, &self.clock)? {
            return Ok(None);
        }

        let id = RideId(self.next_ride_id);
        self.next_ride_id += 1;
        self.registry.register(
            id,
            elevator.passengers.iter().chain(elevator.freezers.iter()).copied(),
        );
        debug!(
            "ride {id} started on floor {} with {} passengers, {} freezers",
            elevator.start().level,
            elevator.passengers.len(),
            elevator.freezers.len()
        );
        observer.on_ride_start(id, &elevator);
        self.rides.push(ActiveRide::new(id, elevator));
        Ok(Some(id))
    }

    /// Advance the clock and run one tick of every active ride.  Finished
    /// rides are dropped after their teardown.
    pub fn tick<W: World, O: RideObserver>(&mut self, world: &mut W, observer: &mut O) {
        self.clock.advance();
        let now = self.clock.current_tick;

        let mut i = 0;
        while i < self.rides.len() {
            let finished = self.rides[i].tick(world, &self.config, &mut self.registry, now, observer);
            if finished {
                self.rides.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    // ── External events ───────────────────────────────────────────────────

    /// Remove `entity` from whatever ride it occupies and restore its
    /// physics — the funnel for quit/disconnect/world-change events.
    ///
    /// Returns `false` if the entity was not riding.
    pub fn release_entity<W: World>(&mut self, world: &mut W, entity: EntityId) -> bool {
        let Some(ride_id) = self.registry.release(entity) else {
            return false;
        };
        if let Some(ride) = self.rides.iter_mut().find(|r| r.id == ride_id) {
            ride.elevator.passengers.remove(&entity);
            ride.elevator.freezers.remove(&entity);
        }
        boarding::reset_entity_physics(world, entity);
        debug!("{entity} released from ride {ride_id} by external event");
        true
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn is_riding(&self, entity: EntityId) -> bool {
        self.registry.is_riding(entity)
    }

    pub fn active_rides(&self) -> usize {
        self.rides.len()
    }

    pub fn ride(&self, id: RideId) -> Option<&ActiveRide> {
        self.rides.iter().find(|r| r.id == id)
    }
}
