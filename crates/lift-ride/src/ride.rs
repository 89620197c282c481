//! One running ride and its per-tick state machine.

use log::debug;

use lift_core::{EntityId, LiftConfig, RideId, Tick, Vec3};
use lift_model::Elevator;
use lift_world::World;

use crate::boarding;
use crate::observer::RideObserver;
use crate::registry::ActiveRideRegistry;

/// How a ride ended.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RideOutcome {
    /// Every passenger arrived (or left) on its own.
    Finished,
    /// The deadline passed; stragglers were force-teleported.
    TimedOut,
}

/// A ride in `RUNNING` state, owned by the scheduler.
#[derive(Debug)]
pub struct ActiveRide {
    pub id: RideId,
    pub elevator: Elevator,
    /// Set when the ride should tear down on its *next* tick — after a
    /// timeout or once the last passenger converts to a freezer.  The one
    /// extra tick lets the freezer-hold pass run a final time.
    terminating: bool,
    timed_out: bool,
}

impl ActiveRide {
    pub(crate) fn new(id: RideId, elevator: Elevator) -> Self {
        Self {
            id,
            elevator,
            terminating: false,
            timed_out: false,
        }
    }

    /// Advance the ride one tick.  Returns `true` when the ride tore down
    /// and should be dropped.
    pub(crate) fn tick<W: World, O: RideObserver>(
        &mut self,
        world: &mut W,
        config: &LiftConfig,
        registry: &mut ActiveRideRegistry,
        now: Tick,
        observer: &mut O,
    ) -> bool {
        if self.terminating || self.elevator.occupant_count() == 0 {
            self.teardown(world, registry, observer);
            return true;
        }

        if now > self.elevator.max_end_tick {
            self.timeout(world, config, observer);
            self.terminating = true;
        } else {
            self.collect_arrivals(world, observer);
        }

        self.handle_leavers(world, config, registry, observer);
        self.drive_passengers(world);
        self.hold_freezers(world);

        // All passengers arrived (or were released): one more holding tick,
        // then teardown.
        if self.elevator.passengers.is_empty() {
            self.terminating = true;
        }
        false
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Passengers whose box bottom crossed the destination threshold in the
    /// direction of travel become freezers.
    fn collect_arrivals<W: World, O: RideObserver>(&mut self, world: &W, observer: &mut O) {
        let Some(dest) = self.elevator.dest() else {
            return;
        };
        let going_up = self.elevator.is_going_up();
        let arrival_y = (dest.floor_y() + 1) as f64;
        let button_y = dest.button_y as f64;

        let arrived: Vec<EntityId> = self
            .elevator
            .passengers
            .iter()
            .copied()
            .filter(|&entity| match world.entity_aabb(entity) {
                Some(bb) if going_up => bb.min.y > arrival_y,
                Some(bb) => bb.min.y < button_y,
                None => false,
            })
            .collect();

        for entity in arrived {
            debug!("{entity} reached the destination and waits for the remaining passengers");
            self.elevator.passengers.remove(&entity);
            self.elevator.freezers.insert(entity);
            observer.on_passenger_arrived(self.id, entity);
        }
    }

    /// Deadline handling: remaining passengers are teleported to the
    /// destination, notified, and held with everyone else.
    fn timeout<W: World, O: RideObserver>(
        &mut self,
        world: &mut W,
        config: &LiftConfig,
        observer: &mut O,
    ) {
        debug!(
            "ride {} timed out after {} ticks",
            self.id,
            self.elevator.max_end_tick - self.elevator.start_tick
        );
        if let Some(dest) = self.elevator.dest_floor {
            boarding::teleport_passengers_to(world, &self.elevator, dest);
        }
        let stragglers: Vec<EntityId> = self.elevator.passengers.iter().copied().collect();
        for &entity in &stragglers {
            if world.is_player(entity) {
                observer.on_notify(entity, &config.messages.timeout);
            }
        }
        observer.on_timeout(self.id, &stragglers);
        self.elevator.freeze_all_passengers();
        self.timed_out = true;
    }

    /// Occupants outside the shaft volume: re-centered under the
    /// prevent-leave policy, fully released otherwise.  Occupants that no
    /// longer exist are always dropped from tracking.
    fn handle_leavers<W: World, O: RideObserver>(
        &mut self,
        world: &mut W,
        config: &LiftConfig,
        registry: &mut ActiveRideRegistry,
        observer: &mut O,
    ) {
        let mut gone = Vec::new();
        let mut outside = Vec::new();
        for &entity in self.elevator.passengers.iter().chain(self.elevator.freezers.iter()) {
            match world.entity_aabb(entity) {
                None => gone.push(entity),
                Some(bb) if self.elevator.is_outside_shaft(&bb) => outside.push(entity),
                Some(_) => {}
            }
        }

        for entity in gone {
            self.drop_occupant(entity, registry);
            observer.on_occupant_released(self.id, entity);
        }

        if outside.is_empty() {
            return;
        }
        if config.prevent_leave {
            let center = self.elevator.shaft_volume().center();
            for entity in outside {
                if let Some(pos) = world.entity_pos(entity) {
                    // Horizontal correction only; vertical motion untouched.
                    world.teleport(entity, Vec3::new(center.x, pos.y, center.z));
                }
            }
        } else {
            for entity in outside {
                debug!("leaving occupant {entity} released from ride {}", self.id);
                boarding::reset_entity_physics(world, entity);
                self.drop_occupant(entity, registry);
                observer.on_occupant_released(self.id, entity);
            }
        }
    }

    /// Re-assert every passenger's vertical velocity, overriding host
    /// physics drift.  Occupants inside a vehicle are moved by the vehicle.
    fn drive_passengers<W: World>(&self, world: &mut W) {
        let velocity = if self.elevator.is_going_up() {
            self.elevator.blocks_per_sec()
        } else {
            -self.elevator.blocks_per_sec()
        };
        for &entity in &self.elevator.passengers {
            if world.vehicle_of(entity).is_none() {
                world.set_velocity(entity, Vec3::vertical(velocity));
                world.set_fall_distance(entity, 0.0);
            }
        }
    }

    /// Zero every freezer's motion until the ride concludes.
    fn hold_freezers<W: World>(&self, world: &mut W) {
        for &entity in &self.elevator.freezers {
            if world.vehicle_of(entity).is_none() {
                world.set_velocity(entity, Vec3::ZERO);
                world.set_fall_distance(entity, 0.0);
            }
        }
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Restore the world and let everyone go.
    fn teardown<W: World, O: RideObserver>(
        &mut self,
        world: &mut W,
        registry: &mut ActiveRideRegistry,
        observer: &mut O,
    ) {
        // Bottom-up restoration: a gravity-affected block only lands after
        // its support below is back.
        let mut cache = std::mem::take(&mut self.elevator.block_cache);
        cache.sort_by_key(|block| block.pos.y);
        for block in cache {
            world.set_block(block.pos, block.material);
        }

        for &entity in &self.elevator.freezers {
            boarding::reset_entity_physics(world, entity);
        }
        for &entity in self.elevator.passengers.iter().chain(self.elevator.freezers.iter()) {
            registry.release(entity);
        }

        let outcome = if self.timed_out { RideOutcome::TimedOut } else { RideOutcome::Finished };
        debug!("ride {} ended: {:?}", self.id, outcome);
        observer.on_ride_end(self.id, outcome);
    }

    fn drop_occupant(&mut self, entity: EntityId, registry: &mut ActiveRideRegistry) {
        self.elevator.passengers.remove(&entity);
        self.elevator.freezers.remove(&entity);
        registry.release(entity);
    }
}
