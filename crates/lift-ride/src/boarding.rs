//! Boarding: everything that happens between a resolved trigger and the
//! first running tick.

use log::debug;
use rustc_hash::FxHashSet;

use lift_core::{BlockPos, EntityId, LiftConfig, LiftResult, Material, Tick, TickClock, Vec3};
use lift_model::{CachedBlock, Elevator, Floor, protocol};
use lift_world::World;

use crate::registry::ActiveRideRegistry;

/// Resolve the destination, capture and partition occupants, clear the
/// floor band, and fix the ride deadline.
///
/// Returns `Ok(false)` when no ride should start: nobody is standing on the
/// boarding floor, or the sign points at the floor it stands on.
pub(crate) fn board<W: World>(
    world: &mut W,
    config: &LiftConfig,
    registry: &ActiveRideRegistry,
    elevator: &mut Elevator,
    now: Tick,
    clock: &TickClock,
) -> LiftResult<bool> {
    let dest = protocol::resolve_destination(world, elevator)?;
    if dest == elevator.start_floor {
        debug!("sign on floor {} points at itself; not starting", elevator.start().level);
        return Ok(false);
    }
    elevator.dest_floor = Some(dest);

    // ── Capture and partition ─────────────────────────────────────────────
    //
    // Everything inside the shaft volume that is not already riding another
    // elevator rides along: on the boarding floor as a passenger, anywhere
    // else as a freezer (held motionless rather than moved).
    let shaft = *elevator.shaft_volume();
    let world_ref: &W = world;
    let candidates = world_ref.entities_in(&shaft, &|id| {
        (config.lift_mobs || world_ref.is_player(id)) && !registry.is_riding(id)
    });
    debug!("found {} entities in {:?}", candidates.len(), shaft);

    let mut passengers = FxHashSet::default();
    let mut freezers = FxHashSet::default();
    for entity in candidates {
        if is_entity_on_floor(world_ref, elevator.start(), entity) {
            passengers.insert(entity);
        } else {
            freezers.insert(entity);
        }
    }
    if passengers.is_empty() {
        debug!("no passengers in elevator");
        return Ok(false);
    }
    elevator.passengers = passengers;
    elevator.freezers = freezers;

    if config.auto_place {
        teleport_passengers_to(world, elevator, elevator.start_floor);
    }

    clear_floor_blocks(world, config, elevator);

    for entity in elevator.passengers.iter().chain(elevator.freezers.iter()) {
        prepare_entity_physics_for(world, *entity);
    }

    elevator.init_time_measures(now, clock, config);
    Ok(true)
}

/// An entity boards iff its feet are within the floor's surface band
/// (`floor_y ..= floor_y + 2`).  Riders of vehicles measure from the
/// vehicle's floor, not their own seat height.
fn is_entity_on_floor<W: World>(world: &W, floor: &Floor, entity: EntityId) -> bool {
    let Some(bb) = world.entity_aabb(entity) else {
        return false;
    };
    let mut feet_y = bb.min.y;
    if let Some(vehicle) = world.vehicle_of(entity)
        && let Some(vehicle_bb) = world.entity_aabb(vehicle)
    {
        feet_y -= vehicle_bb.height();
    }
    feet_y >= floor.floor_y() as f64 && feet_y <= (floor.floor_y() + 2) as f64
}

/// Teleport all current passengers to the shaft center on `floor`.
pub(crate) fn teleport_passengers_to<W: World>(world: &mut W, elevator: &Elevator, floor: usize) {
    let center = elevator.center(floor);
    for &entity in &elevator.passengers {
        world.teleport(entity, center);
    }
}

/// Remove the floor band between start and destination, caching originals.
///
/// Per footprint column and selected floor: the floor-surface block goes if
/// it is a configured floor material; a non-air, non-sign block sitting on
/// it (carpet, rail, redstone dust) goes with it.
fn clear_floor_blocks<W: World>(world: &mut W, config: &LiftConfig, elevator: &mut Elevator) {
    let surface_heights: Vec<i32> = elevator
        .floors_to_clear()
        .into_iter()
        .map(|i| elevator.floors[i].floor_y())
        .collect();
    let columns = elevator.footprint.clone();

    for column in &columns {
        for &floor_y in &surface_heights {
            let floor_pos = column.with_y(floor_y);
            if !config.is_floor_block(world.material_at(floor_pos)) {
                continue;
            }
            let above = floor_pos.up();
            let above_material = world.material_at(above);
            if !above_material.is_air() && !config.is_sign(above_material) {
                save_and_clear(world, elevator, above);
            }
            save_and_clear(world, elevator, floor_pos);
        }
    }
}

fn save_and_clear<W: World>(world: &mut W, elevator: &mut Elevator, pos: BlockPos) {
    elevator.save_block(CachedBlock {
        pos,
        material: world.material_at(pos),
    });
    world.set_block(pos, Material::AIR);
}

/// Gravity off, flight exemption on — an occupant is the scheduler's to
/// move now.
pub(crate) fn prepare_entity_physics_for<W: World>(world: &mut W, entity: EntityId) {
    world.set_gravity(entity, false);
    world.set_flight_exempt(entity, true);
}

/// Hand an entity back to the host's physics.
pub(crate) fn reset_entity_physics<W: World>(world: &mut W, entity: EntityId) {
    world.set_fall_distance(entity, 0.0);
    world.set_velocity(entity, Vec3::ZERO);
    world.set_gravity(entity, true);
    world.set_flight_exempt(entity, false);
}
