//! The destination-sign protocol: resolve, rewrite, and cycle destinations.
//!
//! Signs are the only UI an elevator has.  The protocol keeps three promises:
//!
//! - **Resolve** reads the committed destination from the triggering column's
//!   sign, applying the out-of-range fallback documented on
//!   [`Elevator::floor_by_level`].
//! - **Write** rewrites every sign of a floor to a `current → dest` pair;
//!   writing the same pair twice yields byte-identical text.
//! - **Cycle** advances the destination shown on one clicked sign to the
//!   next (or previous) floor, skipping the floor the rider stands on.

use log::debug;

use lift_core::{BlockPos, LiftError, LiftResult, Messages, UsageError};
use lift_world::World;

use crate::elevator::Elevator;

/// Read the initial sign's destination level and resolve it to a floor
/// index.  This is what commits `dest_floor` at ride start.
pub fn resolve_destination<W: World>(world: &W, elevator: &Elevator) -> LiftResult<usize> {
    let (floor, sign) = elevator.initial_sign;
    let level = elevator.floors[floor].signs[sign].read_dest_level(world)?;
    elevator.floor_by_level(level)
}

/// Rewrite all signs on `current` to display `current → dest`.
///
/// Stops at the first sign that fails to persist; the ride logic treats
/// that as cosmetic and keeps going.
pub fn write_destination<W: World>(
    world: &mut W,
    messages: &Messages,
    elevator: &Elevator,
    current: usize,
    dest: usize,
) -> LiftResult<()> {
    let current_floor = &elevator.floors[current];
    let dest_floor = &elevator.floors[dest];
    for sign in &current_floor.signs {
        sign.write(world, messages, current_floor, dest_floor)?;
    }
    Ok(())
}

/// Cycle the destination shown on the clicked sign one floor forward or
/// backward, exempting the clicked sign's own floor, and commit the result
/// to `dest_floor`.
///
/// Returns the newly selected floor index.
pub fn select_adjacent<W: World>(
    world: &mut W,
    messages: &Messages,
    elevator: &mut Elevator,
    sign_pos: BlockPos,
    forward: bool,
) -> LiftResult<usize> {
    let current = elevator.floor_of_sign(sign_pos).ok_or_else(|| {
        LiftError::change(format!("no floor owns the clicked sign at {sign_pos}"))
    })?;
    let sign = elevator.floors[current]
        .signs
        .iter()
        .find(|s| s.pos == sign_pos)
        .copied()
        .ok_or_else(|| LiftError::change(format!("sign at {sign_pos} vanished mid-click")))?;

    let shown = elevator.floor_by_level(sign.read_dest_level(world)?)?;
    let selected = if forward {
        elevator.next_floor(shown, Some(current))
    } else {
        elevator.previous_floor(shown, Some(current))
    }
    .ok_or(UsageError::OneFloor)?;

    elevator.dest_floor = Some(selected);
    sign.write(
        world,
        messages,
        &elevator.floors[current],
        &elevator.floors[selected],
    )?;
    debug!(
        "destination on floor {} cycled to level {}",
        elevator.floors[current].level, elevator.floors[selected].level
    );
    Ok(selected)
}
