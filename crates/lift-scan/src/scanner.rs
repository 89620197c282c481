//! Structure discovery from a triggering button.

use std::collections::VecDeque;

use log::{debug, warn};
use rustc_hash::FxHashSet;

use lift_core::{BlockPos, LiftConfig, LiftError, LiftResult, UsageError};
use lift_model::{DEFAULT_SPEED, Elevator, Floor, FloorSign, LINE_CURRENT_NAME, protocol};
use lift_world::World;

/// Build an elevator from the button at `button`.
///
/// Returns `Ok(None)` when the location simply is not an elevator (no valid
/// button triple, no base block below).  Returns a usage error for
/// structures a player clearly meant to be an elevator but got wrong (a
/// single floor), and a structural error when discovery contradicts itself.
pub fn create_elevator<W: World>(
    world: &mut W,
    config: &LiftConfig,
    button: BlockPos,
) -> LiftResult<Option<Elevator>> {
    if !is_lift_trigger(world, config, button) {
        return Ok(None);
    }

    let footprint = find_base_blocks_below(world, config, button);
    if footprint.is_empty() {
        debug!("no base block below {button}; assuming this is not supposed to be an elevator");
        return Ok(None);
    }

    let floors = discover_floors(world, config, &footprint);
    if floors.len() <= 1 {
        return Err(UsageError::OneFloor.into());
    }
    debug!("found {} base blocks and {} floors", footprint.len(), floors.len());

    let start_floor = floors
        .iter()
        .position(|f| f.button_y == button.y)
        .ok_or_else(|| LiftError::structural("could not extract start floor from discovered floors"))?;
    let initial_sign = floors[start_floor]
        .signs
        .iter()
        .position(|s| s.pos.x == button.x && s.pos.z == button.z)
        .ok_or_else(|| LiftError::structural("could not extract initial floor sign on start floor"))?;

    let speed = config
        .block_speed(world.material_at(footprint[0]))
        .unwrap_or(DEFAULT_SPEED);

    let elevator = Elevator::new(footprint, floors, start_floor, (start_floor, initial_sign), speed);
    repair_invalid_signs(world, config, &elevator);
    Ok(Some(elevator))
}

/// The local structure test: a button block with a sign directly above and
/// a floor or base material two blocks below.
pub fn is_lift_trigger<W: World>(world: &W, config: &LiftConfig, pos: BlockPos) -> bool {
    if !config.is_button(world.material_at(pos)) || !is_sign_at(world, config, pos.up()) {
        return false;
    }
    let below = world.material_at(pos.down_n(2));
    config.is_floor_block(below) || config.is_base_block(below)
}

/// A sign needs both the material and actual sign text behind it.
fn is_sign_at<W: World>(world: &W, config: &LiftConfig, pos: BlockPos) -> bool {
    config.is_sign(world.material_at(pos)) && world.sign_lines(pos).is_some()
}

/// Whether a shaft may pass through `pos`: anything non-solid, plus floors,
/// buttons, signs, and the configured extra allow-list.
fn is_shaft_passable<W: World>(world: &W, config: &LiftConfig, pos: BlockPos) -> bool {
    let material = world.material_at(pos);
    !world.is_solid(material)
        || config.is_floor_block(material)
        || config.is_button(material)
        || is_sign_at(world, config, pos)
        || config.is_shaft_block(material)
}

/// Walk straight down from the button until the first non-passable block.
/// That block must be a base material; anything else means "not an
/// elevator".
fn find_base_blocks_below<W: World>(
    world: &W,
    config: &LiftConfig,
    button: BlockPos,
) -> Vec<BlockPos> {
    let mut y = button.y;
    while y >= config.min_height {
        let pos = button.with_y(y);
        if is_shaft_passable(world, config, pos) {
            y -= 1;
            continue;
        }
        if !config.is_base_block(world.material_at(pos)) {
            return Vec::new();
        }
        return flood_fill_footprint(world, config, pos);
    }
    Vec::new()
}

/// Collect the contiguous same-material footprint around `start`.
///
/// Iterative breadth-first fill over 4-connected neighbors (north, east,
/// south, west — see [`BlockPos::cardinal_neighbors`]) with an explicit
/// queue and visited set.  When the configured area cap is reached the fill
/// truncates in discovery order, so the same structure always yields the
/// same footprint.
fn flood_fill_footprint<W: World>(
    world: &W,
    config: &LiftConfig,
    start: BlockPos,
) -> Vec<BlockPos> {
    let material = world.material_at(start);
    let mut footprint = Vec::new();
    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        footprint.push(pos);
        if footprint.len() == config.max_lift_area {
            debug!("footprint truncated at the configured area cap of {}", config.max_lift_area);
            break;
        }
        for neighbor in pos.cardinal_neighbors() {
            if world.material_at(neighbor) == material && seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    footprint
}

/// Scan every footprint column upward, merging valid button triples at one
/// height into a single floor.  The first column breaking shaft passability
/// ends the scan.
fn discover_floors<W: World>(
    world: &W,
    config: &LiftConfig,
    footprint: &[BlockPos],
) -> Vec<Floor> {
    let base_y = footprint[0].y;
    let mut floors = Vec::new();
    let mut level = 1;

    for y in (base_y + 1)..config.max_height {
        let mut buttons = Vec::new();
        for column in footprint {
            let pos = column.with_y(y);
            if !is_shaft_passable(world, config, pos) {
                return floors;
            }
            if is_lift_trigger(world, config, pos) {
                buttons.push(pos);
            }
        }
        if !buttons.is_empty() {
            floors.push(build_floor(world, config, &buttons, level));
            level += 1;
        }
    }
    floors
}

/// One floor from the buttons found at a shared height.  The display name
/// comes from the first contributing column with a label sign directly below
/// its button.
fn build_floor<W: World>(
    world: &W,
    config: &LiftConfig,
    buttons: &[BlockPos],
    level: i32,
) -> Floor {
    let signs = buttons.iter().map(|b| FloorSign::new(b.up())).collect();
    let name = buttons
        .iter()
        .filter(|b| is_sign_at(world, config, b.down()))
        .find_map(|b| world.sign_lines(b.down()).map(|lines| lines[LINE_CURRENT_NAME].clone()))
        .unwrap_or_default();
    Floor {
        level,
        name,
        button_y: buttons[0].y,
        signs,
    }
}

/// Floors carrying any unusable sign get all their signs rewritten to point
/// at the next cyclic floor, so every sign stays rideable.  Write failures
/// are cosmetic and only logged.
fn repair_invalid_signs<W: World>(world: &mut W, config: &LiftConfig, elevator: &Elevator) {
    for index in 0..elevator.floors.len() {
        let any_invalid = elevator.floors[index]
            .signs
            .iter()
            .any(|sign| !sign.is_valid(world));
        if !any_invalid {
            continue;
        }
        let next = if index + 1 == elevator.floors.len() { 0 } else { index + 1 };
        if let Err(e) = protocol::write_destination(world, &config.messages, elevator, index, next) {
            warn!(
                "could not repair signs on floor {}: {e}",
                elevator.floors[index].level
            );
        }
    }
}
