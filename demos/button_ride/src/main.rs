//! button_ride — smallest end-to-end demo for the rust_lift framework.
//!
//! Builds a 3-floor elevator in an in-memory world, has a player press the
//! ground-floor button, and ticks the scheduler until the ride completes,
//! printing the player's height along the way.  Run with
//! `RUST_LOG=debug` to watch the scanner and scheduler narrate.

use anyhow::{Context, Result, bail};
use log::info;

use lift_core::{BlockPos, EntityId, LiftConfig, Material, RideId, Vec3};
use lift_model::Elevator;
use lift_ride::{RideObserver, RideOutcome, RideScheduler};
use lift_scan::create_elevator;
use lift_world::{GridWorld, World};

// ── Materials of the demo world ───────────────────────────────────────────────

const IRON_BLOCK: Material = Material(1); // base, speed 0.5
const GLASS: Material = Material(2); //      floor surfaces
const STONE_BUTTON: Material = Material(3);
const OAK_WALL_SIGN: Material = Material(4);

const FLOOR_NAMES: [&str; 3] = ["Lobby", "Offices", "Roof"];

fn demo_config() -> LiftConfig {
    let mut config = LiftConfig::default();
    config.max_height = 64;
    config.auto_place = true;
    config.block_speeds.insert(IRON_BLOCK, 0.5);
    config.floor_materials.insert(GLASS);
    config.button_materials.insert(STONE_BUTTON);
    config.sign_materials.insert(OAK_WALL_SIGN);
    config
}

/// 2×2 footprint at y=0, floors every 6 blocks.  Returns the ground-floor
/// button.
fn build_tower(world: &mut GridWorld) -> BlockPos {
    world.mark_non_solid(STONE_BUTTON);
    world.mark_non_solid(OAK_WALL_SIGN);

    for x in 0..2 {
        for z in 0..2 {
            world.set_block(BlockPos::new(x, 0, z), IRON_BLOCK);
        }
    }

    let mut buttons = Vec::new();
    for level in 1..=3 {
        let surface_y = (level - 1) * 6;
        if level > 1 {
            for x in 0..2 {
                for z in 0..2 {
                    world.set_block(BlockPos::new(x, surface_y, z), GLASS);
                }
            }
        }
        let button = BlockPos::new(0, surface_y + 2, 0);
        world.set_block(button, STONE_BUTTON);
        // Destination sign above the button; scan repair would fill these in
        // too, but the demo writes honest values.
        world.place_sign(
            button.up(),
            OAK_WALL_SIGN,
            [
                format!("Current floor: {level}"),
                FLOOR_NAMES[level as usize - 1].to_string(),
                format!("Destination: {}", level % 3 + 1),
                FLOOR_NAMES[(level % 3 + 1) as usize - 1].to_string(),
            ],
        );
        // Label sign below the button names the floor.
        world.place_sign(
            button.down(),
            OAK_WALL_SIGN,
            [
                String::new(),
                FLOOR_NAMES[level as usize - 1].to_string(),
                String::new(),
                String::new(),
            ],
        );
        buttons.push(button);
    }
    buttons[0]
}

// ── Observer ──────────────────────────────────────────────────────────────────

struct ConsoleObserver;

impl RideObserver for ConsoleObserver {
    fn on_ride_start(&mut self, ride: RideId, elevator: &Elevator) {
        info!(
            "{ride}: {} -> {} at {} blocks/s",
            elevator.start().name,
            elevator.dest().map(|f| f.name.as_str()).unwrap_or("?"),
            elevator.blocks_per_sec()
        );
    }
    fn on_passenger_arrived(&mut self, ride: RideId, entity: EntityId) {
        info!("{ride}: {entity} arrived");
    }
    fn on_notify(&mut self, entity: EntityId, message: &str) {
        info!("[to {entity}] {message}");
    }
    fn on_ride_end(&mut self, ride: RideId, outcome: RideOutcome) {
        info!("{ride}: ended ({outcome:?})");
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = demo_config();
    config.validate().context("demo configuration")?;

    let mut world = GridWorld::new();
    let button = build_tower(&mut world);
    let player = world.spawn_player(Vec3::new(0.5, 1.0, 0.5));
    println!("player spawned in the lobby at {}", world.entity_pos(player).unwrap());

    // Press the lobby button.
    let elevator = create_elevator(&mut world, &config, button)
        .context("scan failed")?
        .context("that button is not part of an elevator")?;
    println!(
        "scanned elevator: {} floors over a {}-block footprint",
        elevator.floors.len(),
        elevator.footprint.len()
    );

    let mut scheduler = RideScheduler::new(config);
    let mut observer = ConsoleObserver;
    let Some(_ride) = scheduler.start_ride(&mut world, elevator, &mut observer)? else {
        bail!("no ride started — is the player standing on the boarding floor?");
    };

    // The host heartbeat: one scheduler tick + one physics step per 100 ms.
    let mut ticks = 0;
    while scheduler.active_rides() > 0 {
        scheduler.tick(&mut world, &mut observer);
        world.step(scheduler.clock.tick_secs());
        ticks += 1;
        if ticks % 2 == 0 {
            println!("  t={:>4} ms  player at y={:.1}", ticks * 100, world.entity_pos(player).unwrap().y);
        }
        if ticks > 1_000 {
            bail!("ride never finished");
        }
    }

    println!(
        "ride complete after {} ticks; player is at {}",
        ticks,
        world.entity_pos(player).unwrap()
    );
    Ok(())
}
