//! Scenario tests for lift-ride.
//!
//! Rides run against a real `GridWorld` structure discovered by `lift-scan`,
//! so these tests cover the full trigger → scan → board → tick → teardown
//! path.  The canonical fixture is a 2-column, 3-floor shaft with floors
//! every 6 blocks and a base speed of 0.5 (10 blocks/second at the default
//! 100 ms tick: one block per tick).

use lift_core::{BlockPos, EntityId, LiftConfig, Material, RideId, Vec3};
use lift_model::Elevator;
use lift_scan::create_elevator;
use lift_world::{GridWorld, World};

use crate::observer::RideObserver;
use crate::registry::ActiveRideRegistry;
use crate::ride::RideOutcome;
use crate::scheduler::RideScheduler;

const BASE: Material = Material(1);
const FLOOR: Material = Material(2);
const BUTTON: Material = Material(3);
const SIGN: Material = Material(4);
const CARPET: Material = Material(6);

// ── Fixture ───────────────────────────────────────────────────────────────────

fn test_config() -> LiftConfig {
    let mut config = LiftConfig::default();
    config.max_height = 64;
    config.block_speeds.insert(BASE, 0.5);
    config.floor_materials.insert(FLOOR);
    config.button_materials.insert(BUTTON);
    config.sign_materials.insert(SIGN);
    config.shaft_materials.insert(CARPET);
    config
}

fn add_trigger(world: &mut GridWorld, x: i32, level: i32, dest_level: i32) -> BlockPos {
    let button = BlockPos::new(x, (level - 1) * 6 + 2, 0);
    world.set_block(button, BUTTON);
    world.place_sign(
        button.up(),
        SIGN,
        [
            format!("Current floor: {level}"),
            String::new(),
            format!("Destination: {dest_level}"),
            String::new(),
        ],
    );
    button
}

/// 2-column shaft (x = 0..=1, z = 0), base at y = 0, floor surfaces at 0,
/// 6, 12, ...  Returns one button per level.
fn build_shaft(world: &mut GridWorld, levels: i32) -> Vec<BlockPos> {
    world.mark_non_solid(BUTTON);
    world.mark_non_solid(SIGN);
    world.set_block(BlockPos::new(0, 0, 0), BASE);
    world.set_block(BlockPos::new(1, 0, 0), BASE);

    let mut buttons = Vec::new();
    for level in 1..=levels {
        let surface_y = (level - 1) * 6;
        if level > 1 {
            world.set_block(BlockPos::new(0, surface_y, 0), FLOOR);
            world.set_block(BlockPos::new(1, surface_y, 0), FLOOR);
        }
        buttons.push(add_trigger(world, 0, level, level % levels + 1));
    }
    buttons
}

fn scan(world: &mut GridWorld, config: &LiftConfig, button: BlockPos) -> Elevator {
    create_elevator(world, config, button).unwrap().unwrap()
}

/// Spawn a player standing on floor 1 (feet on top of the base).
fn spawn_boarding_player(world: &mut GridWorld) -> EntityId {
    world.spawn_player(Vec3::new(0.5, 1.0, 0.5))
}

fn run_until_done(
    scheduler: &mut RideScheduler,
    world: &mut GridWorld,
    observer: &mut Recorder,
) {
    for _ in 0..200 {
        scheduler.tick(world, observer);
        if scheduler.active_rides() == 0 {
            return;
        }
        world.step(scheduler.clock.tick_secs());
    }
    panic!("ride did not finish within 200 ticks");
}

// ── Recording observer ────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    started: Vec<RideId>,
    arrivals: Vec<EntityId>,
    released: Vec<EntityId>,
    timeouts: Vec<(RideId, Vec<EntityId>)>,
    notes: Vec<(EntityId, String)>,
    ended: Vec<(RideId, RideOutcome)>,
}

impl RideObserver for Recorder {
    fn on_ride_start(&mut self, ride: RideId, _elevator: &Elevator) {
        self.started.push(ride);
    }
    fn on_passenger_arrived(&mut self, _ride: RideId, entity: EntityId) {
        self.arrivals.push(entity);
    }
    fn on_occupant_released(&mut self, _ride: RideId, entity: EntityId) {
        self.released.push(entity);
    }
    fn on_timeout(&mut self, ride: RideId, stragglers: &[EntityId]) {
        self.timeouts.push((ride, stragglers.to_vec()));
    }
    fn on_notify(&mut self, entity: EntityId, message: &str) {
        self.notes.push((entity, message.to_string()));
    }
    fn on_ride_end(&mut self, ride: RideId, outcome: RideOutcome) {
        self.ended.push((ride, outcome));
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

mod registry {
    use super::*;

    #[test]
    fn membership_lifecycle() {
        let mut registry = ActiveRideRegistry::new();
        let (a, b) = (EntityId(1), EntityId(2));
        registry.register(RideId(0), [a, b]);

        assert!(registry.is_riding(a));
        assert_eq!(registry.ride_of(b), Some(RideId(0)));
        assert_eq!(registry.rider_count(), 2);

        assert_eq!(registry.release(a), Some(RideId(0)));
        assert_eq!(registry.release(a), None);
        assert!(!registry.is_riding(a));
        assert!(registry.is_riding(b));
    }
}

// ── Boarding ──────────────────────────────────────────────────────────────────

mod boarding {
    use super::*;

    #[test]
    fn ascending_ride_commits_and_clears_the_destination_floor() {
        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let player = spawn_boarding_player(&mut world);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let mut observer = Recorder::default();
        let ride = scheduler
            .start_ride(&mut world, elevator, &mut observer)
            .unwrap()
            .expect("ride should start");

        let active = scheduler.ride(ride).unwrap();
        assert_eq!(active.elevator.dest().unwrap().level, 2);
        assert!(active.elevator.is_going_up());
        assert!(active.elevator.passengers.contains(&player));
        assert!(scheduler.is_riding(player));
        assert_eq!(observer.started, vec![ride]);

        // Floor 2's surface is open, floor 3's is untouched.
        assert_eq!(world.material_at(BlockPos::new(0, 6, 0)), Material::AIR);
        assert_eq!(world.material_at(BlockPos::new(1, 6, 0)), Material::AIR);
        assert_eq!(world.material_at(BlockPos::new(0, 12, 0)), FLOOR);
        assert_eq!(active.elevator.block_cache.len(), 2);

        // Physics handed over to the scheduler.
        assert_eq!(world.gravity_of(player), Some(false));
        assert!(world.is_flight_exempt(player));
    }

    #[test]
    fn no_passengers_means_no_ride() {
        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let started = scheduler
            .start_ride(&mut world, elevator, &mut Recorder::default())
            .unwrap();
        assert_eq!(started, None);
        assert_eq!(scheduler.active_rides(), 0);
    }

    #[test]
    fn sign_pointing_at_its_own_floor_aborts() {
        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        world.set_sign_lines(
            buttons[0].up(),
            [
                "Current floor: 1".into(),
                String::new(),
                "Destination: 1".into(),
                String::new(),
            ],
        );
        spawn_boarding_player(&mut world);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let started = scheduler
            .start_ride(&mut world, elevator, &mut Recorder::default())
            .unwrap();
        assert_eq!(started, None);
    }

    #[test]
    fn unknown_destination_level_propagates_as_usage_error() {
        use lift_core::{LiftError, UsageError};

        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        world.set_sign_lines(
            buttons[0].up(),
            [
                "Current floor: 1".into(),
                String::new(),
                "Destination: 0".into(),
                String::new(),
            ],
        );
        spawn_boarding_player(&mut world);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let result = scheduler.start_ride(&mut world, elevator, &mut Recorder::default());
        assert!(matches!(
            result,
            Err(LiftError::Usage(UsageError::FloorNotExists(0)))
        ));
    }

    #[test]
    fn shaft_bystanders_become_freezers() {
        let mut config = test_config();
        config.lift_mobs = true;
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let player = spawn_boarding_player(&mut world);
        let pig = world.spawn_mob(Vec3::new(1.5, 4.0, 0.5), 0.9, 0.9);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let ride = scheduler
            .start_ride(&mut world, elevator, &mut Recorder::default())
            .unwrap()
            .unwrap();

        let active = scheduler.ride(ride).unwrap();
        assert!(active.elevator.passengers.contains(&player));
        assert!(active.elevator.freezers.contains(&pig));
        assert!(scheduler.is_riding(pig));
    }

    #[test]
    fn mobs_are_ignored_unless_configured() {
        let config = test_config(); // lift_mobs = false
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        spawn_boarding_player(&mut world);
        let pig = world.spawn_mob(Vec3::new(1.5, 4.0, 0.5), 0.9, 0.9);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let ride = scheduler
            .start_ride(&mut world, elevator, &mut Recorder::default())
            .unwrap()
            .unwrap();
        assert!(!scheduler.is_riding(pig));
        assert!(scheduler.ride(ride).unwrap().elevator.freezers.is_empty());
    }

    #[test]
    fn entities_already_riding_are_not_captured_twice() {
        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        spawn_boarding_player(&mut world);

        let mut scheduler = RideScheduler::new(config.clone());
        let mut observer = Recorder::default();
        let first = scan(&mut world, &config, buttons[0]);
        scheduler.start_ride(&mut world, first, &mut observer).unwrap().unwrap();

        // A second trigger on the same structure finds nobody to board.
        let second = scan(&mut world, &config, buttons[0]);
        let started = scheduler.start_ride(&mut world, second, &mut observer).unwrap();
        assert_eq!(started, None);
        assert_eq!(scheduler.active_rides(), 1);
    }

    #[test]
    fn auto_place_centers_passengers_on_the_start_floor() {
        let mut config = test_config();
        config.auto_place = true;
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let player = world.spawn_player(Vec3::new(1.9, 1.0, 0.9));
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        scheduler
            .start_ride(&mut world, elevator, &mut Recorder::default())
            .unwrap()
            .unwrap();
        assert_eq!(world.entity_pos(player), Some(Vec3::new(1.0, 1.5, 0.5)));
    }
}

// ── Full rides ────────────────────────────────────────────────────────────────

mod riding {
    use super::*;

    #[test]
    fn passengers_ride_up_arrive_and_the_world_is_restored() {
        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let player = spawn_boarding_player(&mut world);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let mut observer = Recorder::default();
        let ride = scheduler
            .start_ride(&mut world, elevator, &mut observer)
            .unwrap()
            .unwrap();

        run_until_done(&mut scheduler, &mut world, &mut observer);

        // Arrived above the destination threshold (floor 2 surface at y=6).
        let final_y = world.entity_pos(player).unwrap().y;
        assert!(final_y > 7.0, "player should be above floor 2, was at y={final_y}");

        assert_eq!(observer.arrivals, vec![player]);
        assert_eq!(observer.ended, vec![(ride, RideOutcome::Finished)]);

        // Floor blocks restored, physics handed back, registry drained.
        assert_eq!(world.material_at(BlockPos::new(0, 6, 0)), FLOOR);
        assert_eq!(world.material_at(BlockPos::new(1, 6, 0)), FLOOR);
        assert_eq!(world.gravity_of(player), Some(true));
        assert_eq!(world.velocity_of(player), Some(Vec3::ZERO));
        assert!(!world.is_flight_exempt(player));
        assert!(!scheduler.is_riding(player));
        assert!(scheduler.registry.is_empty());
    }

    #[test]
    fn descending_ride_opens_the_start_floor() {
        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        // Board on floor 2; its sign points down at floor 1 (2 % 3 + 1 = 3,
        // so rewrite it first).
        world.set_sign_lines(
            buttons[1].up(),
            [
                "Current floor: 2".into(),
                String::new(),
                "Destination: 1".into(),
                String::new(),
            ],
        );
        let player = world.spawn_player(Vec3::new(0.5, 7.0, 0.5));
        let elevator = scan(&mut world, &config, buttons[1]);

        let mut scheduler = RideScheduler::new(config);
        let mut observer = Recorder::default();
        let ride = scheduler
            .start_ride(&mut world, elevator, &mut observer)
            .unwrap()
            .unwrap();

        // Descending clears the start floor's own surface out from under
        // the passengers, not the destination's.
        assert!(!scheduler.ride(ride).unwrap().elevator.is_going_up());
        assert_eq!(world.material_at(BlockPos::new(0, 6, 0)), Material::AIR);

        run_until_done(&mut scheduler, &mut world, &mut observer);

        // Below the destination button (y=2) and back on solid ground.
        assert!(world.entity_pos(player).unwrap().y < 2.0);
        assert_eq!(world.material_at(BlockPos::new(0, 6, 0)), FLOOR);
        assert_eq!(observer.ended, vec![(ride, RideOutcome::Finished)]);
    }

    #[test]
    fn blocks_above_the_floor_are_cleared_and_restored_last() {
        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        // Carpet on floor 2's surface, in the shaft allow-list.
        world.set_block(BlockPos::new(0, 7, 0), CARPET);
        spawn_boarding_player(&mut world);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let mut observer = Recorder::default();
        let ride = scheduler
            .start_ride(&mut world, elevator, &mut observer)
            .unwrap()
            .unwrap();

        assert_eq!(world.material_at(BlockPos::new(0, 7, 0)), Material::AIR);
        assert_eq!(scheduler.ride(ride).unwrap().elevator.block_cache.len(), 3);

        run_until_done(&mut scheduler, &mut world, &mut observer);
        assert_eq!(world.material_at(BlockPos::new(0, 6, 0)), FLOOR);
        assert_eq!(world.material_at(BlockPos::new(0, 7, 0)), CARPET);
    }

    #[test]
    fn vehicles_are_driven_while_their_riders_are_not() {
        let mut config = test_config();
        config.lift_mobs = true;
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let cart = world.spawn_mob(Vec3::new(0.5, 1.0, 0.5), 1.0, 0.7);
        let rider = world.spawn_player(Vec3::new(0.5, 1.7, 0.5));
        world.set_vehicle(rider, Some(cart));
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        scheduler
            .start_ride(&mut world, elevator, &mut Recorder::default())
            .unwrap()
            .unwrap();
        scheduler.tick(&mut world, &mut Recorder::default());

        // The cart gets the vertical velocity; the seated rider is left to
        // the host's vehicle attachment.
        assert_eq!(world.velocity_of(cart), Some(Vec3::vertical(10.0)));
        assert_eq!(world.velocity_of(rider), Some(Vec3::ZERO));
    }
}

// ── Timeout ───────────────────────────────────────────────────────────────────

mod timeout {
    use super::*;

    #[test]
    fn stragglers_are_teleported_and_the_ride_still_ends() {
        let mut config = test_config();
        config.seconds_until_timeout = 0;
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let player = spawn_boarding_player(&mut world);
        let elevator = scan(&mut world, &config, buttons[0]);

        let timeout_text = config.messages.timeout.clone();
        let mut scheduler = RideScheduler::new(config);
        let mut observer = Recorder::default();
        let ride = scheduler
            .start_ride(&mut world, elevator, &mut observer)
            .unwrap()
            .unwrap();

        // Never stepping the world simulates a stuck passenger: the ride
        // deadline (6 ticks of travel + no grace) passes underneath them.
        for _ in 0..20 {
            if scheduler.active_rides() == 0 {
                break;
            }
            scheduler.tick(&mut world, &mut observer);
        }
        assert_eq!(scheduler.active_rides(), 0);

        // Force-teleported to the destination center and notified.
        assert_eq!(world.entity_pos(player), Some(Vec3::new(1.0, 7.5, 0.5)));
        assert_eq!(observer.timeouts, vec![(ride, vec![player])]);
        assert_eq!(observer.notes, vec![(player, timeout_text)]);
        assert_eq!(observer.ended, vec![(ride, RideOutcome::TimedOut)]);

        // Teardown still ran in full.
        assert_eq!(world.material_at(BlockPos::new(0, 6, 0)), FLOOR);
        assert_eq!(world.gravity_of(player), Some(true));
        assert!(!scheduler.is_riding(player));
    }
}

// ── Leaving the shaft ─────────────────────────────────────────────────────────

mod leaving {
    use super::*;

    #[test]
    fn prevent_leave_recenters_horizontally_only() {
        let mut config = test_config();
        config.prevent_leave = true;
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let player = spawn_boarding_player(&mut world);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let mut observer = Recorder::default();
        scheduler.start_ride(&mut world, elevator, &mut observer).unwrap().unwrap();

        for _ in 0..2 {
            scheduler.tick(&mut world, &mut observer);
            world.step(scheduler.clock.tick_secs());
        }
        let mid_ride_y = world.entity_pos(player).unwrap().y;

        // Something shoves the player out of the shaft sideways.
        world.teleport(player, Vec3::new(10.0, mid_ride_y, 0.5));
        scheduler.tick(&mut world, &mut observer);

        // Pulled back to the shaft center at the same height.
        assert_eq!(world.entity_pos(player), Some(Vec3::new(1.0, mid_ride_y, 0.5)));
        assert!(scheduler.is_riding(player));

        run_until_done(&mut scheduler, &mut world, &mut observer);
        assert_eq!(observer.ended.len(), 1);
    }

    #[test]
    fn without_prevent_leave_the_occupant_is_released() {
        let config = test_config(); // prevent_leave = false
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let player = spawn_boarding_player(&mut world);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let mut observer = Recorder::default();
        let ride = scheduler
            .start_ride(&mut world, elevator, &mut observer)
            .unwrap()
            .unwrap();

        scheduler.tick(&mut world, &mut observer);
        world.step(scheduler.clock.tick_secs());
        world.teleport(player, Vec3::new(10.0, 2.0, 0.5));
        scheduler.tick(&mut world, &mut observer);

        assert_eq!(observer.released, vec![player]);
        assert!(!scheduler.is_riding(player));
        assert_eq!(world.gravity_of(player), Some(true));
        assert_eq!(world.entity_pos(player).unwrap().x, 10.0);

        // With its only passenger gone the ride drains on its own.
        run_until_done(&mut scheduler, &mut world, &mut observer);
        assert_eq!(observer.ended, vec![(ride, RideOutcome::Finished)]);
    }

    #[test]
    fn despawned_occupants_are_dropped_from_tracking() {
        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let player = spawn_boarding_player(&mut world);
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let mut observer = Recorder::default();
        scheduler.start_ride(&mut world, elevator, &mut observer).unwrap().unwrap();

        world.despawn(player);
        scheduler.tick(&mut world, &mut observer);
        assert!(!scheduler.is_riding(player));

        run_until_done(&mut scheduler, &mut world, &mut observer);
        assert!(scheduler.registry.is_empty());
    }
}

// ── External events ───────────────────────────────────────────────────────────

mod events {
    use super::*;

    #[test]
    fn release_entity_removes_a_rider_mid_ride() {
        let config = test_config();
        let mut world = GridWorld::new();
        let buttons = build_shaft(&mut world, 3);
        let quitter = spawn_boarding_player(&mut world);
        let stayer = world.spawn_player(Vec3::new(1.5, 1.0, 0.5));
        let elevator = scan(&mut world, &config, buttons[0]);

        let mut scheduler = RideScheduler::new(config);
        let mut observer = Recorder::default();
        let ride = scheduler
            .start_ride(&mut world, elevator, &mut observer)
            .unwrap()
            .unwrap();

        scheduler.tick(&mut world, &mut observer);
        assert!(scheduler.release_entity(&mut world, quitter));
        assert!(!scheduler.release_entity(&mut world, quitter));

        assert!(!scheduler.is_riding(quitter));
        assert_eq!(world.gravity_of(quitter), Some(true));
        assert!(scheduler.is_riding(stayer));

        run_until_done(&mut scheduler, &mut world, &mut observer);
        assert_eq!(observer.arrivals, vec![stayer]);
        assert_eq!(observer.ended, vec![(ride, RideOutcome::Finished)]);
    }
}
