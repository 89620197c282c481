//! Unit tests for lift-core.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{Aabb, BlockPos, EntityId, LiftConfig, LiftError, Material, Tick, TickClock, Vec3};

fn configured() -> LiftConfig {
    let mut config = LiftConfig::default();
    config.block_speeds.insert(Material(1), 0.5);
    config.button_materials.insert(Material(2));
    config.sign_materials.insert(Material(3));
    config.floor_materials.insert(Material(4));
    config
}

// ── ids ───────────────────────────────────────────────────────────────────────

mod ids {
    use super::*;

    #[test]
    fn default_is_invalid_sentinel() {
        assert_eq!(EntityId::default(), EntityId::INVALID);
        assert_eq!(EntityId::INVALID.0, u64::MAX);
    }

    #[test]
    fn display_includes_type_name() {
        assert_eq!(EntityId(7).to_string(), "EntityId(7)");
    }
}

// ── pos ───────────────────────────────────────────────────────────────────────

mod pos {
    use super::*;

    #[test]
    fn neighbor_order_is_north_east_south_west() {
        let p = BlockPos::new(10, 5, 10);
        assert_eq!(
            p.cardinal_neighbors(),
            [
                BlockPos::new(10, 5, 9),
                BlockPos::new(11, 5, 10),
                BlockPos::new(10, 5, 11),
                BlockPos::new(9, 5, 10),
            ]
        );
    }

    #[test]
    fn vertical_helpers() {
        let p = BlockPos::new(0, 10, 0);
        assert_eq!(p.up().y, 11);
        assert_eq!(p.down().y, 9);
        assert_eq!(p.down_n(2).y, 8);
        assert_eq!(p.with_y(42).y, 42);
    }

    #[test]
    fn aabb_from_corners_normalizes() {
        let b = Aabb::from_corners(Vec3::new(3.0, 0.0, 3.0), Vec3::new(1.0, 5.0, 1.0));
        assert_eq!(b.min, Vec3::new(1.0, 0.0, 1.0));
        assert_eq!(b.max, Vec3::new(3.0, 5.0, 3.0));
    }

    #[test]
    fn aabb_overlap_and_containment() {
        let shaft = Aabb::from_corners(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 10.0, 2.0));
        let inside = Aabb::from_corners(Vec3::new(0.5, 1.0, 0.5), Vec3::new(1.5, 2.8, 1.5));
        let outside = Aabb::from_corners(Vec3::new(5.0, 1.0, 5.0), Vec3::new(6.0, 2.8, 6.0));
        let touching = Aabb::from_corners(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 10.0, 2.0));

        assert!(shaft.overlaps(&inside));
        assert!(!shaft.overlaps(&outside));
        // Sharing a face is not an overlap.
        assert!(!shaft.overlaps(&touching));

        assert!(shaft.contains(Vec3::new(1.0, 5.0, 1.0)));
        assert!(!shaft.contains(Vec3::new(2.0, 5.0, 1.0))); // max is exclusive
    }

    #[test]
    fn aabb_center_and_height() {
        let b = Aabb::from_corners(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 10.0, 4.0));
        assert_eq!(b.center(), Vec3::new(1.0, 5.0, 2.0));
        assert_eq!(b.height(), 10.0);
    }
}

// ── time ──────────────────────────────────────────────────────────────────────

mod time {
    use super::*;

    #[test]
    fn ticks_for_ms_rounds_up() {
        let clock = TickClock::new(100);
        assert_eq!(clock.ticks_for_ms(0), 0);
        assert_eq!(clock.ticks_for_ms(100), 1);
        assert_eq!(clock.ticks_for_ms(101), 2);
        assert_eq!(clock.ticks_for_secs(5), 50);
    }

    #[test]
    fn advance_and_elapsed() {
        let mut clock = TickClock::new(100);
        for _ in 0..7 {
            clock.advance();
        }
        assert_eq!(clock.current_tick, Tick(7));
        assert_eq!(clock.elapsed_ms(), 700);
        assert_eq!(clock.tick_secs(), 0.1);
    }

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(3) + 4, Tick(7));
        assert_eq!(Tick(7) - Tick(3), 4);
        assert_eq!(Tick(2).offset(5), Tick(7));
        assert_eq!(Tick(9).to_string(), "T9");
    }
}

// ── config ────────────────────────────────────────────────────────────────────

mod config {
    use super::*;

    #[test]
    fn valid_config_passes() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn material_predicates() {
        let config = configured();
        assert!(config.is_base_block(Material(1)));
        assert!(config.is_button(Material(2)));
        assert!(config.is_sign(Material(3)));
        assert!(config.is_floor_block(Material(4)));
        assert!(!config.is_shaft_block(Material(4)));
        assert_eq!(config.block_speed(Material(1)), Some(0.5));
        assert_eq!(config.block_speed(Material(9)), None);
    }

    #[test]
    fn zero_area_rejected() {
        let mut config = configured();
        config.max_lift_area = 0;
        assert!(matches!(config.validate(), Err(LiftError::Config(_))));
    }

    #[test]
    fn inverted_height_bounds_rejected() {
        let mut config = configured();
        config.min_height = 300;
        assert!(matches!(config.validate(), Err(LiftError::Config(_))));
    }

    #[test]
    fn nonpositive_speed_rejected() {
        let mut config = configured();
        config.block_speeds.insert(Material(8), 0.0);
        assert!(matches!(config.validate(), Err(LiftError::Config(_))));
    }

    #[test]
    fn missing_base_materials_rejected() {
        let mut config = configured();
        config.block_speeds = FxHashMap::default();
        assert!(matches!(config.validate(), Err(LiftError::Config(_))));
    }

    #[test]
    fn missing_button_materials_rejected() {
        let mut config = configured();
        config.button_materials = FxHashSet::default();
        assert!(matches!(config.validate(), Err(LiftError::Config(_))));
    }
}
