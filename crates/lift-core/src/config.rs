//! Runtime configuration.
//!
//! `LiftConfig` is a plain validated struct: reading it from a file (and
//! migrating old formats) is the embedding application's concern, which keeps
//! this crate free of any file-format dependency.  All lookups the scanner
//! and scheduler perform on hot paths are O(1) set/map membership tests.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{LiftError, LiftResult};
use crate::material::Material;
use crate::messages::Messages;

/// Everything the scanner and the movement scheduler need to know about the
/// world's conventions: which materials form elevators, how fast each base
/// material rides, and the behavioral policy flags.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LiftConfig {
    /// Upper bound on footprint size; the flood-fill truncates here.
    pub max_lift_area: usize,

    /// Exclusive upper bound for the upward floor scan.
    pub max_height: i32,

    /// Inclusive lower bound for the downward base-block search.
    pub min_height: i32,

    /// Teleport passengers to the shaft center before departure.
    pub auto_place: bool,

    /// Allow non-player entities to ride.
    pub lift_mobs: bool,

    /// Re-center occupants that drift out of the shaft instead of releasing
    /// them.
    pub prevent_leave: bool,

    /// Grace period added to the computed ride duration before a ride is
    /// forcibly completed.
    pub seconds_until_timeout: u32,

    /// Base material → vertical speed.  Membership in this map is what makes
    /// a material a base material.
    pub block_speeds: FxHashMap<Material, f64>,

    /// Materials that count as a floor surface (cleared during a ride).
    pub floor_materials: FxHashSet<Material>,

    /// Materials that act as call buttons.
    pub button_materials: FxHashSet<Material>,

    /// Materials that can carry sign text.
    pub sign_materials: FxHashSet<Material>,

    /// Extra materials allowed inside a shaft besides air, floors, buttons
    /// and signs (ladders, torches, pressure plates, ...).
    pub shaft_materials: FxHashSet<Material>,

    /// User-facing texts (sign labels, notifications).
    pub messages: Messages,
}

impl LiftConfig {
    // ── Material predicates ───────────────────────────────────────────────

    #[inline]
    pub fn is_button(&self, material: Material) -> bool {
        self.button_materials.contains(&material)
    }

    #[inline]
    pub fn is_sign(&self, material: Material) -> bool {
        self.sign_materials.contains(&material)
    }

    /// A material is a base material iff it has a configured speed.
    #[inline]
    pub fn is_base_block(&self, material: Material) -> bool {
        self.block_speeds.contains_key(&material)
    }

    #[inline]
    pub fn is_floor_block(&self, material: Material) -> bool {
        self.floor_materials.contains(&material)
    }

    #[inline]
    pub fn is_shaft_block(&self, material: Material) -> bool {
        self.shaft_materials.contains(&material)
    }

    pub fn block_speed(&self, material: Material) -> Option<f64> {
        self.block_speeds.get(&material).copied()
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Check internal consistency.  Call after construction or reload; on
    /// `Err` the previous valid configuration should remain active.
    pub fn validate(&self) -> LiftResult<()> {
        if self.max_lift_area == 0 {
            return Err(LiftError::config("max_lift_area must be at least 1"));
        }
        if self.min_height >= self.max_height {
            return Err(LiftError::config(format!(
                "min_height ({}) must be below max_height ({})",
                self.min_height, self.max_height
            )));
        }
        if self.block_speeds.is_empty() {
            return Err(LiftError::config("at least one base material with a speed is required"));
        }
        for (material, speed) in &self.block_speeds {
            if *speed <= 0.0 {
                return Err(LiftError::config(format!(
                    "base material {material} needs a speed > 0 (got {speed})"
                )));
            }
        }
        if self.button_materials.is_empty() {
            return Err(LiftError::config("at least one button material is required"));
        }
        if self.sign_materials.is_empty() {
            return Err(LiftError::config("at least one sign material is required"));
        }
        Ok(())
    }
}

impl Default for LiftConfig {
    fn default() -> Self {
        Self {
            max_lift_area:         16,
            max_height:            256,
            min_height:            0,
            auto_place:            false,
            lift_mobs:             false,
            prevent_leave:         false,
            seconds_until_timeout: 5,
            block_speeds:          FxHashMap::default(),
            floor_materials:       FxHashSet::default(),
            button_materials:      FxHashSet::default(),
            sign_materials:        FxHashSet::default(),
            shaft_materials:       FxHashSet::default(),
            messages:              Messages::default(),
        }
    }
}
