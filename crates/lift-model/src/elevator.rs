//! The elevator: floors, footprint, occupants, and per-ride state.

use rustc_hash::FxHashSet;

use lift_core::{
    Aabb, BlockPos, EntityId, LiftConfig, LiftError, LiftResult, Material, Tick, TickClock,
    UsageError, Vec3,
};

use crate::floor::Floor;

/// Ride speed used when a footprint material has no configured speed.
pub const DEFAULT_SPEED: f64 = 0.5;

/// Seconds of travel per block at speed 1.0 — the unit behind the configured
/// speed table.  A base material with speed `s` moves occupants at
/// `s / SPEED_UNIT_SECS` blocks per second.
pub const SPEED_UNIT_SECS: f64 = 0.05;

/// A block removed for the duration of a ride, to be restored at teardown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CachedBlock {
    pub pos: BlockPos,
    pub material: Material,
}

/// One discovered elevator structure plus the mutable state of its current
/// ride.
///
/// Constructed by the scanner per trigger, registered with the scheduler
/// when a ride begins, and discarded once the last occupant is released and
/// all cached blocks are restored.  Floors are sorted by level; `start_floor`
/// and `dest_floor` index into `floors`, as does the `initial_sign` pair —
/// signs never hold a reference back to their elevator.
#[derive(Clone, Debug)]
pub struct Elevator {
    /// All floors, sorted by level (dense `1..=N`).
    pub floors: Vec<Floor>,
    /// Index of the floor whose button triggered the scan.
    pub start_floor: usize,
    /// Index of the selected destination; set by the destination protocol
    /// before a ride commits.
    pub dest_floor: Option<usize>,
    /// `(floor index, sign index)` of the sign in the triggering column.
    pub initial_sign: (usize, usize),
    /// Base blocks in flood-fill discovery order.  Non-empty; all share one
    /// material and one height.
    pub footprint: Vec<BlockPos>,
    /// Configured vertical speed of the footprint material.
    pub speed: f64,

    /// Occupants currently being moved toward the destination.
    pub passengers: FxHashSet<EntityId>,
    /// Occupants held motionless until the ride fully concludes: arrivals
    /// waiting for stragglers, plus anything caught in the shaft without
    /// standing on the boarding floor.  Disjoint from `passengers`.
    pub freezers: FxHashSet<EntityId>,
    /// Blocks cleared at boarding, restored bottom-up at teardown.
    pub block_cache: Vec<CachedBlock>,

    /// Tick the ride committed.
    pub start_tick: Tick,
    /// Deadline: computed ride duration plus the configured grace period.
    pub max_end_tick: Tick,

    shaft: Aabb,
}

impl Elevator {
    /// Assemble a scanned structure.  `footprint` and `floors` must be
    /// non-empty — the scanner guarantees both.
    pub fn new(
        footprint: Vec<BlockPos>,
        floors: Vec<Floor>,
        start_floor: usize,
        initial_sign: (usize, usize),
        speed: f64,
    ) -> Self {
        let shaft = shaft_volume(&footprint, &floors);
        Self {
            floors,
            start_floor,
            dest_floor: None,
            initial_sign,
            footprint,
            speed,
            passengers: FxHashSet::default(),
            freezers: FxHashSet::default(),
            block_cache: Vec::new(),
            start_tick: Tick::ZERO,
            max_end_tick: Tick::ZERO,
            shaft,
        }
    }

    // ── Floor access ──────────────────────────────────────────────────────

    pub fn start(&self) -> &Floor {
        &self.floors[self.start_floor]
    }

    pub fn dest(&self) -> Option<&Floor> {
        self.dest_floor.map(|i| &self.floors[i])
    }

    pub fn floor_from_button_y(&self, button_y: i32) -> Option<usize> {
        self.floors.iter().position(|f| f.button_y == button_y)
    }

    /// The floor owning the sign at `pos`, if any.
    pub fn floor_of_sign(&self, pos: BlockPos) -> Option<usize> {
        self.floors
            .iter()
            .position(|f| f.signs.iter().any(|s| s.pos == pos))
    }

    /// Look up a floor by its displayed level.
    ///
    /// A level beyond the floor count falls back to the floor after the
    /// start floor — longstanding behavior that keeps signs written against
    /// a since-shrunk structure usable.  A level within range that matches
    /// no floor is a usage error.
    pub fn floor_by_level(&self, level: i32) -> LiftResult<usize> {
        if level > self.floors.len() as i32 {
            return self
                .next_floor(self.start_floor, Some(self.start_floor))
                .ok_or_else(|| LiftError::structural(format!("no fallback floor for level {level}")));
        }
        self.floors
            .iter()
            .position(|f| f.level == level)
            .ok_or_else(|| UsageError::FloorNotExists(level).into())
    }

    // ── Cyclic navigation ─────────────────────────────────────────────────

    /// The next floor above `current`, wrapping from the top back to the
    /// bottom.  A result equal to `exempt` advances one more step, so a
    /// rider cycling destinations never lands on the floor they are leaving
    /// from.  Returns `None` with a single floor.
    pub fn next_floor(&self, current: usize, exempt: Option<usize>) -> Option<usize> {
        self.cycle(current, exempt, |i| if i + 1 < self.floors.len() { i + 1 } else { 0 })
    }

    /// Mirror of [`next_floor`][Self::next_floor], cycling downward.
    pub fn previous_floor(&self, current: usize, exempt: Option<usize>) -> Option<usize> {
        self.cycle(current, exempt, |i| if i > 0 { i - 1 } else { self.floors.len() - 1 })
    }

    fn cycle(
        &self,
        current: usize,
        exempt: Option<usize>,
        step: impl Fn(usize) -> usize,
    ) -> Option<usize> {
        if self.floors.len() == 1 {
            return None;
        }
        let mut index = step(current);
        if Some(index) == exempt {
            index = step(index);
        }
        Some(index)
    }

    // ── Ride geometry ─────────────────────────────────────────────────────

    pub fn is_going_up(&self) -> bool {
        match self.dest() {
            Some(dest) => self.start().level < dest.level,
            None => false,
        }
    }

    /// Floors whose surface gets cleared for the ride: everything strictly
    /// above the start up to and including the destination when ascending;
    /// the mirror band (start inclusive, destination exclusive) when
    /// descending — the start floor opens beneath the passengers.
    pub fn floors_to_clear(&self) -> Vec<usize> {
        let Some(dest) = self.dest().map(|d| d.level) else {
            return Vec::new();
        };
        let start = self.start().level;
        let going_up = start < dest;
        self.floors
            .iter()
            .enumerate()
            .filter(|(_, f)| {
                if going_up {
                    f.level > start && f.level <= dest
                } else {
                    f.level <= start && f.level > dest
                }
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// The exclusive volume this ride owns: footprint bounds horizontally,
    /// base height up to one above the highest button vertically.
    pub fn shaft_volume(&self) -> &Aabb {
        &self.shaft
    }

    pub fn is_outside_shaft(&self, bb: &Aabb) -> bool {
        !self.shaft.overlaps(bb)
    }

    /// Shaft center at standing height on `floor`.
    pub fn center(&self, floor: usize) -> Vec3 {
        let c = self.shaft.center();
        Vec3::new(c.x, self.floors[floor].floor_y() as f64 + 1.5, c.z)
    }

    /// Occupant velocity in blocks per second.
    #[inline]
    pub fn blocks_per_sec(&self) -> f64 {
        self.speed / SPEED_UNIT_SECS
    }

    // ── Ride timing ───────────────────────────────────────────────────────

    /// Fix `start_tick` and `max_end_tick` for the committed ride: vertical
    /// distance at the configured speed, plus the timeout grace period.
    pub fn init_time_measures(&mut self, now: Tick, clock: &TickClock, config: &LiftConfig) {
        let dest_y = self.dest().map(|d| d.floor_y()).unwrap_or_else(|| self.start().floor_y());
        let blocks = (self.start().floor_y() - dest_y).unsigned_abs() as u64;
        let ride_ms = (blocks as f64 * SPEED_UNIT_SECS * 1_000.0 / self.speed).ceil() as u64;
        self.start_tick = now;
        self.max_end_tick = now
            + clock.ticks_for_ms(ride_ms)
            + clock.ticks_for_secs(config.seconds_until_timeout);
    }

    // ── Occupants and block cache ─────────────────────────────────────────

    /// Move every current passenger into the freezer set.
    pub fn freeze_all_passengers(&mut self) {
        self.freezers.extend(self.passengers.drain());
    }

    pub fn save_block(&mut self, block: CachedBlock) {
        self.block_cache.push(block);
    }

    pub fn occupant_count(&self) -> usize {
        self.passengers.len() + self.freezers.len()
    }
}

/// Per-axis min/max over the footprint, so irregular (L-shaped) footprints
/// get a volume covering every column.
fn shaft_volume(footprint: &[BlockPos], floors: &[Floor]) -> Aabb {
    let base_y = footprint.first().map(|b| b.y).unwrap_or(0);
    let top_y = floors.iter().map(|f| f.button_y).max().unwrap_or(base_y) + 1;

    let min_x = footprint.iter().map(|b| b.x).min().unwrap_or(0);
    let max_x = footprint.iter().map(|b| b.x).max().unwrap_or(0);
    let min_z = footprint.iter().map(|b| b.z).min().unwrap_or(0);
    let max_z = footprint.iter().map(|b| b.z).max().unwrap_or(0);

    Aabb::from_corners(
        Vec3::new(min_x as f64, base_y as f64, min_z as f64),
        Vec3::new(max_x as f64 + 1.0, top_y as f64, max_z as f64 + 1.0),
    )
}
