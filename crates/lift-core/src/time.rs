//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing `Tick` counter driven by the host
//! heartbeat.  The mapping to wall-clock time lives in `TickClock`:
//!
//!   elapsed_ms = tick * tick_duration_ms
//!
//! Using an integer tick as the canonical unit keeps all deadline arithmetic
//! exact (no floating-point drift) and comparisons O(1).  The default tick
//! period is 100 ms — the cadence at which the movement scheduler refreshes
//! occupant velocities.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute tick counter.
///
/// Stored as `u64` to avoid overflow: at 10 ticks/second a u64 lasts
/// ~58 billion years, far longer than any server uptime.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Default tick period: 100 ms of simulated time per tick.
pub const DEFAULT_TICK_MS: u32 = 100;

/// Converts between tick counts and milliseconds, and tracks the current
/// tick.  Cheap to copy; intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickClock {
    /// How many milliseconds one tick represents.
    pub tick_duration_ms: u32,
    /// The current tick — advanced once per heartbeat.
    pub current_tick: Tick,
}

impl TickClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated milliseconds elapsed since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_ms as u64
    }

    /// How many ticks span `ms` milliseconds? (rounds up — a deadline is
    /// never shortened by integer truncation)
    #[inline]
    pub fn ticks_for_ms(&self, ms: u64) -> u64 {
        ms.div_ceil(self.tick_duration_ms as u64)
    }

    #[inline]
    pub fn ticks_for_secs(&self, secs: u32) -> u64 {
        self.ticks_for_ms(secs as u64 * 1_000)
    }

    /// One tick period as fractional seconds — what a physics integrator
    /// would use as `dt`.
    #[inline]
    pub fn tick_secs(&self) -> f64 {
        self.tick_duration_ms as f64 / 1_000.0
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS)
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} ms elapsed)", self.current_tick, self.elapsed_ms())
    }
}
