//! `lift-ride` — the tick-driven movement state machine.
//!
//! # Ride lifecycle
//!
//! ```text
//! IDLE ──start_ride──▶ BOARDING ──▶ RUNNING ──▶ FINISHED
//!                        │                └────▶ TIMED_OUT
//!                        └─ no passengers / dest == start: no ride
//! ```
//!
//! Boarding is instantaneous: destination resolution, entity capture and
//! partition, optional auto-placement, floor-block removal, and physics
//! preparation all happen inside [`RideScheduler::start_ride`].  From then
//! on the ride lives in `RUNNING` and is advanced by
//! [`RideScheduler::tick`], once per heartbeat:
//!
//! 1. terminating (or empty) → teardown,
//! 2. past the deadline → force-teleport stragglers, terminate next tick,
//! 3. otherwise move arrived passengers into the freezer set,
//! 4. re-center or release occupants that left the shaft,
//! 5. re-assert passenger velocities, 6. hold freezers motionless.
//!
//! Both terminal states converge on the same teardown: blocks restored
//! bottom-up, freezer physics reset, registry entries removed.
//!
//! # Concurrency model
//!
//! One logical clock drives all rides cooperatively: a ride's tick body runs
//! to completion before the next ride is ticked, and external events (player
//! quit, world change) mutate occupant sets only through
//! [`RideScheduler::release_entity`] on the same heartbeat thread.  Nothing
//! here suspends, blocks, or interrupts — the timeout is checked once per
//! tick, so cancellation is never abrupt.

pub mod boarding;
pub mod observer;
pub mod registry;
pub mod ride;
pub mod scheduler;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use observer::{NoopObserver, RideObserver};
pub use registry::ActiveRideRegistry;
pub use ride::{ActiveRide, RideOutcome};
pub use scheduler::RideScheduler;
