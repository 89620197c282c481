//! `lift-world` — the boundary between the elevator core and the host world.
//!
//! The scanner and the movement scheduler never touch a concrete world type;
//! they go through the [`World`] trait, which covers exactly the five
//! capabilities the core consumes:
//!
//! 1. block queries and writes,
//! 2. sign text I/O,
//! 3. entity enumeration inside a bounding volume,
//! 4. entity motion commands (teleport, velocity, fall distance, gravity),
//! 5. the opaque physics-exemption hook (flight status).
//!
//! [`GridWorld`] is a complete in-memory implementation backing the test
//! suites and demos: hash-map blocks, slot-vec entities, an `rstar` R-tree
//! for volume queries, and a small explicit-Euler integrator so tests can
//! observe entities actually move when the scheduler sets velocities.

pub mod grid;
pub mod world;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use grid::GridWorld;
pub use world::{SignLines, World};
