//! `lift-model` — the structural and behavioral model of one elevator ride.
//!
//! # The shape of an elevator
//!
//! ```text
//!        [sign]      line 0  Current floor: 2
//!        [button]    line 1  Offices
//!        ........    line 2  Destination: 1
//!        [floor]     line 3  Lobby
//!           .
//!           .         ← shaft (passable blocks only)
//!        [sign]
//!        [button]
//!        ........
//!        [base][base] ← footprint: contiguous same-material blocks;
//!                       the material sets the ride speed
//! ```
//!
//! [`Floor`]s are discovered bottom-up and numbered densely from 1.  A
//! [`FloorSign`] holds only its block position — the text lives in the
//! world, and the sign's relation to its elevator is an index pair, never an
//! owning back-reference.  [`Elevator`] ties floors, footprint, occupants
//! and the per-ride block cache together.
//!
//! The [`protocol`] module is the rider-visible contract: how a destination
//! is encoded on a sign, how cycling through floors works, and how sign text
//! is rewritten.

pub mod elevator;
pub mod floor;
pub mod protocol;
pub mod sign;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use elevator::{CachedBlock, DEFAULT_SPEED, Elevator};
pub use floor::Floor;
pub use sign::{FloorSign, LINE_CURRENT_LEVEL, LINE_CURRENT_NAME, LINE_DEST_LEVEL, LINE_DEST_NAME, SEPARATOR};
