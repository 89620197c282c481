//! `lift-core` — foundational types for the `rust_lift` elevator framework.
//!
//! This crate is a dependency of every other `lift-*` crate.  It intentionally
//! has no `lift-*` dependencies and minimal external ones (only `rustc-hash`
//! and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`ids`]      | `EntityId`, `RideId`                                    |
//! | [`pos`]      | `BlockPos`, `Vec3`, `Aabb`                              |
//! | [`material`] | `Material` — opaque host block material id              |
//! | [`time`]     | `Tick`, `TickClock`                                     |
//! | [`config`]   | `LiftConfig` — runtime configuration + validation       |
//! | [`messages`] | `Messages` — user-facing text table                     |
//! | [`error`]    | `LiftError`, `UsageError`, `LiftResult`                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod material;
pub mod messages;
pub mod pos;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::LiftConfig;
pub use error::{LiftError, LiftResult, UsageError};
pub use ids::{EntityId, RideId};
pub use material::Material;
pub use messages::Messages;
pub use pos::{Aabb, BlockPos, Vec3};
pub use time::{Tick, TickClock};
