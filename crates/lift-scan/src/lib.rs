//! `lift-scan` — turning a pressed button into an [`Elevator`].
//!
//! # Discovery pipeline
//!
//! ```text
//! button press
//!   ① local triple check      button + sign above + floor/base two below
//!   ② descend the shaft       through passable blocks, down to a base block
//!   ③ flood-fill footprint    4-connected, same material, bounded BFS
//!   ④ scan columns upward     every footprint column must stay passable;
//!                             valid triples at one height merge into a Floor
//!   ⑤ validate                ≥ 2 floors, start floor + initial sign resolved
//!   ⑥ repair signs            floors with unusable signs get a generated
//!                             next-cyclic-floor label
//! ```
//!
//! Steps ① and ② distinguish "not an elevator" (`Ok(None)`, silently
//! ignored) from a malformed structure (a usage error shown to whoever
//! pressed the button).
//!
//! [`Elevator`]: lift_model::Elevator

pub mod scanner;


pub use scanner::{create_elevator, is_lift_trigger};
