//! Error taxonomy.
//!
//! Four kinds with four different policies:
//!
//! | Kind         | Audience        | Policy                                  |
//! |--------------|-----------------|-----------------------------------------|
//! | `Usage`      | the triggering actor | show the message, abandon the action |
//! | `Structural` | operators/logs  | log at error severity, abort, show a generic message |
//! | `Change`     | operators/logs  | log at warn severity, keep going (sign text is cosmetic) |
//! | `Config`     | operators/logs  | fatal to the (re)load only, previous config stays active |
//!
//! Callers pattern-match on the variant instead of catching by exception
//! subclass.  The scanner and the destination protocol raise synchronously;
//! the movement scheduler never lets an error escape a running ride.

use thiserror::Error;

/// A malformed ride request.  Recoverable: the attempted action is simply
/// abandoned and the message shown to whoever pressed the button.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("this elevator has only one floor")]
    OneFloor,

    #[error("floor {0} does not exist")]
    FloorNotExists(i32),
}

/// The top-level error type for all `lift-*` crates.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("structural inconsistency: {0}")]
    Structural(String),

    #[error("world change failed: {0}")]
    Change(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl LiftError {
    pub fn structural(msg: impl Into<String>) -> Self {
        LiftError::Structural(msg.into())
    }

    pub fn change(msg: impl Into<String>) -> Self {
        LiftError::Change(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        LiftError::Config(msg.into())
    }

    /// `true` for errors whose message is meant for the triggering actor.
    pub fn is_usage(&self) -> bool {
        matches!(self, LiftError::Usage(_))
    }
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
