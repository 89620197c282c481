//! Floor signs: the rider-visible display and destination store.
//!
//! A sign's four lines encode both where the rider is and where the elevator
//! will go:
//!
//! | Line | Content                                  |
//! |------|------------------------------------------|
//! | 0    | `"<current-floor label>: <level>"`       |
//! | 1    | current floor name                       |
//! | 2    | `"<destination label>: <level>"`         |
//! | 3    | destination floor name                   |
//!
//! The destination *level* on line 2 is authoritative — the names are
//! decoration.  Text lives in the world; this type only remembers where the
//! sign stands.

use lift_core::{BlockPos, LiftError, LiftResult, Messages};
use lift_world::World;

use crate::floor::Floor;

/// Separates the line label from the level number.
pub const SEPARATOR: &str = ":";

pub const LINE_CURRENT_LEVEL: usize = 0;
pub const LINE_CURRENT_NAME: usize = 1;
pub const LINE_DEST_LEVEL: usize = 2;
pub const LINE_DEST_NAME: usize = 3;

/// A sign block belonging to a floor.  Non-owning: the elevator addresses
/// floors and signs by index, the sign only knows its own position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorSign {
    pub pos: BlockPos,
}

impl FloorSign {
    pub fn new(pos: BlockPos) -> Self {
        Self { pos }
    }

    /// Parse the destination level from line 2.
    ///
    /// Fails structurally if there is no sign, the separator is missing, or
    /// the trailing token is not an integer.
    pub fn read_dest_level<W: World>(&self, world: &W) -> LiftResult<i32> {
        let lines = self
            .sign_lines(world)
            .ok_or_else(|| LiftError::structural(format!("no sign text at {}", self.pos)))?;
        let line = &lines[LINE_DEST_LEVEL];
        let Some((_, level)) = line.split_once(SEPARATOR) else {
            return Err(LiftError::structural(format!(
                "sign at {} does not contain '{SEPARATOR}' on line {LINE_DEST_LEVEL}",
                self.pos
            )));
        };
        level.trim().parse().map_err(|_| {
            LiftError::structural(format!(
                "sign at {} does not have a numeric destination level",
                self.pos
            ))
        })
    }

    /// A sign is usable iff its current-level line is non-empty and its
    /// destination level parses to a non-negative number.
    pub fn is_valid<W: World>(&self, world: &W) -> bool {
        match self.sign_lines(world) {
            Some(lines) => {
                !lines[LINE_CURRENT_LEVEL].is_empty()
                    && self.read_dest_level(world).is_ok_and(|level| level >= 0)
            }
            None => false,
        }
    }

    /// Rewrite all four lines to show `current` → `dest`.
    ///
    /// A persistence failure is a change-error: sign text is cosmetic, so
    /// callers log and continue.
    pub fn write<W: World>(
        &self,
        world: &mut W,
        messages: &Messages,
        current: &Floor,
        dest: &Floor,
    ) -> LiftResult<()> {
        let lines = [
            format!("{}{SEPARATOR} {}", messages.current_floor, current.level),
            current.name.clone(),
            format!("{}{SEPARATOR} {}", messages.destination, dest.level),
            dest.name.clone(),
        ];
        if !world.set_sign_lines(self.pos, lines) {
            return Err(LiftError::change(format!(
                "could not update floor sign at {}",
                self.pos
            )));
        }
        Ok(())
    }

    fn sign_lines<W: World>(&self, world: &W) -> Option<[String; 4]> {
        world.sign_lines(self.pos)
    }
}
