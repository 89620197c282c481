//! One vertical stop of an elevator.

use crate::sign::FloorSign;

/// A floor is defined by the height of its call button; the walkable surface
/// sits two blocks below it (button above sign-free space above floor
/// block).
///
/// Levels are assigned by the scanner bottom-up and are always the dense
/// sequence `1..=N` within one elevator — no gaps, no duplicates.  A floor
/// is immutable after discovery; only its signs' in-world text changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Floor {
    /// 1-based level, strictly increasing with height.
    pub level: i32,
    /// Display name, taken from a label sign below the button.  May be empty.
    pub name: String,
    /// Height of the call button block.
    pub button_y: i32,
    /// All signs on this floor (one per contributing shaft column).
    pub signs: Vec<FloorSign>,
}

impl Floor {
    /// Height of the walkable floor surface block.
    #[inline]
    pub fn floor_y(&self) -> i32 {
        self.button_y - 2
    }
}
