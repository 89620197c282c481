//! Opaque block material identifier.
//!
//! The host world defines what materials exist; this framework only compares
//! them against the configured material sets (base, floor, button, sign,
//! shaft allow-list).  The one reserved value is [`Material::AIR`]: every
//! host adapter must map its empty block to it, because block clearing and
//! restoration write it directly.

use std::fmt;

/// A host-defined block material.  Cheap to copy, opaque to the framework.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Material(pub u16);

impl Material {
    /// The empty block.  Reserved: clearing a block writes this value.
    pub const AIR: Material = Material(0);

    #[inline]
    pub fn is_air(self) -> bool {
        self == Material::AIR
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Material({})", self.0)
    }
}
