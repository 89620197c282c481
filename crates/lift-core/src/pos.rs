//! Block coordinates, entity vectors, and axis-aligned bounding volumes.
//!
//! Two coordinate spaces coexist: blocks live on an integer grid
//! ([`BlockPos`]), entities move continuously ([`Vec3`]).  A block at
//! `(x, y, z)` occupies the unit cube `[x, x+1) × [y, y+1) × [z, z+1)`, so
//! an entity standing *on* that block has its feet at `y + 1`.

use std::fmt;

// ── BlockPos ──────────────────────────────────────────────────────────────────

/// An integer block coordinate.  `y` is the vertical axis.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn up(self) -> Self {
        Self { y: self.y + 1, ..self }
    }

    #[inline]
    pub fn down(self) -> Self {
        Self { y: self.y - 1, ..self }
    }

    /// The position `n` blocks below.
    #[inline]
    pub fn down_n(self, n: i32) -> Self {
        Self { y: self.y - n, ..self }
    }

    /// Same column, different height.
    #[inline]
    pub fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }

    /// The four horizontal neighbors in north, east, south, west order
    /// (`-z`, `+x`, `+z`, `-x`).  This order is load-bearing: the footprint
    /// flood-fill visits neighbors in exactly this sequence, which makes the
    /// truncation at the configured area cap deterministic.
    #[inline]
    pub fn cardinal_neighbors(self) -> [BlockPos; 4] {
        [
            Self { z: self.z - 1, ..self },
            Self { x: self.x + 1, ..self },
            Self { z: self.z + 1, ..self },
            Self { x: self.x - 1, ..self },
        ]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A continuous position or velocity in world space.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A purely vertical vector — the only velocity shape the scheduler emits.
    #[inline]
    pub fn vertical(y: f64) -> Self {
        Self { x: 0.0, y, z: 0.0 }
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ── Aabb ──────────────────────────────────────────────────────────────────────

/// An axis-aligned bounding box with inclusive min and exclusive max corners.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build from two arbitrary corners (each axis is min/max'd separately).
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// `true` if the two boxes intersect in all three axes.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x < self.max.x
            && p.y >= self.min.y
            && p.y < self.max.y
            && p.z >= self.min.z
            && p.z < self.max.z
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
