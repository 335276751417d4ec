use bevy::math::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// An axis-aligned cuboid volume with block-granular, inclusive bounds.
///
/// `lo <= hi` holds componentwise from construction onward, so containment
/// and intersection checks never have to re-order corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    lo: IVec3,
    hi: IVec3,
}

impl Region {
    /// Build a region from two opposite corners, in any order.
    pub fn new(p1: IVec3, p2: IVec3) -> Self {
        Self {
            lo: p1.min(p2),
            hi: p1.max(p2),
        }
    }

    pub fn lo(&self) -> IVec3 {
        self.lo
    }

    pub fn hi(&self) -> IVec3 {
        self.hi
    }

    /// Whether a (possibly fractional) position lies inside the region.
    ///
    /// The lower bound compares the raw coordinate, the upper bound the
    /// floored one: a position anywhere inside the last block column still
    /// counts as inside, e.g. x = 9.9 is inside a region ending at x = 9.
    pub fn contains(&self, pos: Vec3) -> bool {
        pos.x >= self.lo.x as f32
            && pos.x.floor() as i32 <= self.hi.x
            && pos.y >= self.lo.y as f32
            && pos.y.floor() as i32 <= self.hi.y
            && pos.z >= self.lo.z as f32
            && pos.z.floor() as i32 <= self.hi.z
    }

    /// Whether two regions overlap. Bounds are inclusive, so regions that
    /// merely share a boundary plane intersect.
    pub fn intersects(&self, other: &Region) -> bool {
        self.lo.x <= other.hi.x
            && other.lo.x <= self.hi.x
            && self.lo.y <= other.hi.y
            && other.lo.y <= self.hi.y
            && self.lo.z <= other.hi.z
            && other.lo.z <= self.hi.z
    }

    // Spans are widened to 64 bits so corners at the i32 extremes can't
    // overflow, and the edge block is counted.
    fn span(lo: i32, hi: i32) -> u64 {
        (hi as i64 - lo as i64) as u64 + 1
    }

    /// The longer horizontal side, whichever axis it lies on.
    pub fn length(&self) -> u64 {
        let dx = Self::span(self.lo.x, self.hi.x);
        let dz = Self::span(self.lo.z, self.hi.z);
        dx.max(dz)
    }

    /// The shorter horizontal side.
    pub fn width(&self) -> u64 {
        let dx = Self::span(self.lo.x, self.hi.x);
        let dz = Self::span(self.lo.z, self.hi.z);
        dx.min(dz)
    }

    pub fn height(&self) -> u64 {
        Self::span(self.lo.y, self.hi.y)
    }

    pub fn area(&self) -> u64 {
        self.length() * self.width()
    }

    pub fn volume(&self) -> u64 {
        self.area() * self.height()
    }
}
