//! Integer grid coordinate type.
//!
//! A `Location` is the identity of a region node: two nodes are the same
//! node exactly when their locations are equal.  The derived `Ord` is
//! lexicographic (x, then y), which the rest of the simulator relies on for
//! deterministic iteration and for the ascending-endpoint edge keys.

use std::fmt;

/// A point on the integer grid the region lives on.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[inline]
    pub fn add(self, other: Location) -> Location {
        Location::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference.
    #[inline]
    pub fn subtract(self, other: Location) -> Location {
        Location::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
