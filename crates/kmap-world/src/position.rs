//! World coordinates

use std::fmt;

/// A world coordinate
///
/// Tiles never use a zero axis as a sentinel, but towns and waypoints treat
/// a zero in any axis as "unset" (see [`Position::has_unset_axis`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// X coordinate
    pub x: u16,
    /// Y coordinate
    pub y: u16,
    /// Floor
    pub z: u8,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(x: u16, y: u16, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Whether any axis holds the zero "unset" sentinel
    #[must_use]
    pub const fn has_unset_axis(&self) -> bool {
        self.x == 0 || self.y == 0 || self.z == 0
    }

    /// Add a tile offset on the same floor, `None` on overflow
    #[must_use]
    pub fn offset(&self, dx: u8, dy: u8) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(u16::from(dx))?,
            y: self.y.checked_add(u16::from(dy))?,
            z: self.z,
        })
    }
}

impl From<kmap::chunks::Position> for Position {
    fn from(position: kmap::chunks::Position) -> Self {
        Self::new(position.x, position.y, position.z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
