//! KMAP record schema
//!
//! Every record is declared with binrw attributes, so decoding and encoding
//! share one description of the layout. Variable-length parts (strings, item
//! lists, optional sub-records) carry their own length or presence prefix.

use binrw::{BinRead, BinWrite};

pub mod area;
pub mod header;
pub mod item;
pub mod town;

mod string;

pub use area::{AreaHeader, AreaRecord};
pub use header::{FileSignature, KMAP_SIGNATURE, KMAP_VERSION, MapHeader};
pub use item::{ActionIds, ItemAttributes, ItemDetails, ItemRecord, MAX_ITEM_DEPTH};
pub use town::{TownRecord, WaypointRecord};

pub mod tile;
pub use tile::{EncodedTileFlags, TileRecord};

/// Map coordinate as stored on disk (5 bytes)
///
/// ```text
/// Offset | Size | Field
/// -------|------|------
/// 0x00   |  2   | x
/// 0x02   |  2   | y
/// 0x04   |  1   | z (floor)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, BinRead, BinWrite)]
#[brw(little)]
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
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
