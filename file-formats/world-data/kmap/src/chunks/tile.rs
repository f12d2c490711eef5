//! Tile records stored inside `AREA` chunks

use binrw::binrw;
use bitflags::bitflags;

use super::ItemRecord;

bitflags! {
    /// Tile flags as encoded in the map file
    ///
    /// These are the on-disk bit values. The server keeps its own tile state
    /// bits, so consumers translate these rather than reusing them directly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EncodedTileFlags: u32 {
        /// Protection zone, no combat
        const PROTECTION_ZONE = 0x0000_0001;
        /// No player-versus-player combat
        const NO_PVP_ZONE     = 0x0000_0004;
        /// Players cannot log out here
        const NO_LOGOUT       = 0x0000_0008;
        /// Player-versus-player without penalties
        const PVP_ZONE        = 0x0000_0010;
        /// Tile contents are refreshed periodically
        const REFRESH         = 0x0000_0020;
    }
}

/// A single tile
///
/// ```text
/// Field       | Size | Notes
/// ------------|------|------------------------------------------
/// x           |  1   | offset from the area position
/// y           |  1   | offset from the area position
/// house_id    |  4   | 0 = not part of a house
/// flags       |  4   | EncodedTileFlags bits
/// has_ground  |  1   | non-zero if a ground ItemRecord follows
/// ground      |  var | optional
/// item_count  |  2   |
/// items       |  var | item_count ItemRecords, in stacking order
/// ```
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileRecord {
    /// X offset within the enclosing area
    pub x: u8,

    /// Y offset within the enclosing area
    pub y: u8,

    /// Owning house id, 0 when the tile is not part of a house
    pub house_id: u32,

    /// Encoded tile flags (see [`EncodedTileFlags`])
    pub flags: u32,

    #[br(temp)]
    #[bw(calc = u8::from(ground.is_some()))]
    has_ground: u8,

    /// Ground item
    #[br(if(has_ground != 0), args(0))]
    pub ground: Option<ItemRecord>,

    #[br(temp)]
    #[bw(try_calc = u16::try_from(items.len()))]
    item_count: u16,

    /// Items placed on top of the ground, in schema order
    #[br(count = item_count, args { inner: (0,) })]
    pub items: Vec<ItemRecord>,
}

impl TileRecord {
    /// Create an empty tile record at the given area offset
    #[must_use]
    pub fn new(x: u8, y: u8) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    /// Set the ground item
    #[must_use]
    pub fn with_ground(mut self, ground: ItemRecord) -> Self {
        self.ground = Some(ground);
        self
    }

    /// Append an item
    #[must_use]
    pub fn with_item(mut self, item: ItemRecord) -> Self {
        self.items.push(item);
        self
    }

    /// Set the owning house
    #[must_use]
    pub fn with_house(mut self, house_id: u32) -> Self {
        self.house_id = house_id;
        self
    }

    /// Set the encoded flags
    #[must_use]
    pub fn with_flags(mut self, flags: EncodedTileFlags) -> Self {
        self.flags = flags.bits();
        self
    }

    /// Known encoded flags; undefined bits are dropped
    #[must_use]
    pub fn encoded_flags(&self) -> EncodedTileFlags {
        EncodedTileFlags::from_bits_truncate(self.flags)
    }
}
