//! `AREA` chunk: a base position and the tiles laid out relative to it

use binrw::{BinRead, BinWrite};

use super::{Position, TileRecord};
use crate::chunk_id::ChunkId;
use crate::error::{KmapError, Result};

/// Leading part of an `AREA` payload, followed by `tile_count` [`TileRecord`]s
///
/// ```text
/// Offset | Size | Field
/// -------|------|-----------
/// 0x00   |  5   | position
/// 0x05   |  4   | tile_count
/// 0x09   |  var | tiles
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[brw(little)]
pub struct AreaHeader {
    /// Base position; tile offsets are added to x and y, z is shared
    pub position: Position,

    /// Number of tile records following the header
    pub tile_count: u32,
}

/// Owned area used when building a map file
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AreaRecord {
    /// Base position of the area
    pub position: Position,

    /// Tiles in schema order
    pub tiles: Vec<TileRecord>,
}

impl AreaRecord {
    /// Create an empty area at `position`
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            tiles: Vec::new(),
        }
    }

    /// Append a tile record
    #[must_use]
    pub fn with_tile(mut self, tile: TileRecord) -> Self {
        self.tiles.push(tile);
        self
    }

    /// Header describing this area
    ///
    /// # Errors
    ///
    /// Fails when the tile list overflows the `u32` count field.
    pub fn header(&self) -> Result<AreaHeader> {
        let tile_count = u32::try_from(self.tiles.len())
            .map_err(|_| KmapError::malformed(ChunkId::AREA, 0, "too many tiles"))?;
        Ok(AreaHeader {
            position: self.position,
            tile_count,
        })
    }
}
