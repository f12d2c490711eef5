//! Fluent builder that serializes KMAP files.
//!
//! Chunks are written in a fixed order: `MHDR`, every `AREA`, `TOWN`, then
//! `WAYP` when at least one waypoint was added. Each chunk size is patched in
//! after its payload has been written.

use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, SeekFrom, Write};
use std::path::Path;

use binrw::BinWrite;

use crate::chunk_id::ChunkId;
use crate::chunks::{
    AreaRecord, FileSignature, ItemRecord, MAX_ITEM_DEPTH, MapHeader, TileRecord, TownRecord,
    WaypointRecord,
};
use crate::error::{KmapError, Result};

/// Fluent builder for KMAP files.
///
/// # Examples
///
/// ```
/// use kmap::{KmapBuilder, KmapView};
/// use kmap::chunks::{AreaRecord, ItemRecord, Position, TileRecord, TownRecord};
///
/// # fn main() -> Result<(), kmap::KmapError> {
/// let bytes = KmapBuilder::new(1024, 1024)
///     .house_file("map-house.xml")
///     .add_area(
///         AreaRecord::new(Position::new(100, 100, 7))
///             .with_tile(TileRecord::new(2, 3).with_ground(ItemRecord::new(100))),
///     )
///     .add_town(TownRecord::new(1, "Thais", Position::new(120, 130, 7)))
///     .to_bytes()?;
///
/// let view = KmapView::new(&bytes)?;
/// assert_eq!(view.tile_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct KmapBuilder {
    header: MapHeader,
    areas: Vec<AreaRecord>,
    towns: Vec<TownRecord>,
    waypoints: Vec<WaypointRecord>,
}

impl KmapBuilder {
    /// Create a builder for a map of the given dimensions
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            header: MapHeader {
                width,
                height,
                ..MapHeader::default()
            },
            ..Self::default()
        }
    }

    /// Set the monster spawn file name
    #[must_use]
    pub fn monster_spawn_file(mut self, name: impl Into<String>) -> Self {
        self.header.monster_spawn_file = name.into();
        self
    }

    /// Set the NPC spawn file name
    #[must_use]
    pub fn npc_spawn_file(mut self, name: impl Into<String>) -> Self {
        self.header.npc_spawn_file = name.into();
        self
    }

    /// Set the house file name
    #[must_use]
    pub fn house_file(mut self, name: impl Into<String>) -> Self {
        self.header.house_file = name.into();
        self
    }

    /// Append an area
    #[must_use]
    pub fn add_area(mut self, area: AreaRecord) -> Self {
        self.areas.push(area);
        self
    }

    /// Append a town
    #[must_use]
    pub fn add_town(mut self, town: TownRecord) -> Self {
        self.towns.push(town);
        self
    }

    /// Append a waypoint
    #[must_use]
    pub fn add_waypoint(mut self, waypoint: WaypointRecord) -> Self {
        self.waypoints.push(waypoint);
        self
    }

    /// Serialize to an in-memory buffer
    ///
    /// # Errors
    ///
    /// Fails when a string is longer than `u16::MAX` bytes, a record list
    /// overflows its count field, containers nest deeper than
    /// [`MAX_ITEM_DEPTH`], or a chunk exceeds `u32::MAX` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.write(&mut cursor)?;
        Ok(cursor.into_inner())
    }

    /// Serialize to a file, creating or truncating it
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize to any seekable writer
    ///
    /// # Errors
    ///
    /// See [`KmapBuilder::to_bytes`].
    pub fn write<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        FileSignature::default().write(writer)?;

        write_chunk(writer, ChunkId::MHDR, |w| Ok(self.header.write(w)?))?;

        for area in &self.areas {
            write_chunk(writer, ChunkId::AREA, |w| {
                area.header()?.write(w)?;
                for tile in &area.tiles {
                    check_nesting(tile, w.stream_position()?)?;
                    tile.write(w)?;
                }
                Ok(())
            })?;
        }

        write_chunk(writer, ChunkId::TOWN, |w| write_records(w, ChunkId::TOWN, &self.towns))?;

        if !self.waypoints.is_empty() {
            write_chunk(writer, ChunkId::WAYP, |w| {
                write_records(w, ChunkId::WAYP, &self.waypoints)
            })?;
        }

        log::debug!(
            "Serialized KMAP: {} areas, {} towns, {} waypoints",
            self.areas.len(),
            self.towns.len(),
            self.waypoints.len()
        );

        Ok(())
    }
}

/// Write a chunk header, the payload produced by `body`, then patch the size.
fn write_chunk<W, F>(writer: &mut W, chunk_id: ChunkId, body: F) -> Result<()>
where
    W: Write + Seek,
    F: FnOnce(&mut W) -> Result<()>,
{
    let chunk_start = writer.stream_position()?;
    writer.write_all(&chunk_id.0)?;
    writer.write_all(&[0u8; 4])?; // size placeholder

    body(writer)?;

    let data_end = writer.stream_position()?;
    let size = u32::try_from(data_end - chunk_start - 8).map_err(|_| {
        KmapError::malformed(chunk_id, chunk_start, "payload exceeds u32::MAX bytes")
    })?;

    writer.seek(SeekFrom::Start(chunk_start + 4))?;
    writer.write_all(&size.to_le_bytes())?;
    writer.seek(SeekFrom::Start(data_end))?;

    Ok(())
}

/// Reject tiles holding items the reader would refuse to decode
fn check_nesting(tile: &TileRecord, offset: u64) -> Result<()> {
    for item in tile.ground.iter().chain(&tile.items) {
        if nesting_depth(item) > MAX_ITEM_DEPTH {
            return Err(KmapError::malformed(
                ChunkId::AREA,
                offset,
                format!(
                    "item {} at ({}, {}) nests deeper than {MAX_ITEM_DEPTH} levels",
                    item.id, tile.x, tile.y
                ),
            ));
        }
    }
    Ok(())
}

/// Depth of the deepest item below `item`, 0 when it holds nothing
fn nesting_depth(item: &ItemRecord) -> u16 {
    item.container_items()
        .iter()
        .map(|child| nesting_depth(child).saturating_add(1))
        .max()
        .unwrap_or(0)
}

/// Write a `count:u32` prefix followed by the records
fn write_records<W, T>(writer: &mut W, chunk_id: ChunkId, records: &[T]) -> Result<()>
where
    W: Write + Seek,
    T: for<'a> BinWrite<Args<'a> = ()>,
{
    let count = u32::try_from(records.len())
        .map_err(|_| KmapError::malformed(chunk_id, 0, "too many records"))?;
    count.write_le(writer)?;
    for record in records {
        record.write_le(writer)?;
    }
    Ok(())
}
