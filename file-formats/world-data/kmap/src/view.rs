//! Validated read-only view over a KMAP buffer.
//!
//! Construction runs two passes over the borrowed bytes:
//!
//! 1. **Discovery** walks the chunk headers, recording offsets and sizes and
//!    rejecting any chunk that runs past the end of the buffer.
//! 2. **Verification** decodes every record of every known chunk once and
//!    checks that the records account for exactly the chunk payload. Nothing
//!    but the small map header is retained.
//!
//! After that the view hands out lazy iterators that decode records straight
//! from the borrowed buffer on demand. The buffer is never copied.

use std::io::Cursor;
use std::marker::PhantomData;

use binrw::{BinRead, Endian};

use crate::chunk_header::{CHUNK_HEADER_SIZE, ChunkHeader};
use crate::chunk_id::ChunkId;
use crate::chunks::{
    AreaHeader, FileSignature, KMAP_SIGNATURE, KMAP_VERSION, MapHeader, Position, TileRecord,
    TownRecord, WaypointRecord,
};
use crate::error::{KmapError, Result};

/// Size of the file signature (magic + version)
const SIGNATURE_SIZE: u64 = 8;

/// Location of a discovered chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLocation {
    /// Chunk identifier
    pub id: ChunkId,

    /// Absolute offset where the chunk header starts
    pub offset: u64,

    /// Payload size (excludes 8-byte header)
    pub size: u32,
}

impl ChunkLocation {
    /// Absolute offset of the first payload byte
    #[must_use]
    pub const fn payload_offset(&self) -> u64 {
        self.offset + CHUNK_HEADER_SIZE as u64
    }

    fn payload<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        let start = self.payload_offset() as usize;
        &data[start..start + self.size as usize]
    }
}

/// Verified area chunk: its header plus where its tile records start
#[derive(Debug, Clone, Copy)]
struct AreaEntry {
    location: ChunkLocation,
    header: AreaHeader,
    tiles_start: u64,
}

/// Verified count-prefixed record chunk (`TOWN`, `WAYP`)
#[derive(Debug, Clone, Copy)]
struct RecordChunk {
    location: ChunkLocation,
    count: u32,
}

/// Width in bytes of the `count:u32` prefix of record chunks
const RECORD_COUNT_SIZE: u64 = 4;

/// Read-only view over a structurally valid KMAP buffer
///
/// # Example
///
/// ```no_run
/// use kmap::KmapView;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = std::fs::read("world/canary.kmap")?;
/// let view = KmapView::new(&bytes)?;
///
/// println!("{}x{}", view.width(), view.height());
/// for area in view.areas() {
///     for tile in area.tiles() {
///         let tile = tile?;
///         println!("tile at +{}/+{} of {}", tile.x, tile.y, area.position());
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct KmapView<'a> {
    data: &'a [u8],
    version: u32,
    header: MapHeader,
    chunks: Vec<ChunkLocation>,
    areas: Vec<AreaEntry>,
    towns: RecordChunk,
    waypoints: Option<RecordChunk>,
}

impl<'a> KmapView<'a> {
    /// Validate `data` and build a view over it.
    ///
    /// # Errors
    ///
    /// Returns [`KmapError`] when the buffer is empty, does not carry the
    /// `KMAP` signature, has an unsupported version, contains truncated
    /// chunks, lacks a required chunk, repeats a unique chunk, or holds
    /// records that do not decode to exactly their chunk payload.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(KmapError::EmptyBuffer);
        }

        if data.get(..KMAP_SIGNATURE.len()) != Some(&KMAP_SIGNATURE[..]) {
            return Err(KmapError::InvalidSignature {
                found: data.iter().take(KMAP_SIGNATURE.len()).copied().collect(),
            });
        }

        let signature = FileSignature::read(&mut Cursor::new(data))?;
        if signature.version != KMAP_VERSION {
            return Err(KmapError::UnsupportedVersion {
                found: signature.version,
                supported: KMAP_VERSION,
            });
        }

        let chunks = discover_chunks(data)?;

        let mut header_chunk = None;
        let mut town_chunk = None;
        let mut waypoint_chunk = None;
        let mut area_chunks = Vec::new();

        for location in &chunks {
            match location.id {
                ChunkId::MHDR => set_unique(&mut header_chunk, *location)?,
                ChunkId::TOWN => set_unique(&mut town_chunk, *location)?,
                ChunkId::WAYP => set_unique(&mut waypoint_chunk, *location)?,
                ChunkId::AREA => area_chunks.push(*location),
                other => log::warn!(
                    "Skipping unknown chunk {} at offset {} ({} bytes)",
                    other,
                    location.offset,
                    location.size
                ),
            }
        }

        let header_chunk = header_chunk.ok_or(KmapError::MissingRequiredChunk(ChunkId::MHDR))?;
        let town_chunk = town_chunk.ok_or(KmapError::MissingRequiredChunk(ChunkId::TOWN))?;

        let header = decode_exact::<MapHeader>(data, &header_chunk)?;

        let areas = area_chunks
            .into_iter()
            .map(|location| verify_area(data, location))
            .collect::<Result<Vec<_>>>()?;

        let towns = verify_record_chunk::<TownRecord>(data, town_chunk)?;
        let waypoints = waypoint_chunk
            .map(|location| verify_record_chunk::<WaypointRecord>(data, location))
            .transpose()?;

        log::debug!(
            "Verified KMAP v{}: {} chunks, {} areas, {} towns, {} waypoints",
            signature.version,
            chunks.len(),
            areas.len(),
            towns.count,
            waypoints.map_or(0, |w| w.count)
        );

        Ok(Self {
            data,
            version: signature.version,
            header,
            chunks,
            areas,
            towns,
            waypoints,
        })
    }

    /// Format version from the file signature
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Decoded map header
    pub fn header(&self) -> &MapHeader {
        &self.header
    }

    /// Map width in tiles
    pub fn width(&self) -> u16 {
        self.header.width
    }

    /// Map height in tiles
    pub fn height(&self) -> u16 {
        self.header.height
    }

    /// Monster spawn file name, relative to the map file's directory
    pub fn monster_spawn_file(&self) -> &str {
        &self.header.monster_spawn_file
    }

    /// NPC spawn file name, relative to the map file's directory
    pub fn npc_spawn_file(&self) -> &str {
        &self.header.npc_spawn_file
    }

    /// House file name, relative to the map file's directory
    pub fn house_file(&self) -> &str {
        &self.header.house_file
    }

    /// Every chunk found in the buffer, in file order
    pub fn chunks(&self) -> &[ChunkLocation] {
        &self.chunks
    }

    /// Areas in file order
    pub fn areas(&self) -> impl ExactSizeIterator<Item = AreaView<'a>> + '_ {
        let data = self.data;
        self.areas.iter().map(move |entry| AreaView {
            location: entry.location,
            header: entry.header,
            records: Records::new(data, entry.location, entry.tiles_start, entry.header.tile_count),
        })
    }

    /// Town records in file order
    pub fn towns(&self) -> Records<'a, TownRecord> {
        Records::new(
            self.data,
            self.towns.location,
            RECORD_COUNT_SIZE,
            self.towns.count,
        )
    }

    /// Waypoint records, or `None` when the file has no `WAYP` chunk
    pub fn waypoints(&self) -> Option<Records<'a, WaypointRecord>> {
        self.waypoints.map(|chunk| {
            Records::new(self.data, chunk.location, RECORD_COUNT_SIZE, chunk.count)
        })
    }

    /// Number of areas
    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Number of tile records across all areas
    pub fn tile_count(&self) -> u64 {
        self.areas
            .iter()
            .map(|entry| u64::from(entry.header.tile_count))
            .sum()
    }

    /// Number of town records
    pub fn town_count(&self) -> u32 {
        self.towns.count
    }

    /// Number of waypoint records (0 when the chunk is absent)
    pub fn waypoint_count(&self) -> u32 {
        self.waypoints.map_or(0, |chunk| chunk.count)
    }
}

/// One `AREA` chunk
#[derive(Debug, Clone)]
pub struct AreaView<'a> {
    location: ChunkLocation,
    header: AreaHeader,
    records: Records<'a, TileRecord>,
}

impl<'a> AreaView<'a> {
    /// Base position of the area
    pub fn position(&self) -> Position {
        self.header.position
    }

    /// Number of tile records in the area
    pub fn tile_count(&self) -> u32 {
        self.header.tile_count
    }

    /// Where the chunk sits in the file
    pub fn location(&self) -> ChunkLocation {
        self.location
    }

    /// Tile records in schema order
    pub fn tiles(&self) -> Records<'a, TileRecord> {
        self.records.clone()
    }
}

/// Lazy iterator decoding `T` records from a chunk payload
///
/// Yields `Err` at most once: after a decoding failure the iterator is
/// exhausted.
pub struct Records<'a, T> {
    cursor: Cursor<&'a [u8]>,
    location: ChunkLocation,
    remaining: u32,
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T> Records<'a, T> {
    fn new(data: &'a [u8], location: ChunkLocation, start: u64, count: u32) -> Self {
        let mut cursor = Cursor::new(location.payload(data));
        cursor.set_position(start);
        Self {
            cursor,
            location,
            remaining: count,
            index: 0,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for Records<'_, T> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            location: self.location,
            remaining: self.remaining,
            index: self.index,
            _marker: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for Records<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Records")
            .field("chunk", &self.location.id)
            .field("position", &self.cursor.position())
            .field("remaining", &self.remaining)
            .finish()
    }
}

impl<T> Iterator for Records<'_, T>
where
    T: for<'b> BinRead<Args<'b> = ()>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let index = self.index;
        self.index += 1;
        self.remaining -= 1;

        match T::read_options(&mut self.cursor, Endian::Little, ()) {
            Ok(record) => Some(Ok(record)),
            Err(e) => {
                self.remaining = 0;
                Some(Err(KmapError::malformed(
                    self.location.id,
                    self.location.offset,
                    format!("record {index}: {e}"),
                )))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

/// Enumerate chunks after the signature, rejecting anything that does not
/// fit the buffer.
fn discover_chunks(data: &[u8]) -> Result<Vec<ChunkLocation>> {
    let file_size = data.len() as u64;
    let mut cursor = Cursor::new(data);
    let mut offset = SIGNATURE_SIZE;
    let mut chunks = Vec::new();

    while offset < file_size {
        let remaining = file_size - offset;
        if remaining < CHUNK_HEADER_SIZE as u64 {
            return Err(KmapError::TrailingBytes { offset, remaining });
        }

        cursor.set_position(offset);
        let header = ChunkHeader::read(&mut cursor)?;

        let available = remaining - CHUNK_HEADER_SIZE as u64;
        if u64::from(header.size) > available {
            return Err(KmapError::Truncated {
                chunk: header.id,
                offset,
                needed: u64::from(header.size),
                available,
            });
        }

        chunks.push(ChunkLocation {
            id: header.id,
            offset,
            size: header.size,
        });
        offset += header.total_size();
    }

    Ok(chunks)
}

fn set_unique(slot: &mut Option<ChunkLocation>, location: ChunkLocation) -> Result<()> {
    if slot.is_some() {
        return Err(KmapError::DuplicateChunk {
            chunk: location.id,
            offset: location.offset,
        });
    }
    *slot = Some(location);
    Ok(())
}

/// Decode a single `T` that must span the whole payload
fn decode_exact<T>(data: &[u8], location: &ChunkLocation) -> Result<T>
where
    T: for<'b> BinRead<Args<'b> = ()>,
{
    let payload = location.payload(data);
    let mut cursor = Cursor::new(payload);

    let value = T::read_options(&mut cursor, Endian::Little, ())
        .map_err(|e| KmapError::malformed(location.id, location.offset, e.to_string()))?;

    ensure_consumed(&cursor, location)?;
    Ok(value)
}

fn verify_area(data: &[u8], location: ChunkLocation) -> Result<AreaEntry> {
    let mut cursor = Cursor::new(location.payload(data));

    let header = AreaHeader::read(&mut cursor)
        .map_err(|e| KmapError::malformed(location.id, location.offset, e.to_string()))?;
    let tiles_start = cursor.position();

    skip_records::<TileRecord>(&mut cursor, &location, header.tile_count)?;
    ensure_consumed(&cursor, &location)?;

    Ok(AreaEntry {
        location,
        header,
        tiles_start,
    })
}

fn verify_record_chunk<T>(data: &[u8], location: ChunkLocation) -> Result<RecordChunk>
where
    T: for<'b> BinRead<Args<'b> = ()>,
{
    let mut cursor = Cursor::new(location.payload(data));

    let count = u32::read_le(&mut cursor)
        .map_err(|e| KmapError::malformed(location.id, location.offset, e.to_string()))?;

    skip_records::<T>(&mut cursor, &location, count)?;
    ensure_consumed(&cursor, &location)?;

    Ok(RecordChunk { location, count })
}

/// Decode and drop `count` records
fn skip_records<T>(cursor: &mut Cursor<&[u8]>, location: &ChunkLocation, count: u32) -> Result<()>
where
    T: for<'b> BinRead<Args<'b> = ()>,
{
    for index in 0..count {
        T::read_options(cursor, Endian::Little, ()).map_err(|e| {
            KmapError::malformed(location.id, location.offset, format!("record {index}: {e}"))
        })?;
    }
    Ok(())
}

fn ensure_consumed(cursor: &Cursor<&[u8]>, location: &ChunkLocation) -> Result<()> {
    let consumed = cursor.position();
    let size = u64::from(location.size);
    if consumed != size {
        return Err(KmapError::malformed(
            location.id,
            location.offset,
            format!("{} trailing bytes after the last record", size - consumed),
        ));
    }
    Ok(())
}
