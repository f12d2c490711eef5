//! KMAP chunk header parsing
//!
//! Every chunk after the file signature starts with the same 8-byte header: a
//! 4-byte identifier and a 4-byte payload size.

use binrw::{BinRead, BinWrite};

use crate::chunk_id::ChunkId;

/// Size of a chunk header in bytes (identifier + size)
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Standard KMAP chunk header (8 bytes)
///
/// # Binary Layout
///
/// ```text
/// Offset | Size | Field | Description
/// -------|------|-------|------------------------------------------
/// 0x00   |  4   | id    | Chunk identifier ("MHDR", "AREA", ...)
/// 0x04   |  4   | size  | Payload size in bytes (excludes header)
/// ```
///
/// If size = 100, the payload occupies bytes `[8..108]` relative to the chunk
/// start and the next chunk starts at offset 108.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct ChunkHeader {
    /// Chunk identifier
    pub id: ChunkId,

    /// Size of chunk payload in bytes (excludes 8-byte header)
    pub size: u32,
}

impl ChunkHeader {
    /// Total size including header (size + 8)
    #[must_use]
    pub const fn total_size(&self) -> u64 {
        self.size as u64 + CHUNK_HEADER_SIZE as u64
    }
}
