//! Error types for KMAP parsing and validation.
//!
//! Every error in this module is fatal for the file it was raised for: a buffer
//! that fails structural validation is rejected as a whole, and nothing decoded
//! from it should be used.

use thiserror::Error;

use crate::ChunkId;

/// Result type alias using [`KmapError`] as the error type.
pub type Result<T> = std::result::Result<T, KmapError>;

/// Errors that can occur while validating or decoding a KMAP buffer.
#[derive(Error, Debug)]
pub enum KmapError {
    /// Underlying I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The buffer contains no data at all.
    #[error("Empty map buffer")]
    EmptyBuffer,

    /// The buffer does not start with the `KMAP` signature.
    #[error("Invalid file signature: expected \"KMAP\", found {found:?}")]
    InvalidSignature {
        /// First bytes of the buffer
        found: Vec<u8>,
    },

    /// The signature carries a format version this crate cannot read.
    #[error("Unsupported KMAP version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version stored in the file
        found: u32,
        /// Version understood by this crate
        supported: u32,
    },

    /// A chunk header or payload runs past the end of the buffer.
    #[error("Chunk {chunk} at offset {offset} is truncated: needs {needed} bytes, {available} available")]
    Truncated {
        /// Identifier of the truncated chunk
        chunk: ChunkId,
        /// Offset of the chunk header
        offset: u64,
        /// Bytes required by the header
        needed: u64,
        /// Bytes left in the buffer
        available: u64,
    },

    /// Fewer than 8 bytes remain where a chunk header was expected.
    #[error("Trailing {remaining} bytes at offset {offset} do not form a chunk header")]
    TrailingBytes {
        /// Offset of the trailing bytes
        offset: u64,
        /// Number of trailing bytes
        remaining: u64,
    },

    /// A chunk that must be present is missing.
    #[error("Missing required chunk: {0}")]
    MissingRequiredChunk(ChunkId),

    /// A chunk that may appear at most once appears again.
    #[error("Duplicate {chunk} chunk at offset {offset}")]
    DuplicateChunk {
        /// Identifier of the repeated chunk
        chunk: ChunkId,
        /// Offset of the second occurrence
        offset: u64,
    },

    /// The records of a chunk do not decode to exactly its payload.
    #[error("Malformed {chunk} chunk at offset {offset}: {message}")]
    MalformedChunk {
        /// Identifier of the malformed chunk
        chunk: ChunkId,
        /// Offset of the chunk header
        offset: u64,
        /// What went wrong
        message: String,
    },

    /// Binary decoding error raised by binrw.
    #[error("Binary parsing error: {0}")]
    Binrw(#[from] binrw::Error),
}

impl KmapError {
    /// Create a malformed chunk error
    pub fn malformed(chunk: ChunkId, offset: u64, message: impl Into<String>) -> Self {
        Self::MalformedChunk {
            chunk,
            offset,
            message: message.into(),
        }
    }
}
