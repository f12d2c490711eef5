use binrw::{BinRead, BinWrite};

/// 4-byte chunk identifier (magic bytes).
///
/// Unlike most chunked game formats, KMAP stores chunk identifiers in reading
/// order: the `MHDR` chunk starts with the bytes `[b'M', b'H', b'D', b'R']`.
///
/// # Usage
///
/// ```rust
/// use kmap::chunk_id::ChunkId;
///
/// let header = ChunkId::MHDR;
/// assert_eq!(header.as_str(), "MHDR");
///
/// let area = ChunkId::from_str("AREA").unwrap();
/// assert_eq!(area, ChunkId::AREA);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, BinRead, BinWrite)]
pub struct ChunkId(pub [u8; 4]);

impl ChunkId {
    /// Map header - dimensions and companion resource file names
    pub const MHDR: Self = Self(*b"MHDR");

    /// Area - base position plus the tile records sharing it
    pub const AREA: Self = Self(*b"AREA");

    /// Towns - id, name and temple position per town
    pub const TOWN: Self = Self(*b"TOWN");

    /// Waypoints - named positions (optional)
    pub const WAYP: Self = Self(*b"WAYP");

    /// Convert to human-readable string.
    ///
    /// Non-ASCII bytes are replaced, so a corrupted identifier still renders.
    #[must_use]
    pub fn as_str(&self) -> String {
        String::from_utf8_lossy(&self.0).to_string()
    }

    /// Create from a 4-character string.
    ///
    /// Returns `None` if the string is not exactly 4 bytes long.
    ///
    /// ```rust
    /// use kmap::chunk_id::ChunkId;
    ///
    /// assert_eq!(ChunkId::from_str("TOWN"), Some(ChunkId::TOWN));
    /// assert!(ChunkId::from_str("TOWNS").is_none());
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let bytes: [u8; 4] = s.as_bytes().try_into().ok()?;
        Some(Self(bytes))
    }

    /// Whether this is one of the chunk types the view understands.
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(*self, Self::MHDR | Self::AREA | Self::TOWN | Self::WAYP)
    }
}

impl std::fmt::Display for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
