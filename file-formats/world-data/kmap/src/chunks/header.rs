//! File signature and the `MHDR` map header chunk

use binrw::binrw;

use super::string::{parse_string, write_string};

/// Signature bytes at offset 0 of every KMAP file
pub const KMAP_SIGNATURE: [u8; 4] = *b"KMAP";

/// Format version written by this crate and the only one it reads
pub const KMAP_VERSION: u32 = 1;

/// File signature (8 bytes): `"KMAP"` followed by the format version
#[binrw]
#[brw(little, magic = b"KMAP")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSignature {
    /// Format version
    pub version: u32,
}

impl Default for FileSignature {
    fn default() -> Self {
        Self {
            version: KMAP_VERSION,
        }
    }
}

/// MHDR - Map header
///
/// ```text
/// Offset | Size | Field
/// -------|------|-------------------
/// 0x00   |  2   | width
/// 0x02   |  2   | height
/// 0x04   |  var | monster_spawn_file (len:u16 + UTF-8)
///  ...   |  var | npc_spawn_file
///  ...   |  var | house_file
/// ```
///
/// The three file names are companion resources stored next to the map file.
/// They are plain names, not paths; callers resolve them against the
/// directory the map was read from.
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapHeader {
    /// Map width in tiles
    pub width: u16,

    /// Map height in tiles
    pub height: u16,

    /// Monster spawn file name
    #[br(parse_with = parse_string)]
    #[bw(write_with = write_string)]
    pub monster_spawn_file: String,

    /// NPC spawn file name
    #[br(parse_with = parse_string)]
    #[bw(write_with = write_string)]
    pub npc_spawn_file: String,

    /// House definition file name
    #[br(parse_with = parse_string)]
    #[bw(write_with = write_string)]
    pub house_file: String,
}
