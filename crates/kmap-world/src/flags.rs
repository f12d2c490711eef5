//! Translation of encoded tile flags into server tile state

use kmap::chunks::EncodedTileFlags;

use crate::tile::TileFlags;

/// Encoded bit to tile state bit
const FLAG_TABLE: [(EncodedTileFlags, TileFlags); 4] = [
    (EncodedTileFlags::PROTECTION_ZONE, TileFlags::PROTECTION_ZONE),
    (EncodedTileFlags::NO_PVP_ZONE, TileFlags::NO_PVP_ZONE),
    (EncodedTileFlags::PVP_ZONE, TileFlags::PVP_ZONE),
    (EncodedTileFlags::NO_LOGOUT, TileFlags::NO_LOGOUT),
];

/// Translate an encoded flag mask; bits without a table entry are dropped
#[must_use]
pub fn translate_flags(encoded: u32) -> TileFlags {
    let encoded = EncodedTileFlags::from_bits_retain(encoded);
    FLAG_TABLE
        .iter()
        .filter(|(from, _)| encoded.contains(*from))
        .fold(TileFlags::empty(), |flags, (_, to)| flags | *to)
}
