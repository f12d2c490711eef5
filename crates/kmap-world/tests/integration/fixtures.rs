//! Shared item types and map builders

use std::path::Path;

use kmap::KmapBuilder;
use kmap::chunks::{AreaRecord, Position as RecordPosition, TileRecord};
use kmap_world::{ItemFlags, ItemType, ItemTypes, MapLoader, RecordError, World};

pub const GRASS: u16 = 100;
pub const WATER: u16 = 101;
pub const STONE: u16 = 1285;
pub const PLANT: u16 = 1490;
pub const CHEST: u16 = 1740;
pub const BAG: u16 = 1987;
pub const TORCH: u16 = 2050;
pub const COIN: u16 = 2160;
pub const UNKNOWN: u16 = 9999;

pub fn item_types() -> ItemTypes {
    [
        ItemType::new(GRASS, "grass").with_flags(ItemFlags::GROUND),
        ItemType::new(WATER, "water").with_flags(ItemFlags::GROUND | ItemFlags::BLOCKS_MOVEMENT),
        ItemType::new(STONE, "stone").with_flags(ItemFlags::BLOCKS_MOVEMENT),
        ItemType::new(PLANT, "plant"),
        ItemType::new(CHEST, "chest").with_flags(ItemFlags::CONTAINER),
        ItemType::new(BAG, "bag").with_flags(ItemFlags::CONTAINER | ItemFlags::MOVEABLE),
        ItemType::new(TORCH, "torch")
            .with_flags(ItemFlags::MOVEABLE)
            .with_decay_time(600),
        ItemType::new(COIN, "coin").with_flags(ItemFlags::MOVEABLE),
    ]
    .into_iter()
    .collect()
}

/// Area base used by single-tile maps
pub const AREA: RecordPosition = RecordPosition::new(100, 100, 7);

/// Map with one area at (100, 100, 7) holding the given tiles
pub fn map_with_tiles(tiles: impl IntoIterator<Item = TileRecord>) -> KmapBuilder {
    let area = tiles
        .into_iter()
        .fold(AreaRecord::new(AREA), AreaRecord::with_tile);
    KmapBuilder::new(1024, 1024).add_area(area)
}

/// Load a builder's output, collecting diagnostics
pub fn load(builder: &KmapBuilder) -> (World, Vec<RecordError>) {
    let data = builder.to_bytes().unwrap();
    let types = item_types();
    let mut loader = MapLoader::new(&types).with_diagnostics(Vec::<RecordError>::new());
    let world = loader
        .load_bytes(&data, Path::new("data/world/test.kmap"))
        .unwrap();
    (world, loader.into_diagnostics())
}
