//! Writing files with `KmapBuilder` and reading them back.

use kmap::chunks::{
    ActionIds, AreaRecord, EncodedTileFlags, ItemAttributes, ItemDetails, ItemRecord, Position,
    TileRecord, TownRecord,
};
use kmap::{KmapBuilder, KmapView};
use pretty_assertions::assert_eq;

fn decorated_tile() -> TileRecord {
    let chest = ItemRecord::new(1740)
        .with_attributes(ItemAttributes {
            count: 1,
            description: "A dusty chest.".to_string(),
            action: Some(ActionIds {
                action_id: 2000,
                unique_id: 40001,
            }),
        })
        .with_child(ItemRecord::new(3031))
        .with_child(ItemRecord::new(2854).with_child(ItemRecord::new(3035)));

    let teleport = ItemRecord::new(1949).with_details(ItemDetails {
        teleport: Some(Position::new(32000, 32000, 7)),
        ..ItemDetails::default()
    });

    TileRecord::new(10, 20)
        .with_flags(EncodedTileFlags::PROTECTION_ZONE | EncodedTileFlags::NO_LOGOUT)
        .with_ground(ItemRecord::new(4526))
        .with_item(chest)
        .with_item(teleport)
}

#[test]
fn builder_output_reads_back_identically() {
    let tile = decorated_tile();
    let data = KmapBuilder::new(512, 256)
        .add_area(AreaRecord::new(Position::new(1000, 2000, 7)).with_tile(tile.clone()))
        .add_town(TownRecord::new(3, "Venore", Position::new(32957, 32076, 7)))
        .to_bytes()
        .unwrap();

    let view = KmapView::new(&data).unwrap();
    let area = view.areas().next().unwrap();
    let read_back = area.tiles().next().unwrap().unwrap();

    assert_eq!(read_back, tile);
    assert_eq!(
        read_back.encoded_flags(),
        EncodedTileFlags::PROTECTION_ZONE | EncodedTileFlags::NO_LOGOUT
    );
}

#[test]
fn write_to_file_produces_a_valid_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.kmap");

    KmapBuilder::new(64, 64)
        .monster_spawn_file("world-monster.xml")
        .add_area(AreaRecord::new(Position::new(0, 0, 7)).with_tile(decorated_tile()))
        .write_to_file(&path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let view = KmapView::new(&bytes).unwrap();

    assert_eq!(view.monster_spawn_file(), "world-monster.xml");
    assert_eq!(view.tile_count(), 1);
}

#[test]
fn empty_areas_are_kept() {
    let data = KmapBuilder::new(8, 8)
        .add_area(AreaRecord::new(Position::new(5, 5, 0)))
        .to_bytes()
        .unwrap();

    let view = KmapView::new(&data).unwrap();
    let area = view.areas().next().unwrap();

    assert_eq!(area.tile_count(), 0);
    assert_eq!(area.tiles().count(), 0);
}
