//! Tile variant selection, positions, flags and item order

use kmap::chunks::{EncodedTileFlags, ItemRecord, TileRecord};
use kmap_world::{Item, Position, RecordError, TileFlags, TileKind};
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::fixtures::*;

fn ids<'a>(items: impl Iterator<Item = &'a Item>) -> Vec<u16> {
    items.map(Item::id).collect()
}

#[test]
fn non_blocking_ground_yields_a_dynamic_tile() {
    let (world, diagnostics) =
        load(&map_with_tiles([TileRecord::new(2, 3).with_ground(ItemRecord::new(GRASS))]));

    assert_eq!(world.tile_count(), 1);
    let tile = world.tile(Position::new(102, 103, 7)).unwrap();
    assert_eq!(tile.kind(), TileKind::Dynamic);
    assert_eq!(ids(tile.contents()), vec![GRASS]);
    assert!(diagnostics.is_empty());
}

#[test]
fn house_id_yields_a_house_tile_linked_to_the_house() {
    let (world, diagnostics) = load(&map_with_tiles([TileRecord::new(2, 3)
        .with_house(5)
        .with_ground(ItemRecord::new(GRASS))]));

    let position = Position::new(102, 103, 7);
    let tile = world.tile(position).unwrap();
    assert_eq!(tile.kind(), TileKind::House(5));
    assert_eq!(tile.house_id(), Some(5));
    assert_eq!(ids(tile.contents()), vec![GRASS]);

    let house = world.houses().get(5).unwrap();
    assert_eq!(house.tiles(), &[position]);
    assert!(diagnostics.is_empty());
}

#[test_case(Some(GRASS), &[], TileKind::Dynamic ; "walkable ground only")]
#[test_case(Some(WATER), &[], TileKind::Static ; "blocking ground only")]
#[test_case(None, &[], TileKind::Dynamic ; "empty record")]
#[test_case(Some(GRASS), &[PLANT], TileKind::Dynamic ; "walkable ground and item")]
#[test_case(Some(GRASS), &[STONE], TileKind::Static ; "blocking first item")]
#[test_case(Some(WATER), &[PLANT], TileKind::Static ; "blocking ground with item")]
#[test_case(None, &[STONE], TileKind::Static ; "blocking item without ground")]
#[test_case(None, &[PLANT], TileKind::Dynamic ; "walkable item without ground")]
#[test_case(Some(GRASS), &[PLANT, STONE], TileKind::Dynamic ; "decided by the first item")]
fn variant_follows_blocking(ground: Option<u16>, items: &[u16], expected: TileKind) {
    let mut record = TileRecord::new(0, 0);
    if let Some(id) = ground {
        record = record.with_ground(ItemRecord::new(id));
    }
    for &id in items {
        record = record.with_item(ItemRecord::new(id));
    }

    let (world, _) = load(&map_with_tiles([record]));

    assert_eq!(world.tile(Position::new(100, 100, 7)).unwrap().kind(), expected);
}

#[test_case(Some(WATER), &[STONE] ; "blocking contents")]
#[test_case(Some(GRASS), &[PLANT] ; "walkable contents")]
#[test_case(None, &[] ; "empty")]
fn house_id_overrides_blocking(ground: Option<u16>, items: &[u16]) {
    let mut record = TileRecord::new(0, 0).with_house(9);
    if let Some(id) = ground {
        record = record.with_ground(ItemRecord::new(id));
    }
    for &id in items {
        record = record.with_item(ItemRecord::new(id));
    }

    let (world, _) = load(&map_with_tiles([record]));

    assert_eq!(
        world.tile(Position::new(100, 100, 7)).unwrap().kind(),
        TileKind::House(9)
    );
}

#[test]
fn items_are_inserted_once_in_schema_order() {
    let record = TileRecord::new(1, 1)
        .with_ground(ItemRecord::new(GRASS))
        .with_item(ItemRecord::new(PLANT))
        .with_item(ItemRecord::new(STONE))
        .with_item(ItemRecord::new(COIN));

    let (world, _) = load(&map_with_tiles([record]));
    let tile = world.tile(Position::new(101, 101, 7)).unwrap();

    assert_eq!(ids(tile.contents()), vec![GRASS, PLANT, STONE, COIN]);
    assert_eq!(tile.item_count(), 4);
}

#[test]
fn house_tile_items_are_inserted_once() {
    let record = TileRecord::new(1, 1)
        .with_house(2)
        .with_ground(ItemRecord::new(GRASS))
        .with_item(ItemRecord::new(PLANT))
        .with_item(ItemRecord::new(CHEST));

    let (world, _) = load(&map_with_tiles([record]));
    let tile = world.tile(Position::new(101, 101, 7)).unwrap();

    assert_eq!(ids(tile.contents()), vec![GRASS, PLANT, CHEST]);
}

#[test]
fn ground_item_before_the_tile_replaces_the_ground() {
    let record = TileRecord::new(0, 0)
        .with_ground(ItemRecord::new(GRASS))
        .with_item(ItemRecord::new(WATER))
        .with_item(ItemRecord::new(PLANT));

    let (world, _) = load(&map_with_tiles([record]));
    let tile = world.tile(Position::new(100, 100, 7)).unwrap();

    assert_eq!(ids(tile.contents()), vec![WATER, PLANT]);
    assert_eq!(tile.kind(), TileKind::Static);
}

#[test]
fn ground_item_after_the_tile_is_stacked_in_order() {
    let record = TileRecord::new(0, 0)
        .with_ground(ItemRecord::new(GRASS))
        .with_item(ItemRecord::new(PLANT))
        .with_item(ItemRecord::new(WATER));

    let (world, diagnostics) = load(&map_with_tiles([record]));
    let tile = world.tile(Position::new(100, 100, 7)).unwrap();

    assert_eq!(ids(tile.contents()), vec![GRASS, PLANT, WATER]);
    assert_eq!(tile.item_count(), 3);
    assert_eq!(tile.kind(), TileKind::Dynamic);
    assert!(diagnostics.is_empty());
}

#[test]
fn ground_item_on_a_house_tile_is_stacked_after_the_ground() {
    let record = TileRecord::new(0, 0)
        .with_house(3)
        .with_ground(ItemRecord::new(GRASS))
        .with_item(ItemRecord::new(WATER));

    let (world, diagnostics) = load(&map_with_tiles([record]));
    let tile = world.tile(Position::new(100, 100, 7)).unwrap();

    assert_eq!(ids(tile.contents()), vec![GRASS, WATER]);
    assert_eq!(tile.item_count(), 2);
    assert_eq!(tile.kind(), TileKind::House(3));
    assert!(diagnostics.is_empty());
}

#[test]
fn every_record_produces_one_tile_at_area_plus_offset() {
    let records = (0..4u8).flat_map(|x| (0..3u8).map(move |y| TileRecord::new(x, y)));
    let (world, _) = load(&map_with_tiles(records));

    assert_eq!(world.tile_count(), 12);
    for x in 0..4u16 {
        for y in 0..3u16 {
            let position = Position::new(100 + x, 100 + y, 7);
            assert_eq!(world.tile(position).map(|t| t.position()), Some(position));
        }
    }
}

#[test]
fn flags_are_translated() {
    let record = TileRecord::new(0, 0).with_flags(
        EncodedTileFlags::PROTECTION_ZONE | EncodedTileFlags::NO_LOGOUT | EncodedTileFlags::REFRESH,
    );

    let (world, _) = load(&map_with_tiles([record]));

    assert_eq!(
        world.tile(Position::new(100, 100, 7)).unwrap().flags(),
        TileFlags::PROTECTION_ZONE | TileFlags::NO_LOGOUT
    );
}

#[test]
fn duplicate_tile_record_is_skipped() {
    let (world, diagnostics) = load(&map_with_tiles([
        TileRecord::new(0, 0).with_ground(ItemRecord::new(GRASS)),
        TileRecord::new(0, 0).with_ground(ItemRecord::new(WATER)),
    ]));

    let tile = world.tile(Position::new(100, 100, 7)).unwrap();
    assert_eq!(tile.ground().map(Item::id), Some(GRASS));
    assert_eq!(
        diagnostics,
        vec![RecordError::DuplicateTile(Position::new(100, 100, 7))]
    );
}

#[test]
fn offset_overflow_is_skipped() {
    use kmap::KmapBuilder;
    use kmap::chunks::{AreaRecord, Position as RecordPosition};

    let area = AreaRecord::new(RecordPosition::new(u16::MAX - 1, 10, 7))
        .with_tile(TileRecord::new(1, 0))
        .with_tile(TileRecord::new(2, 0));
    let (world, diagnostics) = load(&KmapBuilder::new(8, 8).add_area(area));

    assert_eq!(world.tile_count(), 1);
    assert_eq!(
        diagnostics,
        vec![RecordError::TilePositionOverflow {
            area: Position::new(u16::MAX - 1, 10, 7),
            x: 2,
            y: 0,
        }]
    );
}
