//! Validation and lazy iteration through `KmapView`.

use kmap::chunks::{
    AreaRecord, ItemDetails, ItemRecord, MAX_ITEM_DEPTH, Position, TileRecord, TownRecord,
    WaypointRecord,
};
use kmap::{ChunkId, KmapBuilder, KmapError, KmapView};
use pretty_assertions::assert_eq;

/// Append a raw chunk
fn push_chunk(data: &mut Vec<u8>, id: &[u8; 4], payload: &[u8]) {
    data.extend_from_slice(id);
    data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    data.extend_from_slice(payload);
}

/// MHDR payload for a 16x16 map without resource files
fn header_payload() -> Vec<u8> {
    let mut payload = Vec::new();
    payload.extend_from_slice(&16u16.to_le_bytes());
    payload.extend_from_slice(&16u16.to_le_bytes());
    payload.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
    payload
}

fn signature() -> Vec<u8> {
    b"KMAP\x01\x00\x00\x00".to_vec()
}

fn sample_map() -> Vec<u8> {
    KmapBuilder::new(2048, 2048)
        .monster_spawn_file("canary-monster.xml")
        .npc_spawn_file("canary-npc.xml")
        .house_file("canary-house.xml")
        .add_area(
            AreaRecord::new(Position::new(100, 100, 7))
                .with_tile(TileRecord::new(2, 3).with_ground(ItemRecord::new(100)))
                .with_tile(
                    TileRecord::new(4, 4)
                        .with_ground(ItemRecord::new(101))
                        .with_item(
                            ItemRecord::new(1987).with_details(ItemDetails {
                                container_items: vec![ItemRecord::new(3031)],
                                ..ItemDetails::default()
                            }),
                        ),
                ),
        )
        .add_area(
            AreaRecord::new(Position::new(200, 300, 6))
                .with_tile(TileRecord::new(0, 0).with_house(5)),
        )
        .add_town(TownRecord::new(1, "Thais", Position::new(32369, 32241, 7)))
        .add_town(TownRecord::new(2, "Carlin", Position::new(32360, 31782, 7)))
        .add_waypoint(WaypointRecord::new("temple", Position::new(32369, 32241, 7)))
        .to_bytes()
        .unwrap()
}

#[test]
fn areas_and_tiles_follow_file_order() {
    let data = sample_map();
    let view = KmapView::new(&data).unwrap();

    let areas: Vec<_> = view.areas().collect();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0].position(), Position::new(100, 100, 7));
    assert_eq!(areas[0].tile_count(), 2);
    assert_eq!(areas[1].position(), Position::new(200, 300, 6));

    let tiles: Vec<TileRecord> = areas[0].tiles().collect::<Result<_, _>>().unwrap();
    assert_eq!((tiles[0].x, tiles[0].y), (2, 3));
    assert_eq!((tiles[1].x, tiles[1].y), (4, 4));
    assert_eq!(tiles[1].items[0].container_items()[0].id, 3031);

    let house_tile = areas[1].tiles().next().unwrap().unwrap();
    assert_eq!(house_tile.house_id, 5);
    assert_eq!(house_tile.ground, None);
}

#[test]
fn towns_and_waypoints_are_exposed() {
    let data = sample_map();
    let view = KmapView::new(&data).unwrap();

    let towns: Vec<_> = view.towns().map(Result::unwrap).collect();
    assert_eq!(view.town_count(), 2);
    assert_eq!(towns[0].name, "Thais");
    assert_eq!(towns[1].id, 2);

    let waypoints: Vec<_> = view.waypoints().unwrap().map(Result::unwrap).collect();
    assert_eq!(waypoints.len(), 1);
    assert_eq!(waypoints[0].name, "temple");
    assert_eq!(view.waypoint_count(), 1);
    assert_eq!(view.tile_count(), 3);
}

#[test]
fn header_exposes_resource_file_names() {
    let data = sample_map();
    let view = KmapView::new(&data).unwrap();

    assert_eq!(view.header().width, 2048);
    assert_eq!(view.monster_spawn_file(), "canary-monster.xml");
    assert_eq!(view.npc_spawn_file(), "canary-npc.xml");
    assert_eq!(view.house_file(), "canary-house.xml");
}

#[test]
fn chunk_locations_are_recorded() {
    let data = sample_map();
    let view = KmapView::new(&data).unwrap();

    let ids: Vec<ChunkId> = view.chunks().iter().map(|c| c.id).collect();
    assert_eq!(
        ids,
        vec![
            ChunkId::MHDR,
            ChunkId::AREA,
            ChunkId::AREA,
            ChunkId::TOWN,
            ChunkId::WAYP
        ]
    );
    assert_eq!(view.chunks()[0].offset, 8);
}

#[test]
fn missing_header_chunk_is_fatal() {
    let mut data = signature();
    push_chunk(&mut data, b"TOWN", &0u32.to_le_bytes());

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::MissingRequiredChunk(ChunkId::MHDR))
    ));
}

#[test]
fn missing_town_chunk_is_fatal() {
    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header_payload());

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::MissingRequiredChunk(ChunkId::TOWN))
    ));
}

#[test]
fn duplicate_header_chunk_is_fatal() {
    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header_payload());
    push_chunk(&mut data, b"MHDR", &header_payload());
    push_chunk(&mut data, b"TOWN", &0u32.to_le_bytes());

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::DuplicateChunk {
            chunk: ChunkId::MHDR,
            ..
        })
    ));
}

#[test]
fn chunk_running_past_the_buffer_is_fatal() {
    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header_payload());
    data.extend_from_slice(b"TOWN");
    data.extend_from_slice(&100u32.to_le_bytes());
    data.extend_from_slice(&[0, 0, 0, 0]);

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::Truncated {
            chunk: ChunkId::TOWN,
            needed: 100,
            available: 4,
            ..
        })
    ));
}

#[test]
fn partial_chunk_header_is_fatal() {
    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header_payload());
    push_chunk(&mut data, b"TOWN", &0u32.to_le_bytes());
    data.extend_from_slice(b"WAY");

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::TrailingBytes { remaining: 3, .. })
    ));
}

#[test]
fn town_count_larger_than_payload_is_fatal() {
    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header_payload());
    push_chunk(&mut data, b"TOWN", &3u32.to_le_bytes());

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::MalformedChunk {
            chunk: ChunkId::TOWN,
            ..
        })
    ));
}

#[test]
fn bytes_after_the_last_record_are_fatal() {
    let mut town = 0u32.to_le_bytes().to_vec();
    town.push(0xFF);

    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header_payload());
    push_chunk(&mut data, b"TOWN", &town);

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::MalformedChunk { .. })
    ));
}

#[test]
fn tile_with_truncated_item_is_fatal() {
    let mut area = Vec::new();
    area.extend_from_slice(&100u16.to_le_bytes());
    area.extend_from_slice(&100u16.to_le_bytes());
    area.push(7);
    area.extend_from_slice(&1u32.to_le_bytes()); // tile_count
    area.extend_from_slice(&[2, 3]); // x, y
    area.extend_from_slice(&0u32.to_le_bytes()); // house
    area.extend_from_slice(&0u32.to_le_bytes()); // flags
    area.push(1); // has_ground
    area.push(0x64); // half an item id

    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header_payload());
    push_chunk(&mut data, b"AREA", &area);
    push_chunk(&mut data, b"TOWN", &0u32.to_le_bytes());

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::MalformedChunk {
            chunk: ChunkId::AREA,
            ..
        })
    ));
}

#[test]
fn deeply_nested_containers_are_fatal() {
    let mut area = Vec::new();
    area.extend_from_slice(&100u16.to_le_bytes());
    area.extend_from_slice(&100u16.to_le_bytes());
    area.push(7);
    area.extend_from_slice(&1u32.to_le_bytes()); // tile_count
    area.extend_from_slice(&[0, 0]); // x, y
    area.extend_from_slice(&0u32.to_le_bytes()); // house
    area.extend_from_slice(&0u32.to_le_bytes()); // flags
    area.push(0); // has_ground
    area.extend_from_slice(&1u16.to_le_bytes()); // item_count
    for _ in 0..=MAX_ITEM_DEPTH {
        area.extend_from_slice(&1987u16.to_le_bytes());
        area.push(0x02); // presence: details
        area.extend_from_slice(&[0, 0, 0, 0]); // depot, door, has_teleport
        area.extend_from_slice(&1u16.to_le_bytes()); // child_count
    }
    area.extend_from_slice(&[0x64, 0x00, 0x00]);

    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header_payload());
    push_chunk(&mut data, b"AREA", &area);
    push_chunk(&mut data, b"TOWN", &0u32.to_le_bytes());

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::MalformedChunk {
            chunk: ChunkId::AREA,
            ..
        })
    ));
}

#[test]
fn header_with_extra_bytes_is_fatal() {
    let mut header = header_payload();
    header.push(0);

    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header);
    push_chunk(&mut data, b"TOWN", &0u32.to_le_bytes());

    assert!(matches!(
        KmapView::new(&data),
        Err(KmapError::MalformedChunk {
            chunk: ChunkId::MHDR,
            ..
        })
    ));
}

#[test]
fn unknown_chunk_between_known_ones_is_skipped() {
    let mut data = signature();
    push_chunk(&mut data, b"MHDR", &header_payload());
    push_chunk(&mut data, b"NOTE", b"hand edited");
    push_chunk(&mut data, b"TOWN", &0u32.to_le_bytes());

    let view = KmapView::new(&data).unwrap();
    assert_eq!(view.chunks().len(), 3);
    assert_eq!(view.width(), 16);
    assert_eq!(view.town_count(), 0);
}
