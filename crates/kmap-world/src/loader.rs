//! Populates a [`World`] from a KMAP file.
//!
//! The loader makes one pass over a validated [`KmapView`]: header, then every
//! tile of every area, then towns, then waypoints. Structural problems abort
//! the load with a [`LoadError`]. Problems with individual records are logged,
//! handed to the [`Diagnostics`] sink, and the record (or the offending part of
//! it) is skipped.
//!
//! # Tile variants
//!
//! A tile with a non-zero house id is always a house tile. Otherwise creation
//! is deferred until the first non-ground item: the tile is static when the
//! ground or that item blocks movement, dynamic otherwise. Ground-type items
//! seen before the tile exists replace the pending ground; once the tile
//! exists every item is appended to it.

use std::path::Path;
use std::time::Instant;

use kmap::KmapView;
use kmap::chunks::{ItemRecord, TileRecord, TownRecord, WaypointRecord};

use crate::diagnostics::Diagnostics;
use crate::error::{LoadError, RecordError, WorldError};
use crate::flags::translate_flags;
use crate::item::{Item, ItemAttributes};
use crate::item_type::ItemTypeRegistry;
use crate::position::Position;
use crate::tile::{Tile, TileKind};
use crate::town::Town;
use crate::world::{ResourceFiles, World};

/// Map loader
///
/// # Example
///
/// ```no_run
/// use kmap_world::{ItemTypes, MapLoader, RecordError};
///
/// # fn example(item_types: &ItemTypes) -> Result<(), kmap_world::LoadError> {
/// let mut loader = MapLoader::new(item_types).with_diagnostics(Vec::<RecordError>::new());
/// let world = loader.load_file("data/world/canary.kmap")?;
///
/// println!("{} tiles, {} skipped records", world.tile_count(), loader.diagnostics().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MapLoader<'a, R: ItemTypeRegistry + ?Sized, D: Diagnostics = ()> {
    item_types: &'a R,
    diagnostics: D,
}

impl<'a, R: ItemTypeRegistry + ?Sized> MapLoader<'a, R> {
    /// Create a loader that resolves item ids through `item_types`
    pub fn new(item_types: &'a R) -> Self {
        Self {
            item_types,
            diagnostics: (),
        }
    }
}

impl<'a, R: ItemTypeRegistry + ?Sized, D: Diagnostics> MapLoader<'a, R, D> {
    /// Replace the diagnostics sink
    pub fn with_diagnostics<S: Diagnostics>(self, diagnostics: S) -> MapLoader<'a, R, S> {
        MapLoader {
            item_types: self.item_types,
            diagnostics,
        }
    }

    /// The diagnostics sink
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Consume the loader and return the diagnostics sink
    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }

    /// Read and load a map file
    ///
    /// Resource file names are resolved against the directory of `path`.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<World, LoadError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| LoadError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_bytes(&data, path)
    }

    /// Load a map from a buffer that was read from `map_path`
    pub fn load_bytes(&mut self, data: &[u8], map_path: &Path) -> Result<World, LoadError> {
        let start = Instant::now();

        let view = KmapView::new(data)?;
        let mut world = load_header(&view, map_path);

        for area in view.areas() {
            let base = Position::from(area.position());
            for record in area.tiles() {
                self.load_tile(&mut world, base, &record?);
            }
        }

        for record in view.towns() {
            self.load_town(&mut world, record?);
        }

        if let Some(waypoints) = view.waypoints() {
            for record in waypoints {
                self.load_waypoint(&mut world, record?);
            }
        }

        log::info!(
            "Loaded {} tiles, {} houses, {} towns, {} waypoints",
            world.tile_count(),
            world.houses().len(),
            world.towns().len(),
            world.waypoints().len()
        );
        log::info!(
            "Map loading time: {:.3} seconds",
            start.elapsed().as_secs_f64()
        );

        Ok(world)
    }

    fn load_tile(&mut self, world: &mut World, base: Position, record: &TileRecord) {
        let Some(position) = base.offset(record.x, record.y) else {
            self.report(RecordError::TilePositionOverflow {
                area: base,
                x: record.x,
                y: record.y,
            });
            return;
        };

        if world.has_tile(position) {
            self.report(RecordError::DuplicateTile(position));
            return;
        }

        let mut tile = None;
        if record.house_id != 0 {
            world.add_house(record.house_id).add_tile(position);
            tile = Some(Tile::new(position, TileKind::House(record.house_id), None));
        }

        let mut ground = record
            .ground
            .as_ref()
            .and_then(|ground| self.build_placed_item(ground, tile.as_ref(), position));
        if let Some(ground) = ground.as_mut() {
            ground.set_loaded_from_map(true);
        }
        if let Some(tile) = tile.as_mut()
            && let Some(ground) = ground.take()
        {
            tile.add_item(ground);
        }

        for item_record in &record.items {
            let Some(mut item) = self.build_placed_item(item_record, tile.as_ref(), position)
            else {
                continue;
            };
            item.set_loaded_from_map(true);

            if let Some(tile) = tile.as_mut() {
                item.start_decaying();
                tile.add_item(item);
                continue;
            }

            if item.is_ground() {
                ground = Some(item);
                continue;
            }

            let blocks =
                item.blocks_movement() || ground.as_ref().is_some_and(Item::blocks_movement);
            let mut created = Tile::new(position, variant(blocks), ground.take());
            item.start_decaying();
            created.add_item(item);
            tile = Some(created);
        }

        let mut tile = tile.unwrap_or_else(|| {
            let blocks = ground.as_ref().is_some_and(Item::blocks_movement);
            Tile::new(position, variant(blocks), ground.take())
        });

        tile.set_flags(translate_flags(record.flags));

        if let Err(WorldError::TileOccupied(position)) = world.set_tile(tile) {
            self.report(RecordError::DuplicateTile(position));
        }
    }

    /// Build an item that goes directly onto `tile`
    fn build_placed_item(
        &mut self,
        record: &ItemRecord,
        tile: Option<&Tile>,
        position: Position,
    ) -> Option<Item> {
        let item = self.build_item(record, position)?;

        if let Some(house_id) = tile.and_then(Tile::house_id)
            && item.is_moveable()
        {
            self.report(RecordError::MoveableItemInHouse {
                id: record.id,
                house_id,
                position,
            });
            return None;
        }

        Some(item)
    }

    /// Build an item and, for containers, its contents
    fn build_item(&mut self, record: &ItemRecord, position: Position) -> Option<Item> {
        let item_types = self.item_types;
        let Some(item_type) = item_types.item_type(record.id) else {
            self.report(RecordError::UnknownItemType {
                id: record.id,
                position,
            });
            return None;
        };

        let mut item = Item::new(item_type);
        item.set_attributes(ItemAttributes::from(record));

        let children = record.container_items();
        if children.is_empty() {
            return Some(item);
        }

        if !item.is_container() {
            self.report(RecordError::NotAContainer {
                id: record.id,
                children: children.len(),
                position,
            });
            return Some(item);
        }

        for child in children {
            if let Some(child) = self.build_item(child, position) {
                item.add_child(child);
            }
        }

        Some(item)
    }

    fn load_town(&mut self, world: &mut World, record: TownRecord) {
        if record.id == 0 {
            self.report(RecordError::InvalidTownId { name: record.name });
            return;
        }

        let name_is_empty = record.name.is_empty();
        if !world.add_town(Town::new(record.id, record.name)) {
            self.report(RecordError::DuplicateTown { id: record.id });
            return;
        }

        if name_is_empty {
            self.report(RecordError::EmptyTownName { id: record.id });
        }

        let temple = Position::from(record.position);
        if temple.has_unset_axis() {
            self.report(RecordError::InvalidTemplePosition {
                id: record.id,
                position: temple,
            });
            return;
        }

        if let Some(town) = world.town_mut(record.id) {
            town.set_temple_position(temple);
        }
    }

    fn load_waypoint(&mut self, world: &mut World, record: WaypointRecord) {
        let position = Position::from(record.position);
        if record.name.is_empty() || position.has_unset_axis() {
            self.report(RecordError::InvalidWaypoint {
                name: record.name,
                position,
            });
            return;
        }

        world.add_waypoint(record.name, position);
    }

    fn report(&mut self, error: RecordError) {
        log::log!(error.level(), "{error}");
        self.diagnostics.record(error);
    }
}

fn variant(blocks: bool) -> TileKind {
    if blocks {
        TileKind::Static
    } else {
        TileKind::Dynamic
    }
}

fn load_header(view: &KmapView<'_>, map_path: &Path) -> World {
    let mut world = World::new(view.width(), view.height());
    world.set_resource_files(ResourceFiles::resolve(
        map_path,
        view.monster_spawn_file(),
        view.npc_spawn_file(),
        view.house_file(),
    ));

    log::info!("Map size: {}x{}", view.width(), view.height());
    world
}
