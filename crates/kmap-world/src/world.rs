//! The world model populated by the loader

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::WorldError;
use crate::house::{House, Houses};
use crate::position::Position;
use crate::tile::{Tile, TileKind};
use crate::town::{Town, Towns};

/// Companion resource files referenced by the map header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceFiles {
    /// Monster spawn definitions
    pub monster_spawn_file: PathBuf,
    /// NPC spawn definitions
    pub npc_spawn_file: PathBuf,
    /// House definitions
    pub house_file: PathBuf,
}

impl ResourceFiles {
    /// Resolve the stored names against the directory holding `map_path`
    ///
    /// ```
    /// use std::path::Path;
    /// use kmap_world::ResourceFiles;
    ///
    /// let files = ResourceFiles::resolve(
    ///     Path::new("data/world/canary.kmap"),
    ///     "canary-monster.xml",
    ///     "canary-npc.xml",
    ///     "canary-house.xml",
    /// );
    /// assert_eq!(files.house_file, Path::new("data/world/canary-house.xml"));
    /// ```
    #[must_use]
    pub fn resolve(map_path: &Path, monster_spawn: &str, npc_spawn: &str, house: &str) -> Self {
        let directory = map_path.parent().unwrap_or_else(|| Path::new(""));
        Self {
            monster_spawn_file: directory.join(monster_spawn),
            npc_spawn_file: directory.join(npc_spawn),
            house_file: directory.join(house),
        }
    }
}

/// Tile counts per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileKindCounts {
    /// Static tiles
    pub static_tiles: usize,
    /// Dynamic tiles
    pub dynamic_tiles: usize,
    /// House tiles
    pub house_tiles: usize,
}

/// The loaded world
#[derive(Debug, Clone, Default)]
pub struct World {
    width: u16,
    height: u16,
    tiles: HashMap<Position, Tile>,
    houses: Houses,
    towns: Towns,
    waypoints: BTreeMap<String, Position>,
    resource_files: ResourceFiles,
}

impl World {
    /// Create an empty world
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Width in tiles
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in tiles
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resolved companion resource files
    pub fn resource_files(&self) -> &ResourceFiles {
        &self.resource_files
    }

    /// Replace the companion resource files
    pub fn set_resource_files(&mut self, files: ResourceFiles) {
        self.resource_files = files;
    }

    /// Store a tile at its position
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::TileOccupied`] when a tile already exists there;
    /// the world is left unchanged.
    pub fn set_tile(&mut self, tile: Tile) -> Result<(), WorldError> {
        let position = tile.position();
        match self.tiles.entry(position) {
            std::collections::hash_map::Entry::Occupied(_) => {
                Err(WorldError::TileOccupied(position))
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(tile);
                Ok(())
            }
        }
    }

    /// Tile at `position`
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    /// Whether a tile exists at `position`
    pub fn has_tile(&self, position: Position) -> bool {
        self.tiles.contains_key(&position)
    }

    /// Iterate over tiles in arbitrary order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Number of tiles
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tile counts per variant
    pub fn tile_kind_counts(&self) -> TileKindCounts {
        self.tiles
            .values()
            .fold(TileKindCounts::default(), |mut counts, tile| {
                match tile.kind() {
                    TileKind::Static => counts.static_tiles += 1,
                    TileKind::Dynamic => counts.dynamic_tiles += 1,
                    TileKind::House(_) => counts.house_tiles += 1,
                }
                counts
            })
    }

    /// Return the house with `id`, creating it when absent
    pub fn add_house(&mut self, id: u32) -> &mut House {
        self.houses.add_house(id)
    }

    /// House registry
    pub fn houses(&self) -> &Houses {
        &self.houses
    }

    /// Register a town; `false` when the id is already taken
    pub fn add_town(&mut self, town: Town) -> bool {
        self.towns.add_town(town)
    }

    /// Town registry
    pub fn towns(&self) -> &Towns {
        &self.towns
    }

    /// Look up a town for modification
    pub fn town_mut(&mut self, id: u32) -> Option<&mut Town> {
        self.towns.get_mut(id)
    }

    /// Name-keyed waypoints
    pub fn waypoints(&self) -> &BTreeMap<String, Position> {
        &self.waypoints
    }

    /// Register a waypoint, returning the position it replaced
    pub fn add_waypoint(&mut self, name: impl Into<String>, position: Position) -> Option<Position> {
        self.waypoints.insert(name.into(), position)
    }
}
