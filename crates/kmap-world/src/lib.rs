//! World model and map loader for persistent-world game servers.
//!
//! [`MapLoader`] reads a KMAP file (see the `kmap` crate) and builds a
//! [`World`]: tiles with their stacked items, houses, towns and waypoints,
//! plus the paths of the companion spawn and house files.
//!
//! Item ids are resolved through an [`ItemTypeRegistry`] supplied by the
//! caller. Records that cannot be used are logged and reported to a
//! [`Diagnostics`] sink; only an unreadable or structurally invalid file fails
//! the whole load.
//!
//! ## Example
//!
//! ```no_run
//! use kmap_world::{ItemFlags, ItemType, ItemTypes, MapLoader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let item_types: ItemTypes = [
//!     ItemType::new(100, "grass").with_flags(ItemFlags::GROUND),
//!     ItemType::new(1285, "stone").with_flags(ItemFlags::BLOCKS_MOVEMENT),
//! ]
//! .into_iter()
//! .collect();
//!
//! let world = MapLoader::new(&item_types).load_file("data/world/canary.kmap")?;
//!
//! println!("Map size: {}x{}", world.width(), world.height());
//! println!("Houses: {}", world.houses().len());
//! println!("Spawns: {}", world.resource_files().monster_spawn_file.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - `serde`: serializable world types and JSON item type registries
//!   ([`ItemTypes::from_json`]).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diagnostics;
pub mod error;
pub mod flags;
pub mod house;
pub mod item;
pub mod item_type;
pub mod loader;
pub mod position;
pub mod tile;
pub mod town;
pub mod world;

pub use diagnostics::Diagnostics;
pub use error::{LoadError, RecordError, WorldError};
pub use flags::translate_flags;
pub use house::{House, Houses};
pub use item::{Item, ItemAttributes};
pub use item_type::{ItemFlags, ItemType, ItemTypeRegistry, ItemTypes};
pub use loader::MapLoader;
pub use position::Position;
pub use tile::{Tile, TileFlags, TileKind};
pub use town::{Town, Towns};
pub use world::{ResourceFiles, TileKindCounts, World};

/// Load a map file, discarding record diagnostics
///
/// # Errors
///
/// See [`LoadError`].
pub fn load_map<P, R>(path: P, item_types: &R) -> Result<World, LoadError>
where
    P: AsRef<std::path::Path>,
    R: ItemTypeRegistry + ?Sized,
{
    MapLoader::new(item_types).load_file(path)
}
