//! Reader and writer for KMAP binary world map files.
//!
//! A KMAP file describes a persistent game world: its dimensions, the names
//! of companion resource files, the tiles of every map area with their
//! stacked items, the towns, and named waypoints.
//!
//! The reader never copies the map. [`KmapView::new`] validates the whole
//! buffer up front, so a view that was built successfully only contains
//! records that decode cleanly, and then decodes records lazily while the
//! caller iterates.
//!
//! ## File Structure
//!
//! ```text
//! "KMAP" version:u32
//! MHDR   width, height, monster/npc/house file names   (exactly once)
//! AREA   base position + tile records                  (any number)
//! TOWN   count:u32 + town records                      (exactly once)
//! WAYP   count:u32 + waypoint records                  (optional)
//! ```
//!
//! Each chunk is an 8-byte header (identifier, payload size) followed by the
//! payload. Chunks with unknown identifiers are skipped.
//!
//! ## Example
//!
//! ```no_run
//! use kmap::KmapView;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bytes = std::fs::read("data/world/canary.kmap")?;
//! let view = KmapView::new(&bytes)?;
//!
//! println!("Map size: {}x{}", view.width(), view.height());
//! println!("Houses defined in {}", view.house_file());
//!
//! for town in view.towns() {
//!     let town = town?;
//!     println!("{} -> {}", town.name, town.position);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod builder;
pub mod chunk_header;
pub mod chunk_id;
pub mod chunks;
pub mod error;
pub mod view;

pub use builder::KmapBuilder;
pub use chunk_header::{CHUNK_HEADER_SIZE, ChunkHeader};
pub use chunk_id::ChunkId;
pub use error::{KmapError, Result};
pub use view::{AreaView, ChunkLocation, KmapView, Records};
