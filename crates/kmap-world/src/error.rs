//! Error types for map loading.
//!
//! [`LoadError`] aborts a load. [`RecordError`] describes a single record that
//! was skipped, in full or in part; the load carries on after reporting it.

use std::io;
use std::path::PathBuf;

use kmap::KmapError;
use thiserror::Error;

use crate::position::Position;

/// Fatal errors: nothing from the file is usable.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The map file could not be read.
    #[error("Cannot read map file {}: {source}", path.display())]
    FileAccess {
        /// Path that was opened
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The buffer failed structural validation.
    #[error("Invalid map file: {0}")]
    Schema(#[from] KmapError),
}

/// World-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// A tile already exists at this position.
    #[error("Tile at {0} is already occupied")]
    TileOccupied(Position),
}

/// Non-fatal problems with individual records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The item type id is not in the registry; the item is skipped.
    #[error("Unknown item type {id} at {position}")]
    UnknownItemType {
        /// Item type id
        id: u16,
        /// Tile position
        position: Position,
    },

    /// A moveable item was placed directly on a house tile; the item is skipped.
    #[error("Moveable item {id} inside house {house_id} at {position}")]
    MoveableItemInHouse {
        /// Item type id
        id: u16,
        /// Owning house
        house_id: u32,
        /// Tile position
        position: Position,
    },

    /// Child items were found on an item whose type is not a container; the
    /// item is kept without children.
    #[error("Item {id} at {position} has {children} child items but is not a container")]
    NotAContainer {
        /// Item type id
        id: u16,
        /// Number of child records that were dropped
        children: usize,
        /// Tile position
        position: Position,
    },

    /// Area position plus tile offset does not fit the coordinate range; the
    /// tile is skipped.
    #[error("Tile offset ({x}, {y}) overflows area at {area}")]
    TilePositionOverflow {
        /// Area base position
        area: Position,
        /// X offset
        x: u8,
        /// Y offset
        y: u8,
    },

    /// A second tile record targets an occupied position; the record is skipped.
    #[error("Duplicate tile at {0}")]
    DuplicateTile(Position),

    /// Town id 0 is reserved; the town is skipped.
    #[error("Town \"{name}\" has invalid id 0")]
    InvalidTownId {
        /// Town name
        name: String,
    },

    /// The town id is already registered; the town is skipped.
    #[error("Duplicate town id {id}")]
    DuplicateTown {
        /// Town id
        id: u32,
    },

    /// The town has no name; it is still registered.
    #[error("Town {id} has an empty name")]
    EmptyTownName {
        /// Town id
        id: u32,
    },

    /// The temple position has a zero axis; the town stays registered
    /// without a temple position.
    #[error("Town {id} has invalid temple position {position}")]
    InvalidTemplePosition {
        /// Town id
        id: u32,
        /// Position from the file
        position: Position,
    },

    /// The waypoint has no name or a zero axis; it is skipped.
    #[error("Invalid waypoint \"{name}\" at {position}")]
    InvalidWaypoint {
        /// Waypoint name
        name: String,
        /// Position from the file
        position: Position,
    },
}

impl RecordError {
    /// Level the error is logged at
    pub fn level(&self) -> log::Level {
        match self {
            Self::UnknownItemType { .. }
            | Self::MoveableItemInHouse { .. }
            | Self::EmptyTownName { .. }
            | Self::InvalidWaypoint { .. } => log::Level::Warn,
            Self::NotAContainer { .. }
            | Self::TilePositionOverflow { .. }
            | Self::DuplicateTile(_)
            | Self::InvalidTownId { .. }
            | Self::DuplicateTown { .. }
            | Self::InvalidTemplePosition { .. } => log::Level::Error,
        }
    }

    /// Whether data from the file was left out of the world
    ///
    /// False for problems the record is still registered with: an empty town
    /// name, or a temple position that was not applied.
    pub fn skips_record(&self) -> bool {
        !matches!(
            self,
            Self::EmptyTownName { .. } | Self::InvalidTemplePosition { .. }
        )
    }
}
