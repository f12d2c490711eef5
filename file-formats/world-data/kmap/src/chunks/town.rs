//! Town and waypoint records (`TOWN` and `WAYP` chunks)
//!
//! Both chunks are a `count:u32` followed by that many records.

use binrw::binrw;

use super::Position;
use super::string::{parse_string, write_string};

/// A town with its temple position
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TownRecord {
    /// Town id (0 is invalid)
    pub id: u32,

    /// Display name
    #[br(parse_with = parse_string)]
    #[bw(write_with = write_string)]
    pub name: String,

    /// Temple position
    pub position: Position,
}

impl TownRecord {
    /// Create a town record
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            position,
        }
    }
}

/// A named point of interest
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WaypointRecord {
    /// Waypoint name
    #[br(parse_with = parse_string)]
    #[bw(write_with = write_string)]
    pub name: String,

    /// Waypoint position
    pub position: Position,
}

impl WaypointRecord {
    /// Create a waypoint record
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}
