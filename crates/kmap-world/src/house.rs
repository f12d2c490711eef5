//! Houses and the registry that owns them

use std::collections::HashMap;

use crate::position::Position;

/// A house and the positions of the tiles that belong to it
///
/// Tiles are owned by the world; a house only refers to them by position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct House {
    id: u32,
    tiles: Vec<Position>,
}

impl House {
    /// Create a house without tiles
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self {
            id,
            tiles: Vec::new(),
        }
    }

    /// House id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Positions of the house tiles, in the order they were linked
    pub fn tiles(&self) -> &[Position] {
        &self.tiles
    }

    /// Link the tile at `position` to this house
    pub fn add_tile(&mut self, position: Position) {
        self.tiles.push(position);
    }
}

/// House registry keyed by id
#[derive(Debug, Clone, Default)]
pub struct Houses {
    houses: HashMap<u32, House>,
}

impl Houses {
    /// Return the house with `id`, creating it when absent
    pub fn add_house(&mut self, id: u32) -> &mut House {
        self.houses.entry(id).or_insert_with(|| House::new(id))
    }

    /// Look up a house
    pub fn get(&self, id: u32) -> Option<&House> {
        self.houses.get(&id)
    }

    /// Number of houses
    pub fn len(&self) -> usize {
        self.houses.len()
    }

    /// Whether no house is registered
    pub fn is_empty(&self) -> bool {
        self.houses.is_empty()
    }

    /// Iterate over houses in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &House> {
        self.houses.values()
    }
}
