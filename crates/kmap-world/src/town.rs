//! Towns and the town registry

use std::collections::HashMap;

use crate::position::Position;

/// A town
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Town {
    id: u32,
    name: String,
    temple_position: Option<Position>,
}

impl Town {
    /// Create a town without a temple position
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            temple_position: None,
        }
    }

    /// Town id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Temple position, `None` while unset
    pub fn temple_position(&self) -> Option<Position> {
        self.temple_position
    }

    /// Set the temple position
    pub fn set_temple_position(&mut self, position: Position) {
        self.temple_position = Some(position);
    }
}

/// Town registry keyed by id
#[derive(Debug, Clone, Default)]
pub struct Towns {
    towns: HashMap<u32, Town>,
}

impl Towns {
    /// Register a town; returns `false` and drops it when the id is taken
    pub fn add_town(&mut self, town: Town) -> bool {
        match self.towns.entry(town.id) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(town);
                true
            }
        }
    }

    /// Look up a town
    pub fn get(&self, id: u32) -> Option<&Town> {
        self.towns.get(&id)
    }

    /// Look up a town for modification
    pub fn get_mut(&mut self, id: u32) -> Option<&mut Town> {
        self.towns.get_mut(&id)
    }

    /// Find a town by exact name
    pub fn find_by_name(&self, name: &str) -> Option<&Town> {
        self.towns.values().find(|town| town.name == name)
    }

    /// Number of towns
    pub fn len(&self) -> usize {
        self.towns.len()
    }

    /// Whether no town is registered
    pub fn is_empty(&self) -> bool {
        self.towns.is_empty()
    }

    /// Iterate over towns in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &Town> {
        self.towns.values()
    }
}
