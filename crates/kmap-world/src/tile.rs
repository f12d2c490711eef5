//! Tiles and their variants

use bitflags::bitflags;

use crate::item::Item;
use crate::position::Position;

bitflags! {
    /// Server-side tile state bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct TileFlags: u32 {
        /// Protection zone, no combat
        const PROTECTION_ZONE = 1 << 0;
        /// No player-versus-player combat
        const NO_PVP_ZONE     = 1 << 2;
        /// Players cannot log out here
        const NO_LOGOUT       = 1 << 3;
        /// Player-versus-player without penalties
        const PVP_ZONE        = 1 << 4;
    }
}

/// Tile variant, fixed when the tile is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TileKind {
    /// Terrain that cannot be altered at runtime
    Static,
    /// Freely modifiable tile
    Dynamic,
    /// Tile belonging to the house with the given id
    House(u32),
}

/// A single map tile
///
/// The ground slot is kept apart from the stacked items; [`Tile::contents`]
/// yields the ground first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tile {
    position: Position,
    kind: TileKind,
    ground: Option<Item>,
    items: Vec<Item>,
    flags: TileFlags,
}

impl Tile {
    /// Create a tile, attaching `ground` by construction
    #[must_use]
    pub fn new(position: Position, kind: TileKind, ground: Option<Item>) -> Self {
        Self {
            position,
            kind,
            ground,
            items: Vec::new(),
            flags: TileFlags::empty(),
        }
    }

    /// Tile position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Tile variant
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Ground item
    pub fn ground(&self) -> Option<&Item> {
        self.ground.as_ref()
    }

    /// Items stacked on the ground, in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Ground first, then the stacked items
    pub fn contents(&self) -> impl Iterator<Item = &Item> {
        self.ground.iter().chain(self.items.iter())
    }

    /// Number of items including the ground
    pub fn item_count(&self) -> usize {
        usize::from(self.ground.is_some()) + self.items.len()
    }

    /// Add an item
    ///
    /// A ground item fills the ground slot while it is empty. Every other item,
    /// including further ground items, is stacked in insertion order.
    pub fn add_item(&mut self, item: Item) {
        if item.is_ground() && self.ground.is_none() {
            self.ground = Some(item);
        } else {
            self.items.push(item);
        }
    }

    /// State bits
    pub fn flags(&self) -> TileFlags {
        self.flags
    }

    /// Set state bits, keeping the ones already set
    pub fn set_flags(&mut self, flags: TileFlags) {
        self.flags |= flags;
    }

    /// Whether any item on the tile blocks movement
    pub fn blocks_movement(&self) -> bool {
        self.contents().any(Item::blocks_movement)
    }

    /// Owning house id for house tiles
    pub fn house_id(&self) -> Option<u32> {
        match self.kind {
            TileKind::House(id) => Some(id),
            TileKind::Static | TileKind::Dynamic => None,
        }
    }

    /// Whether the tile is a static tile
    pub fn is_static(&self) -> bool {
        self.kind == TileKind::Static
    }

    /// Whether the tile belongs to a house
    pub fn is_house_tile(&self) -> bool {
        matches!(self.kind, TileKind::House(_))
    }
}
