//! Item type definitions and the registry the loader resolves ids against

use std::collections::HashMap;

use bitflags::bitflags;

bitflags! {
    /// Capabilities of an item type that affect map loading
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
    pub struct ItemFlags: u32 {
        /// Occupies the ground slot of a tile
        const GROUND          = 0x0000_0001;
        /// Creatures cannot walk onto a tile holding this item
        const BLOCKS_MOVEMENT = 0x0000_0002;
        /// Players can pick up or push the item
        const MOVEABLE        = 0x0000_0004;
        /// Can hold other items
        const CONTAINER       = 0x0000_0008;
    }
}

/// Static description of an item type
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemType {
    /// Type id, as referenced by map item records
    pub id: u16,

    /// Display name
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,

    /// Capability flags
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: ItemFlags,

    /// Seconds until the item decays, 0 when it never decays
    #[cfg_attr(feature = "serde", serde(default))]
    pub decay_time: u32,
}

impl ItemType {
    /// Create an item type without capabilities
    #[must_use]
    pub fn new(id: u16, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the capability flags
    #[must_use]
    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the decay time in seconds
    #[must_use]
    pub fn with_decay_time(mut self, seconds: u32) -> Self {
        self.decay_time = seconds;
        self
    }

    /// Whether the type occupies the ground slot
    pub fn is_ground(&self) -> bool {
        self.flags.contains(ItemFlags::GROUND)
    }

    /// Whether the type blocks movement
    pub fn blocks_movement(&self) -> bool {
        self.flags.contains(ItemFlags::BLOCKS_MOVEMENT)
    }

    /// Whether the type is moveable
    pub fn is_moveable(&self) -> bool {
        self.flags.contains(ItemFlags::MOVEABLE)
    }

    /// Whether the type is a container
    pub fn is_container(&self) -> bool {
        self.flags.contains(ItemFlags::CONTAINER)
    }
}

/// Lookup of item types by id
///
/// The loader only needs read access; servers typically back this with the
/// table parsed from their item definition files.
pub trait ItemTypeRegistry {
    /// The type registered for `id`, or `None` when the id is unknown
    fn item_type(&self, id: u16) -> Option<&ItemType>;
}

/// Map-backed [`ItemTypeRegistry`]
#[derive(Debug, Clone, Default)]
pub struct ItemTypes {
    types: HashMap<u16, ItemType>,
}

impl ItemTypes {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type, returning the one it replaced
    pub fn insert(&mut self, item_type: ItemType) -> Option<ItemType> {
        self.types.insert(item_type.id, item_type)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterate over registered types in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &ItemType> {
        self.types.values()
    }

    /// Parse a JSON array of item types
    ///
    /// ```
    /// use kmap_world::{ItemFlags, ItemTypeRegistry, ItemTypes};
    ///
    /// let types = ItemTypes::from_json(
    ///     r#"[{ "id": 100, "name": "grass", "flags": "GROUND" }]"#,
    /// ).unwrap();
    ///
    /// assert_eq!(types.item_type(100).unwrap().flags, ItemFlags::GROUND);
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let types: Vec<ItemType> = serde_json::from_str(json)?;
        Ok(types.into_iter().collect())
    }

    /// Parse a JSON array of item types from a reader
    #[cfg(feature = "serde")]
    pub fn from_reader<R: std::io::Read>(reader: R) -> serde_json::Result<Self> {
        let types: Vec<ItemType> = serde_json::from_reader(reader)?;
        Ok(types.into_iter().collect())
    }
}

impl ItemTypeRegistry for ItemTypes {
    fn item_type(&self, id: u16) -> Option<&ItemType> {
        self.types.get(&id)
    }
}

impl FromIterator<ItemType> for ItemTypes {
    fn from_iter<I: IntoIterator<Item = ItemType>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().map(|t| (t.id, t)).collect(),
        }
    }
}

impl Extend<ItemType> for ItemTypes {
    fn extend<I: IntoIterator<Item = ItemType>>(&mut self, iter: I) {
        self.types.extend(iter.into_iter().map(|t| (t.id, t)));
    }
}
