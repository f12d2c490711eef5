//! Item instances placed in the world

use kmap::chunks::ItemRecord;

use crate::item_type::{ItemFlags, ItemType};
use crate::position::Position;

/// Per-instance values carried over from the map file
///
/// These are copied through without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ItemAttributes {
    /// Stack count or charges
    pub count: u16,
    /// Free-form description text
    pub description: String,
    /// Script action id
    pub action_id: u16,
    /// Script unique id
    pub unique_id: u16,
    /// Depot id
    pub depot_id: u16,
    /// House door id
    pub door_id: u8,
    /// Teleport destination
    pub teleport: Option<Position>,
}

impl From<&ItemRecord> for ItemAttributes {
    fn from(record: &ItemRecord) -> Self {
        let mut attributes = Self::default();

        if let Some(decoded) = &record.attributes {
            attributes.count = decoded.count;
            attributes.description.clone_from(&decoded.description);
            if let Some(action) = decoded.action {
                attributes.action_id = action.action_id;
                attributes.unique_id = action.unique_id;
            }
        }

        if let Some(details) = &record.details {
            attributes.depot_id = details.depot_id;
            attributes.door_id = details.door_id;
            attributes.teleport = details.teleport.map(Position::from);
        }

        attributes
    }
}

/// An item instance
///
/// Container items exclusively own their children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Item {
    id: u16,
    flags: ItemFlags,
    decay_time: u32,
    attributes: ItemAttributes,
    children: Vec<Item>,
    loaded_from_map: bool,
    decaying: bool,
}

impl Item {
    /// Create an item of the given type
    #[must_use]
    pub fn new(item_type: &ItemType) -> Self {
        Self {
            id: item_type.id,
            flags: item_type.flags,
            decay_time: item_type.decay_time,
            attributes: ItemAttributes::default(),
            children: Vec::new(),
            loaded_from_map: false,
            decaying: false,
        }
    }

    /// Item type id
    pub fn id(&self) -> u16 {
        self.id
    }

    /// Capability flags inherited from the item type
    pub fn flags(&self) -> ItemFlags {
        self.flags
    }

    /// Whether the item occupies the ground slot
    pub fn is_ground(&self) -> bool {
        self.flags.contains(ItemFlags::GROUND)
    }

    /// Whether the item blocks movement
    pub fn blocks_movement(&self) -> bool {
        self.flags.contains(ItemFlags::BLOCKS_MOVEMENT)
    }

    /// Whether the item is moveable
    pub fn is_moveable(&self) -> bool {
        self.flags.contains(ItemFlags::MOVEABLE)
    }

    /// Whether the item can hold other items
    pub fn is_container(&self) -> bool {
        self.flags.contains(ItemFlags::CONTAINER)
    }

    /// Per-instance attributes
    pub fn attributes(&self) -> &ItemAttributes {
        &self.attributes
    }

    /// Replace the per-instance attributes
    pub fn set_attributes(&mut self, attributes: ItemAttributes) {
        self.attributes = attributes;
    }

    /// Items held by this container, in insertion order
    pub fn children(&self) -> &[Item] {
        &self.children
    }

    /// Put `child` inside this item
    ///
    /// Callers are responsible for checking [`Item::is_container`] first.
    pub fn add_child(&mut self, child: Item) {
        self.children.push(child);
    }

    /// Whether the item was placed by the map file
    pub fn is_loaded_from_map(&self) -> bool {
        self.loaded_from_map
    }

    /// Mark the item as placed by the map file
    pub fn set_loaded_from_map(&mut self, loaded: bool) {
        self.loaded_from_map = loaded;
    }

    /// Seconds until decay, 0 when the type never decays
    pub fn decay_time(&self) -> u32 {
        self.decay_time
    }

    /// Arm the decay timer; returns whether the item is now decaying
    pub fn start_decaying(&mut self) -> bool {
        if self.decay_time > 0 {
            self.decaying = true;
        }
        self.decaying
    }

    /// Whether the decay timer is armed
    pub fn is_decaying(&self) -> bool {
        self.decaying
    }
}
