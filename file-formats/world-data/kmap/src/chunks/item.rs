//! Item records, including nested container contents

use binrw::{BinRead, BinWrite, binrw};

use super::Position;
use super::string::{parse_string, write_string};

/// Presence bit: an [`ItemAttributes`] block follows the item id
const HAS_ATTRIBUTES: u8 = 0x01;

/// Presence bit: an [`ItemDetails`] block follows the attributes
const HAS_DETAILS: u8 = 0x02;

/// Deepest container nesting accepted when decoding; top-level items sit at depth 0
pub const MAX_ITEM_DEPTH: u16 = 64;

const fn presence_bits(has_attributes: bool, has_details: bool) -> u8 {
    let mut bits = 0;
    if has_attributes {
        bits |= HAS_ATTRIBUTES;
    }
    if has_details {
        bits |= HAS_DETAILS;
    }
    bits
}

/// An item placed on the map
///
/// ```text
/// Field      | Size | Notes
/// -----------|------|-------------------------------------------
/// id         |  2   | item type id
/// presence   |  1   | 0x01 = attributes follow, 0x02 = details follow
/// attributes |  var | optional ItemAttributes
/// details    |  var | optional ItemDetails (may nest further items)
/// ```
///
/// Decoding takes the nesting depth as its argument and fails once it exceeds
/// [`MAX_ITEM_DEPTH`].
#[binrw]
#[brw(little)]
#[br(import(depth: u16))]
#[br(pre_assert(
    depth <= MAX_ITEM_DEPTH,
    "container nesting exceeds {} levels",
    MAX_ITEM_DEPTH
))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemRecord {
    /// Item type id
    pub id: u16,

    #[br(temp)]
    #[bw(calc = presence_bits(attributes.is_some(), details.is_some()))]
    presence: u8,

    /// Per-instance attributes
    #[br(if((presence & HAS_ATTRIBUTES) != 0))]
    pub attributes: Option<ItemAttributes>,

    /// Type-specific details (depot, door, teleport, container contents)
    #[br(if((presence & HAS_DETAILS) != 0), args(depth))]
    pub details: Option<ItemDetails>,
}

impl ItemRecord {
    /// Create a bare item record of the given type
    #[must_use]
    pub fn new(id: u16) -> Self {
        Self {
            id,
            attributes: None,
            details: None,
        }
    }

    /// Set the attributes block
    #[must_use]
    pub fn with_attributes(mut self, attributes: ItemAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Set the details block
    #[must_use]
    pub fn with_details(mut self, details: ItemDetails) -> Self {
        self.details = Some(details);
        self
    }

    /// Append a nested item, creating the details block if needed
    #[must_use]
    pub fn with_child(mut self, child: ItemRecord) -> Self {
        self.details
            .get_or_insert_with(ItemDetails::default)
            .container_items
            .push(child);
        self
    }

    /// Nested items, empty when the record carries none
    #[must_use]
    pub fn container_items(&self) -> &[ItemRecord] {
        self.details
            .as_ref()
            .map_or(&[], |details| details.container_items.as_slice())
    }
}

/// Per-instance item attributes
#[binrw]
#[brw(little)]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemAttributes {
    /// Stack count or charges
    pub count: u16,

    /// Free-form description text
    #[br(parse_with = parse_string)]
    #[bw(write_with = write_string)]
    pub description: String,

    #[br(temp)]
    #[bw(calc = u8::from(action.is_some()))]
    has_action: u8,

    /// Script hooks
    #[br(if(has_action != 0))]
    pub action: Option<ActionIds>,
}

/// Script identifiers attached to an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, BinRead, BinWrite)]
#[brw(little)]
pub struct ActionIds {
    /// Action id
    pub action_id: u16,
    /// Unique id
    pub unique_id: u16,
}

/// Type-specific item details
///
/// ```text
/// Field        | Size | Notes
/// -------------|------|------------------------------
/// depot_id     |  2   |
/// door_id      |  1   |
/// has_teleport |  1   | non-zero if a Position follows
/// teleport     |  5   | optional destination
/// child_count  |  2   |
/// children     |  var | child_count ItemRecords
/// ```
#[binrw]
#[brw(little)]
#[br(import(depth: u16))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemDetails {
    /// Depot id (0 = none)
    pub depot_id: u16,

    /// House door id (0 = none)
    pub door_id: u8,

    #[br(temp)]
    #[bw(calc = u8::from(teleport.is_some()))]
    has_teleport: u8,

    /// Teleport destination
    #[br(if(has_teleport != 0))]
    pub teleport: Option<Position>,

    #[br(temp)]
    #[bw(try_calc = u16::try_from(container_items.len()))]
    child_count: u16,

    /// Items stored inside this item
    #[br(count = child_count, args { inner: (depth + 1,) })]
    pub container_items: Vec<ItemRecord>,
}
