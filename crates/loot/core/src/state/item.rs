//! Item types carried in grids or lying loose in the world.

use bitflags::bitflags;

use super::ItemId;

/// Broad item class driving grid priority on pickup.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ItemCategory {
    Ammo,
    Magazine,
    Grenade,
    Key,
    #[default]
    Generic,
}

impl ItemCategory {
    /// Loose rounds and magazines share the vest-first placement order.
    pub const fn is_ammunition(self) -> bool {
        matches!(self, Self::Ammo | Self::Magazine)
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ItemFlags: u8 {
        /// Quest items are never picked up by agents.
        const QUEST          = 1 << 0;
        /// Keys that break after one use.
        const SINGLE_USE_KEY = 1 << 1;
    }
}

/// An item instance with its cell footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub width: u8,
    pub height: u8,
    pub category: ItemCategory,
    pub flags: ItemFlags,
    /// Trade value, compared against the configured minimum.
    pub value: u32,
}

impl Item {
    pub const fn new(id: ItemId, width: u8, height: u8) -> Self {
        Self {
            id,
            width,
            height,
            category: ItemCategory::Generic,
            flags: ItemFlags::empty(),
            value: 0,
        }
    }

    #[must_use]
    pub const fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub const fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    /// Footprint in cells.
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    pub const fn is_quest_item(&self) -> bool {
        self.flags.contains(ItemFlags::QUEST)
    }

    pub const fn is_single_use_key(&self) -> bool {
        self.flags.contains(ItemFlags::SINGLE_USE_KEY)
    }
}
