//! Multi-grid containers and the equipment slots an agent carries them in.

use super::{Grid, LootId};

/// A lootable container (or worn rig/backpack) made of one or more grids.
///
/// Grid order is the container's own layout order; packing never reorders
/// the stored grids, only their contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    pub id: LootId,
    grids: Vec<Grid>,
}

impl Container {
    pub fn new(id: LootId, grids: Vec<Grid>) -> Self {
        Self { id, grids }
    }

    pub fn grids(&self) -> &[Grid] {
        &self.grids
    }

    pub fn grids_mut(&mut self) -> &mut [Grid] {
        &mut self.grids
    }

    pub fn grid(&self, index: usize) -> Option<&Grid> {
        self.grids.get(index)
    }

    /// Sum of `height × width` over every grid.
    pub fn total_area(&self) -> u32 {
        self.grids.iter().map(Grid::area).sum()
    }

    pub fn free_cells(&self) -> u32 {
        self.grids.iter().map(Grid::free_cells).sum()
    }

    pub fn item_count(&self) -> usize {
        self.grids.iter().map(|grid| grid.items().len()).sum()
    }
}

/// Equipment slots that hold searchable containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum EquipmentSlot {
    TacticalVest,
    Backpack,
    Pockets,
    SecuredContainer,
}

/// The containers an agent is wearing. Any slot may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Equipment {
    vest: Option<Container>,
    backpack: Option<Container>,
    pockets: Option<Container>,
    secured: Option<Container>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_slot(mut self, slot: EquipmentSlot, container: Container) -> Self {
        *self.slot_entry(slot) = Some(container);
        self
    }

    pub fn slot(&self, slot: EquipmentSlot) -> Option<&Container> {
        match slot {
            EquipmentSlot::TacticalVest => self.vest.as_ref(),
            EquipmentSlot::Backpack => self.backpack.as_ref(),
            EquipmentSlot::Pockets => self.pockets.as_ref(),
            EquipmentSlot::SecuredContainer => self.secured.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: EquipmentSlot) -> Option<&mut Container> {
        self.slot_entry(slot).as_mut()
    }

    /// Removes and returns whatever is equipped in `slot`.
    pub fn take_slot(&mut self, slot: EquipmentSlot) -> Option<Container> {
        self.slot_entry(slot).take()
    }

    fn slot_entry(&mut self, slot: EquipmentSlot) -> &mut Option<Container> {
        match slot {
            EquipmentSlot::TacticalVest => &mut self.vest,
            EquipmentSlot::Backpack => &mut self.backpack,
            EquipmentSlot::Pockets => &mut self.pockets,
            EquipmentSlot::SecuredContainer => &mut self.secured,
        }
    }

    /// Free cells across every equipped container.
    pub fn free_cells(&self) -> u32 {
        [&self.vest, &self.backpack, &self.pockets, &self.secured]
            .into_iter()
            .flatten()
            .map(Container::free_cells)
            .sum()
    }
}
