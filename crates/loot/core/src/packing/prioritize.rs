//! Grid ordering for items picked up into an agent's equipment.

use crate::state::{Equipment, EquipmentSlot, Grid, GridOffset, Item, ItemCategory};

use super::PackingError;

/// Cells withheld in the vest for magazines refilled later.
pub const RESERVED_AMMO_CELLS: u32 = 2;

/// A grid inside one of the equipment slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridRef {
    pub slot: EquipmentSlot,
    /// Index into the slot container's grid list.
    pub index: usize,
}

/// Where an item landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemAddress {
    pub grid: GridRef,
    pub offset: GridOffset,
}

/// Indices of `grids`, smallest area first. Equal areas keep layout order.
pub fn sort_grids_by_area(grids: &[Grid]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..grids.len()).collect();
    order.sort_by_key(|&index| grids[index].area());
    order
}

/// Removes the first grid in `order` that can take a 2-cell magazine and
/// returns its index.
pub fn reserve_ammo_slot(grids: &[Grid], order: &mut Vec<usize>) -> Option<usize> {
    let position = order.iter().position(|&index| {
        let grid = &grids[index];
        grid.area() >= RESERVED_AMMO_CELLS && grid.free_cells() >= RESERVED_AMMO_CELLS
    })?;
    Some(order.remove(position))
}

/// Slot preference for an item category.
pub const fn slot_order(category: ItemCategory) -> [EquipmentSlot; 4] {
    use EquipmentSlot::*;
    match category {
        _ if category.is_ammunition() => [TacticalVest, Pockets, Backpack, SecuredContainer],
        ItemCategory::Grenade => [Pockets, TacticalVest, Backpack, SecuredContainer],
        _ => [Backpack, TacticalVest, Pockets, SecuredContainer],
    }
}

/// Grids to try, in order, when `item` is picked up.
///
/// Each slot contributes its grids smallest first; the vest always holds one
/// magazine-sized grid back. Empty slots contribute nothing.
pub fn prioritize(equipment: &Equipment, item: &Item) -> Vec<GridRef> {
    let mut prioritized = Vec::new();
    for slot in slot_order(item.category) {
        let Some(container) = equipment.slot(slot) else {
            continue;
        };
        let grids = container.grids();
        let mut order = sort_grids_by_area(grids);
        if slot == EquipmentSlot::TacticalVest {
            reserve_ammo_slot(grids, &mut order);
        }
        prioritized.extend(order.into_iter().map(|index| GridRef { slot, index }));
    }
    prioritized
}

/// First free address for `item` across the prioritized grids.
pub fn find_grid_to_pick_up(equipment: &Equipment, item: &Item) -> Option<ItemAddress> {
    prioritize(equipment, item).into_iter().find_map(|grid| {
        let offset = equipment
            .slot(grid.slot)?
            .grid(grid.index)?
            .find_free_space(item)?;
        Some(ItemAddress { grid, offset })
    })
}

/// Places `item` into the best grid of `equipment`.
///
/// # Errors
///
/// Returns `PackingError::NoSpace` when no prioritized grid has room.
pub fn pick_up(equipment: &mut Equipment, item: Item) -> Result<ItemAddress, PackingError> {
    let address =
        find_grid_to_pick_up(equipment, &item).ok_or(PackingError::NoSpace { item: item.id })?;
    let grid = equipment
        .slot_mut(address.grid.slot)
        .and_then(|container| container.grids_mut().get_mut(address.grid.index))
        .ok_or(PackingError::NoSpace { item: item.id })?;
    grid.place(item, address.offset)?;
    Ok(address)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Container, ItemId, LootId};

    fn container(id: u64, sizes: &[(u8, u8)]) -> Container {
        Container::new(
            LootId(id),
            sizes.iter().map(|&(w, h)| Grid::new(w, h)).collect(),
        )
    }

    fn full_kit() -> Equipment {
        Equipment::new()
            // areas 4, 1, 2
            .with_slot(EquipmentSlot::TacticalVest, container(1, &[(2, 2), (1, 1), (1, 2)]))
            .with_slot(EquipmentSlot::Pockets, container(2, &[(1, 1), (1, 1)]))
            .with_slot(EquipmentSlot::Backpack, container(3, &[(4, 4), (2, 3)]))
            .with_slot(EquipmentSlot::SecuredContainer, container(4, &[(2, 2)]))
    }

    fn refs(slot: EquipmentSlot, indices: &[usize]) -> Vec<GridRef> {
        indices.iter().map(|&index| GridRef { slot, index }).collect()
    }

    #[test]
    fn ammunition_prefers_vest_then_pockets_with_reserved_vest_grid() {
        let item = Item::new(ItemId(1), 1, 1).with_category(ItemCategory::Ammo);
        let order = prioritize(&full_kit(), &item);

        // Vest sorted is [1, 2, 0]; grid 2 is the first with two free cells.
        let mut expected = refs(EquipmentSlot::TacticalVest, &[1, 0]);
        expected.extend(refs(EquipmentSlot::Pockets, &[0, 1]));
        expected.extend(refs(EquipmentSlot::Backpack, &[1, 0]));
        expected.extend(refs(EquipmentSlot::SecuredContainer, &[0]));
        assert_eq!(order, expected);
    }

    #[test]
    fn slot_order_by_category() {
        use EquipmentSlot::*;
        for category in [ItemCategory::Ammo, ItemCategory::Magazine] {
            assert_eq!(slot_order(category), [TacticalVest, Pockets, Backpack, SecuredContainer]);
        }
        assert_eq!(
            slot_order(ItemCategory::Grenade),
            [Pockets, TacticalVest, Backpack, SecuredContainer]
        );
        for category in [ItemCategory::Key, ItemCategory::Generic] {
            assert_eq!(slot_order(category), [Backpack, TacticalVest, Pockets, SecuredContainer]);
        }
    }

    #[test]
    fn grenades_prefer_pockets() {
        let item = Item::new(ItemId(1), 1, 1).with_category(ItemCategory::Grenade);
        let order = prioritize(&full_kit(), &item);
        assert_eq!(order[0].slot, EquipmentSlot::Pockets);
        assert_eq!(order[2].slot, EquipmentSlot::TacticalVest);
    }

    #[test]
    fn generic_items_prefer_backpack() {
        let item = Item::new(ItemId(1), 1, 1);
        let order = prioritize(&full_kit(), &item);
        assert_eq!(&order[..2], refs(EquipmentSlot::Backpack, &[1, 0]).as_slice());
        assert_eq!(order.last().map(|grid| grid.slot), Some(EquipmentSlot::SecuredContainer));
    }

    #[test]
    fn missing_slots_contribute_nothing() {
        let equipment =
            Equipment::new().with_slot(EquipmentSlot::Pockets, container(2, &[(1, 1)]));
        let item = Item::new(ItemId(1), 1, 1).with_category(ItemCategory::Magazine);
        assert_eq!(prioritize(&equipment, &item), refs(EquipmentSlot::Pockets, &[0]));
        assert!(prioritize(&Equipment::new(), &item).is_empty());
    }

    #[test]
    fn no_reservation_when_vest_is_too_full() {
        let mut vest = container(1, &[(1, 1), (1, 2)]);
        vest.grids_mut()[1]
            .place(Item::new(ItemId(9), 1, 1), GridOffset::ORIGIN)
            .unwrap();
        let equipment = Equipment::new().with_slot(EquipmentSlot::TacticalVest, vest);
        let item = Item::new(ItemId(1), 1, 1).with_category(ItemCategory::Ammo);

        assert_eq!(prioritize(&equipment, &item), refs(EquipmentSlot::TacticalVest, &[0, 1]));
    }

    #[test]
    fn pick_up_places_into_first_fitting_grid() {
        let mut equipment = full_kit();
        let rifle = Item::new(ItemId(5), 2, 3);

        let address = pick_up(&mut equipment, rifle).unwrap();

        assert_eq!(
            address.grid,
            GridRef {
                slot: EquipmentSlot::Backpack,
                index: 1
            }
        );
        let backpack = equipment.slot(EquipmentSlot::Backpack).unwrap();
        assert_eq!(backpack.grids()[1].offset_of(ItemId(5)), Some(GridOffset::ORIGIN));
    }

    #[test]
    fn pick_up_without_room_fails_untouched() {
        let mut equipment =
            Equipment::new().with_slot(EquipmentSlot::Pockets, container(2, &[(1, 1)]));
        let before = equipment.clone();

        let err = pick_up(&mut equipment, Item::new(ItemId(5), 2, 1)).unwrap_err();

        assert_eq!(err, PackingError::NoSpace { item: ItemId(5) });
        assert_eq!(equipment, before);
    }
}
