//! In-place repacking of an opened container.
//!
//! Items are taken out of every grid, sorted largest first (wider first among
//! equal areas), and re-inserted
//! into the container's grids taken smallest first, each item going to the
//! first grid with room (first-fit-decreasing). Large grids stay available
//! for large items. Category-aware ordering is deliberately not applied here;
//! it only matters when choosing where a newly picked-up item lands.
//!
//! Grids are mutated live. A snapshot of every grid is taken first and
//! replayed if any item fails to place, so callers only ever observe the old
//! layout or the complete new one.

use std::cmp::Reverse;

use crate::state::{Container, Grid, GridOffset, ItemId, PlacedItem};

use super::{PackingError, sort_grids_by_area};

/// One item's position in the new layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub item: ItemId,
    /// Index into the container's grid list.
    pub grid: usize,
    pub offset: GridOffset,
}

/// The layout produced by a successful repack, already applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackingPlan {
    placements: Vec<Placement>,
}

impl PackingPlan {
    /// Placements in insertion order (largest item first).
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement_of(&self, item: ItemId) -> Option<&Placement> {
        self.placements
            .iter()
            .find(|placement| placement.item == item)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Undo log holding each grid's contents before the repack.
struct LayoutSnapshot {
    grids: Vec<Vec<PlacedItem>>,
}

impl LayoutSnapshot {
    fn capture(grids: &[Grid]) -> Self {
        Self {
            grids: grids.iter().map(|grid| grid.items().to_vec()).collect(),
        }
    }

    fn restore(self, grids: &mut [Grid]) {
        for (grid, layout) in grids.iter_mut().zip(self.grids) {
            grid.restore(layout);
        }
    }
}

/// Repacks `container` with first-fit-decreasing.
///
/// # Errors
///
/// - `PackingError::NoContainer` when `container` is `None`; nothing is touched.
/// - `PackingError::Unplaceable` naming the first item that found no room;
///   every grid is restored to its exact prior layout.
pub fn repack(container: Option<&mut Container>) -> Result<PackingPlan, PackingError> {
    let container = container.ok_or(PackingError::NoContainer)?;
    let grids = container.grids_mut();

    let snapshot = LayoutSnapshot::capture(grids);
    let order = sort_grids_by_area(grids);

    // Collected in placement order so a settled layout collects in the same
    // sequence it was built from.
    let mut items: Vec<_> = order
        .iter()
        .flat_map(|&index| grids[index].remove_all())
        .map(|placed| placed.item)
        .collect();

    // Stable: equal footprints of the same shape keep their collection order.
    items.sort_by_key(|item| Reverse((item.area(), item.width)));

    let mut placements = Vec::with_capacity(items.len());
    for item in items {
        let placed = order
            .iter()
            .find_map(|&index| grids[index].add(item).map(|offset| (index, offset)));

        match placed {
            Some((grid, offset)) => placements.push(Placement {
                item: item.id,
                grid,
                offset,
            }),
            None => {
                snapshot.restore(grids);
                return Err(PackingError::Unplaceable { item: item.id });
            }
        }
    }

    Ok(PackingPlan { placements })
}
