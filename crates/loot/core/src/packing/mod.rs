//! Inventory grid packing.
//!
//! [`repack`] reorganizes an opened container in place; [`pick_up`] chooses
//! where a newly taken item goes inside an agent's equipment.
mod error;
mod prioritize;
mod repack;

pub use error::PackingError;
pub use prioritize::{
    GridRef, ItemAddress, RESERVED_AMMO_CELLS, find_grid_to_pick_up, pick_up, prioritize,
    reserve_ammo_slot, slot_order, sort_grids_by_area,
};
pub use repack::{PackingPlan, Placement, repack};
