//! Loot discovery, claiming and inventory packing for autonomous agents.
//!
//! `loot-core` holds the rules shared by every host: how an agent picks the
//! next object worth looting ([`scan`]), how concurrent agents avoid chasing
//! the same object ([`ClaimCache`]), and how items are laid out in grid
//! inventories ([`packing`]). The host world is reached only through the
//! oracle traits in [`env`], so the logic here performs no I/O and no logging.
pub mod claims;
pub mod config;
pub mod env;
pub mod error;
pub mod packing;
pub mod scan;
pub mod state;

pub use claims::{ClaimCache, ClaimError};
pub use config::{CorpseAwareness, DestinationTuning, DetectionRanges, LootConfig};
pub use env::{
    ColliderBuffer, ConfigOracle, EligibilityOracle, Env, LootEnv, NavigationOracle,
    WorldQueryOracle,
};
pub use error::{ErrorSeverity, LootError};
pub use packing::{
    GridRef, ItemAddress, PackingError, PackingPlan, Placement, find_grid_to_pick_up, pick_up,
    prioritize, repack,
};
pub use scan::{Candidate, Rejections, ScanReport, find_target, resolve_destination, scan};
pub use state::{
    ActiveTarget, AgentId, AgentRole, AgentState, Bounds, Collider, ColliderHandle, Container,
    ContainerInfo, CorpseInfo, Equipment, EquipmentSlot, Grid, GridError, GridOffset, Item,
    ItemCategory, ItemFlags, ItemId, LootId, LootKind, LootObject, LooseItem, PlacedItem, RoleSet,
    Vec3,
};
