//! Data model shared by the scanner and the packing engine.
mod agent;
mod common;
mod container;
mod grid;
mod item;
mod loot;

pub use agent::{ActiveTarget, AgentRole, AgentState, RoleSet};
pub use common::{AgentId, Bounds, ItemId, LootId, Vec3};
pub use container::{Container, Equipment, EquipmentSlot};
pub use grid::{Grid, GridError, GridOffset, PlacedItem};
pub use item::{Item, ItemCategory, ItemFlags};
pub use loot::{
    Collider, ColliderHandle, ContainerInfo, CorpseInfo, LootKind, LootObject, LooseItem,
};
