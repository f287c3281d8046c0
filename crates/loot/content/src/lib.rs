//! Data-driven loot content and loaders.
//!
//! This crate reads the files a simulation session is built from:
//! - Loot settings (TOML, deserialized straight into [`loot_core::LootConfig`])
//! - Scenarios (RON): the walkable area, agents with their equipment, and the
//!   containers, loose items and bodies placed in the world
//!
//! Content is turned into oracle implementations by the runtime; nothing here
//! holds live state.

#[cfg(feature = "serde")]
pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "serde")]
pub use scenario::{
    AgentSpec, GridSpec, ItemSpec, ObjectKindSpec, ObjectSpec, PlacedItemSpec, Scenario,
    SlotSpec, WalkableArea, build_container,
};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, ScenarioLoader};
