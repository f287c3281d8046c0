//! Loot simulator: loads a scenario and drives concurrent looting agents
//! through a shared [`loot_runtime::LootSession`].
pub mod config;
pub mod logging;
pub mod sim;

pub use config::SimConfig;
pub use sim::{SimAgent, SimSummary, Simulation};
