//! Runtime orchestration for loot-seeking agents.
//!
//! This crate implements the `loot-core` oracles over an in-memory scene and
//! wraps scanning, claim bookkeeping and container packing in a
//! [`LootSession`] that many agent threads share. It is also where looting is
//! logged: `loot-core` returns reports and this crate turns them into
//! `tracing` events.
//!
//! - [`oracle`] hosts the oracle implementations and their bundle
//! - [`session`] drives scans, outcomes, repacking and pickup
pub mod error;
pub mod oracle;
pub mod session;

pub use error::{Result, RuntimeError};
pub use oracle::{ConfigOracleImpl, EligibilityOracleImpl, LootOracles, SceneOracle};
pub use session::{LootOutcome, LootSession};
