//! Runtime implementations of the `loot-core` oracle traits.
//!
//! [`LootOracles`] bundles them behind `Arc`s so every worker thread can build
//! a [`loot_core::LootEnv`] on demand. Settings are immutable once a session
//! starts; the scene and the ignore lists change as agents act.
mod config;
mod eligibility;
mod scene;

use std::sync::Arc;

use loot_content::Scenario;
use loot_core::{Env, LootConfig, LootEnv};

pub use config::ConfigOracleImpl;
pub use eligibility::EligibilityOracleImpl;
pub use scene::SceneOracle;

use crate::error::Result;

/// Manages all oracle implementations and provides unified access
#[derive(Clone, Debug)]
pub struct LootOracles {
    pub(crate) scene: Arc<SceneOracle>,
    pub(crate) eligibility: Arc<EligibilityOracleImpl>,
    pub(crate) config: Arc<ConfigOracleImpl>,
}

impl LootOracles {
    pub fn new(scene: SceneOracle, config: LootConfig) -> Self {
        Self {
            scene: Arc::new(scene),
            eligibility: Arc::new(EligibilityOracleImpl::new(&config)),
            config: Arc::new(ConfigOracleImpl::new(config)),
        }
    }

    pub fn from_scenario(scenario: &Scenario, config: LootConfig) -> Result<Self> {
        Ok(Self::new(SceneOracle::from_scenario(scenario)?, config))
    }

    /// Borrows the oracles as the scanner's environment.
    pub fn as_loot_env(&self) -> LootEnv<'_> {
        Env::new(
            self.scene.as_ref(),
            self.scene.as_ref(),
            self.eligibility.as_ref(),
            self.config.as_ref(),
        )
        .into_loot_env()
    }

    pub fn scene(&self) -> &SceneOracle {
        &self.scene
    }

    pub fn eligibility(&self) -> &EligibilityOracleImpl {
        &self.eligibility
    }

    pub fn config(&self) -> &LootConfig {
        self.config.config()
    }
}
