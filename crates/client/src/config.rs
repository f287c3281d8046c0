//! Simulator configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use loot_content::{ConfigLoader, ContentFactory, Scenario};
use loot_core::LootConfig;

/// Settings for one simulator run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Directory holding `loot.toml` and `scenarios/`.
    pub data_dir: PathBuf,
    /// Scenario name under `scenarios/`, without the `.ron` extension.
    pub scenario: String,
    /// Settings file used instead of `{data_dir}/loot.toml`.
    pub config_path: Option<PathBuf>,
    pub ticks: u32,
    /// Distance an agent walks per tick.
    pub agent_speed: f32,
    /// How close an agent must get to its destination to loot.
    pub arrive_distance: f32,
    pub session_id: Option<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            scenario: "yard".to_string(),
            config_path: None,
            ticks: 20,
            agent_speed: 5.0,
            arrive_distance: 0.5,
            session_id: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LOOT_DATA_DIR` - Content directory (default: `data`)
    /// - `LOOT_SCENARIO` - Scenario name (default: `yard`)
    /// - `LOOT_CONFIG` - Loot settings TOML overriding `{LOOT_DATA_DIR}/loot.toml`
    /// - `LOOT_TICKS` - Number of simulation ticks (default: 20)
    /// - `LOOT_AGENT_SPEED` - Walk distance per tick (default: 5.0)
    /// - `LOOT_SESSION_ID` - Session identifier for log files (default: timestamp)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("LOOT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(name) = env::var("LOOT_SCENARIO") {
            config.scenario = name;
        }

        config.config_path = env::var("LOOT_CONFIG").ok().map(PathBuf::from);

        if let Some(ticks) = read_env::<u32>("LOOT_TICKS") {
            config.ticks = ticks;
        }

        if let Some(speed) = read_env::<f32>("LOOT_AGENT_SPEED") {
            config.agent_speed = speed.max(0.1);
        }

        config.session_id = env::var("LOOT_SESSION_ID").ok();

        config
    }

    /// Loads the loot settings and scenario this run is configured for.
    pub fn load_content(&self) -> Result<(LootConfig, Scenario)> {
        if !self.data_dir.exists() {
            bail!(
                "Content data directory not found: {} (set LOOT_DATA_DIR to override)",
                self.data_dir.display()
            );
        }

        let factory = ContentFactory::new(&self.data_dir);
        let loot = match &self.config_path {
            Some(path) => ConfigLoader::load(path),
            None => factory.load_config(),
        }
        .context("Loading loot settings")?;
        let scenario = factory.load_scenario(&self.scenario).with_context(|| {
            format!(
                "Loading scenario '{}' from {}",
                self.scenario,
                self.data_dir.display()
            )
        })?;

        Ok((loot, scenario))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use loot_core::{AgentRole, LootKind};

    use super::*;

    fn shipped() -> SimConfig {
        SimConfig {
            data_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data"),
            ..SimConfig::default()
        }
    }

    #[test]
    fn shipped_content_loads_through_the_data_dir() {
        let (loot, scenario) = shipped().load_content().unwrap();

        assert!(!scenario.agents.is_empty());
        assert!(!scenario.objects.is_empty());
        assert!(loot.enabled_roles(LootKind::Container).allows(AgentRole::Scav));
    }

    #[test]
    fn missing_data_dir_is_reported() {
        let config = SimConfig {
            data_dir: PathBuf::from("no/such/loot/data"),
            ..SimConfig::default()
        };
        let err = config.load_content().unwrap_err();
        assert!(err.to_string().contains("LOOT_DATA_DIR"));
    }

    #[test]
    fn unknown_scenario_names_the_scenario() {
        let config = SimConfig {
            scenario: "nowhere".into(),
            ..shipped()
        };
        let err = config.load_content().unwrap_err();
        assert!(format!("{err:#}").contains("nowhere"));
    }
}
