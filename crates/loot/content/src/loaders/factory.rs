//! Content factory for loading a session's files from one directory.

use std::path::{Path, PathBuf};

use loot_core::LootConfig;

use crate::loaders::{ConfigLoader, LoadResult, ScenarioLoader};
use crate::scenario::Scenario;

/// Loads loot content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── loot.toml
/// └── scenarios/
///     ├── warehouse.ron
///     └── crossroads.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load settings from `loot.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<LootConfig> {
        let path = self.data_dir.join("loot.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(LootConfig::default())
        }
    }

    /// Load `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self
            .data_dir
            .join("scenarios")
            .join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());

        assert_eq!(factory.load_config().unwrap(), LootConfig::default());
        assert_eq!(factory.data_dir(), dir.path());
    }

    #[test]
    fn scenarios_resolve_under_their_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("scenarios")).unwrap();
        std::fs::write(
            dir.path().join("scenarios").join("empty.ron"),
            "Scenario(walkable: (min_x: 0.0, max_x: 4.0, min_z: 0.0, max_z: 4.0))",
        )
        .unwrap();
        let factory = ContentFactory::new(dir.path());

        let scenario = factory.load_scenario("empty").unwrap();

        assert!(scenario.agents.is_empty());
        assert!(factory.load_scenario("missing").is_err());
    }
}
