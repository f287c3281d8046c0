//! Loot settings loader.

use std::path::Path;

use loot_core::LootConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for loot settings from TOML files.
///
/// Every field is optional; anything missing keeps its default.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> LoadResult<LootConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse settings from TOML text.
    pub fn parse(content: &str) -> LoadResult<LootConfig> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse loot config TOML: {}", e))
    }
}
