//! Config oracle implementation for runtime.

use loot_core::{ConfigOracle, DestinationTuning, DetectionRanges, LootConfig};

/// Runtime implementation of ConfigOracle that wraps LootConfig
#[derive(Clone, Debug, Default)]
pub struct ConfigOracleImpl {
    config: LootConfig,
}

impl ConfigOracleImpl {
    pub fn new(config: LootConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LootConfig {
        &self.config
    }
}

impl ConfigOracle for ConfigOracleImpl {
    fn detection_ranges(&self) -> DetectionRanges {
        self.config.detection
    }

    fn destination_tuning(&self) -> DestinationTuning {
        self.config.destination
    }

    fn reserved_slot_count(&self) -> u32 {
        self.config.reserved_slot_count
    }
}
