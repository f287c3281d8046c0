//! Configuration oracle for exposing loot settings to the scanner.

use crate::config::{DestinationTuning, DetectionRanges};

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    fn detection_ranges(&self) -> DetectionRanges;

    fn destination_tuning(&self) -> DestinationTuning;

    /// Free cells an agent keeps back for ammunition.
    fn reserved_slot_count(&self) -> u32;
}
