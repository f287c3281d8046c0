use crate::state::{AgentRole, LootKind, RoleSet};

/// Path-length thresholds per loot kind.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DetectionRanges {
    pub container: f32,
    pub item: f32,
    pub corpse: f32,
}

impl DetectionRanges {
    pub const fn new(container: f32, item: f32, corpse: f32) -> Self {
        Self {
            container,
            item,
            corpse,
        }
    }

    pub const fn for_kind(&self, kind: LootKind) -> f32 {
        match kind {
            LootKind::Container => self.container,
            LootKind::Item => self.item,
            LootKind::Corpse => self.corpse,
        }
    }

    /// Radius of the overlap sphere: the largest of the three ranges.
    pub fn radius(&self) -> f32 {
        self.container.max(self.item).max(self.corpse)
    }
}

impl Default for DetectionRanges {
    fn default() -> Self {
        Self::new(
            LootConfig::DEFAULT_CONTAINER_RANGE,
            LootConfig::DEFAULT_ITEM_RANGE,
            LootConfig::DEFAULT_CORPSE_RANGE,
        )
    }
}

/// How a loot object's position is turned into a point an agent can stand on.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DestinationTuning {
    /// Maximum search distance when snapping onto the walkable surface.
    pub snap_distance: f32,
    /// Extra distance below the collider's lowest face, so hanging objects
    /// (jackets on walls) still snap to the floor.
    pub ground_drop: f32,
    /// Horizontal distance kept from the object's footprint center.
    pub standoff: f32,
}

impl Default for DestinationTuning {
    fn default() -> Self {
        Self {
            snap_distance: 1.0,
            ground_drop: 0.4,
            standoff: 1.0,
        }
    }
}

/// Dead-body awareness applied to agents that are allowed to loot corpses.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CorpseAwareness {
    pub see_distance: f32,
    pub leave_distance: f32,
    /// Seconds between looks towards known bodies.
    pub look_period: f32,
    /// PMC agents only get corpse awareness when this is set.
    pub pmc_enabled: bool,
}

impl CorpseAwareness {
    /// Settings for `role`, or `None` when the role is gated off.
    pub fn for_role(&self, role: AgentRole) -> Option<Self> {
        if role == AgentRole::Pmc && !self.pmc_enabled {
            return None;
        }
        Some(*self)
    }
}

impl Default for CorpseAwareness {
    fn default() -> Self {
        Self {
            see_distance: 60.0,
            leave_distance: 90.0,
            look_period: 5.0,
            pmc_enabled: true,
        }
    }
}

/// Tunable looting parameters for a simulation session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LootConfig {
    pub detection: DetectionRanges,
    pub container_roles: RoleSet,
    pub item_roles: RoleSet,
    pub corpse_roles: RoleSet,
    /// Free cells an agent keeps for ammunition. Scans only run when the
    /// agent has more free cells than this.
    pub reserved_slot_count: u32,
    /// Loose items worth less than this are ignored.
    pub min_item_value: u32,
    pub destination: DestinationTuning,
    pub corpse_awareness: CorpseAwareness,
}

impl LootConfig {
    // ===== compile-time constants =====
    /// Capacity of the overlap query buffer. Hits beyond this are dropped.
    pub const COLLIDER_BUFFER: usize = 250;
    /// Number of lock shards in the claim ledger.
    pub const CLAIM_SHARDS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CONTAINER_RANGE: f32 = 75.0;
    pub const DEFAULT_ITEM_RANGE: f32 = 80.0;
    pub const DEFAULT_CORPSE_RANGE: f32 = 75.0;
    pub const DEFAULT_RESERVED_SLOT_COUNT: u32 = 2;

    pub fn new() -> Self {
        Self {
            detection: DetectionRanges::default(),
            container_roles: RoleSet::all(),
            item_roles: RoleSet::all(),
            corpse_roles: RoleSet::all(),
            reserved_slot_count: Self::DEFAULT_RESERVED_SLOT_COUNT,
            min_item_value: 0,
            destination: DestinationTuning::default(),
            corpse_awareness: CorpseAwareness::default(),
        }
    }

    pub fn with_detection(detection: DetectionRanges) -> Self {
        Self {
            detection,
            ..Self::new()
        }
    }

    pub fn enabled_roles(&self, kind: LootKind) -> RoleSet {
        match kind {
            LootKind::Container => self.container_roles,
            LootKind::Item => self.item_roles,
            LootKind::Corpse => self.corpse_roles,
        }
    }
}

impl Default for LootConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_largest_range() {
        let ranges = DetectionRanges::new(40.0, 10.0, 55.0);
        assert_eq!(ranges.radius(), 55.0);
        assert_eq!(ranges.for_kind(LootKind::Item), 10.0);
    }

    #[test]
    fn pmc_corpse_awareness_is_gated() {
        let awareness = CorpseAwareness {
            pmc_enabled: false,
            ..CorpseAwareness::default()
        };
        assert!(awareness.for_role(AgentRole::Pmc).is_none());
        assert!(awareness.for_role(AgentRole::Scav).is_some());
    }
}
