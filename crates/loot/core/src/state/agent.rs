//! Agent-side state read and written by the scanner.

use bitflags::bitflags;

use super::{AgentId, LootId, LootKind, Vec3};

/// Behavioral role of an agent, used for per-loot-kind toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AgentRole {
    Scav,
    Pmc,
    Raider,
    Rogue,
    Cultist,
    Boss,
    Follower,
}

bitflags! {
    /// Set of roles for which a looting behavior is enabled.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct RoleSet: u8 {
        const SCAV     = 1 << 0;
        const PMC      = 1 << 1;
        const RAIDER   = 1 << 2;
        const ROGUE    = 1 << 3;
        const CULTIST  = 1 << 4;
        const BOSS     = 1 << 5;
        const FOLLOWER = 1 << 6;
    }
}

impl RoleSet {
    pub const fn of(role: AgentRole) -> Self {
        match role {
            AgentRole::Scav => Self::SCAV,
            AgentRole::Pmc => Self::PMC,
            AgentRole::Raider => Self::RAIDER,
            AgentRole::Rogue => Self::ROGUE,
            AgentRole::Cultist => Self::CULTIST,
            AgentRole::Boss => Self::BOSS,
            AgentRole::Follower => Self::FOLLOWER,
        }
    }

    pub const fn allows(self, role: AgentRole) -> bool {
        self.contains(Self::of(role))
    }
}

impl From<AgentRole> for RoleSet {
    fn from(role: AgentRole) -> Self {
        Self::of(role)
    }
}

/// Loot target selected by a scan and held until the agent finishes with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveTarget {
    pub loot: LootId,
    pub kind: LootKind,
    /// Where the object itself is (bounds center).
    pub object_position: Vec3,
    /// Navigable point the agent walks to.
    pub destination: Vec3,
    /// Path length from the agent to `destination` at selection time.
    pub distance: f32,
}

/// The slice of an agent the looting logic cares about.
///
/// The simulation owns agents; the scanner only reads them and writes
/// `target` back.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentState {
    pub id: AgentId,
    pub name: String,
    pub position: Vec3,
    pub role: AgentRole,
    /// Free cells across all carried grids.
    pub available_grid_cells: u32,
    pub target: Option<ActiveTarget>,
}

impl AgentState {
    pub fn new(id: AgentId, name: impl Into<String>, position: Vec3, role: AgentRole) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            role,
            available_grid_cells: 0,
            target: None,
        }
    }

    #[must_use]
    pub fn with_available_cells(mut self, cells: u32) -> Self {
        self.available_grid_cells = cells;
        self
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Drops the current target and returns it.
    pub fn clear_target(&mut self) -> Option<ActiveTarget> {
        self.target.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_role_maps_to_a_distinct_flag() {
        let mut seen = RoleSet::empty();
        for role in AgentRole::iter() {
            let flag = RoleSet::of(role);
            assert!(!seen.intersects(flag), "{role} shares a flag");
            seen |= flag;
        }
        assert_eq!(seen, RoleSet::all());
    }

    #[test]
    fn allows_checks_membership() {
        let set = RoleSet::SCAV | RoleSet::BOSS;
        assert!(set.allows(AgentRole::Scav));
        assert!(!set.allows(AgentRole::Pmc));
    }
}
