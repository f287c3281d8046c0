//! Eligibility oracle backed by loot settings and per-agent ignore lists.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use loot_core::{
    AgentId, AgentRole, CorpseAwareness, EligibilityOracle, Item, LootConfig, LootId, LootKind,
    RoleSet,
};

/// Answers role toggles and value thresholds from [`LootConfig`], and tracks
/// loot each agent has given up on.
///
/// Bodies are only eligible for roles that both appear in `corpse_roles` and
/// get corpse awareness.
///
/// Ignore lists only grow while the agent is alive; call
/// [`forget_agent`](Self::forget_agent) when it is destroyed.
#[derive(Debug)]
pub struct EligibilityOracleImpl {
    container_roles: RoleSet,
    item_roles: RoleSet,
    corpse_roles: RoleSet,
    corpse_awareness: CorpseAwareness,
    min_item_value: u32,
    ignored: RwLock<HashMap<AgentId, HashSet<LootId>>>,
}

impl EligibilityOracleImpl {
    pub fn new(config: &LootConfig) -> Self {
        Self {
            container_roles: config.container_roles,
            item_roles: config.item_roles,
            corpse_roles: config.corpse_roles,
            corpse_awareness: config.corpse_awareness,
            min_item_value: config.min_item_value,
            ignored: RwLock::new(HashMap::new()),
        }
    }

    /// Body awareness for agents with `role`, `None` when the role is gated off.
    pub fn corpse_awareness(&self, role: AgentRole) -> Option<CorpseAwareness> {
        self.corpse_awareness.for_role(role)
    }

    /// Stops `agent` from targeting `loot` again. Returns `false` if it was
    /// already ignored.
    pub fn ignore(&self, agent: AgentId, loot: LootId) -> bool {
        self.ignored
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(agent)
            .or_default()
            .insert(loot)
    }

    /// Drops the ignore list of `agent`.
    pub fn forget_agent(&self, agent: AgentId) {
        self.ignored
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&agent);
    }

    pub fn ignored_count(&self, agent: AgentId) -> usize {
        self.ignored
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&agent)
            .map_or(0, HashSet::len)
    }
}

impl EligibilityOracle for EligibilityOracleImpl {
    fn is_role_enabled(&self, kind: LootKind, role: AgentRole) -> bool {
        match kind {
            LootKind::Container => self.container_roles.allows(role),
            LootKind::Item => self.item_roles.allows(role),
            LootKind::Corpse => {
                self.corpse_roles.allows(role) && self.corpse_awareness(role).is_some()
            }
        }
    }

    fn is_valuable_enough(&self, item: &Item) -> bool {
        item.value >= self.min_item_value
    }

    fn is_ignored(&self, agent: AgentId, loot: LootId) -> bool {
        self.ignored
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&agent)
            .is_some_and(|ignored| ignored.contains(&loot))
    }
}

#[cfg(test)]
mod tests {
    use loot_core::ItemId;

    use super::*;

    #[test]
    fn ignore_lists_are_per_agent() {
        let oracle = EligibilityOracleImpl::new(&LootConfig::default());

        assert!(oracle.ignore(AgentId(1), LootId(5)));
        assert!(!oracle.ignore(AgentId(1), LootId(5)));

        assert!(oracle.is_ignored(AgentId(1), LootId(5)));
        assert!(!oracle.is_ignored(AgentId(2), LootId(5)));

        oracle.forget_agent(AgentId(1));
        assert_eq!(oracle.ignored_count(AgentId(1)), 0);
    }

    #[test]
    fn roles_and_value_follow_config() {
        let config = LootConfig {
            item_roles: RoleSet::SCAV,
            min_item_value: 100,
            ..LootConfig::default()
        };
        let oracle = EligibilityOracleImpl::new(&config);

        assert!(oracle.is_role_enabled(LootKind::Item, AgentRole::Scav));
        assert!(!oracle.is_role_enabled(LootKind::Item, AgentRole::Pmc));
        assert!(oracle.is_role_enabled(LootKind::Container, AgentRole::Pmc));

        let cheap = Item::new(ItemId(1), 1, 1).with_value(99);
        assert!(!oracle.is_valuable_enough(&cheap));
        assert!(oracle.is_valuable_enough(&cheap.with_value(100)));
    }

    #[test]
    fn gated_pmc_cannot_loot_bodies() {
        let mut config = LootConfig::default();
        config.corpse_awareness.pmc_enabled = false;
        let oracle = EligibilityOracleImpl::new(&config);

        assert!(!oracle.is_role_enabled(LootKind::Corpse, AgentRole::Pmc));
        assert!(oracle.corpse_awareness(AgentRole::Pmc).is_none());
        assert!(oracle.is_role_enabled(LootKind::Corpse, AgentRole::Scav));
        assert!(oracle.is_role_enabled(LootKind::Container, AgentRole::Pmc));
        assert_eq!(
            oracle.corpse_awareness(AgentRole::Scav).map(|awareness| awareness.see_distance),
            Some(60.0)
        );
    }
}
