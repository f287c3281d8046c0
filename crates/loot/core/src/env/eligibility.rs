use crate::state::{AgentId, AgentRole, Item, LootId, LootKind};

/// Settings-driven looting rules.
pub trait EligibilityOracle: Send + Sync {
    /// Whether agents with `role` may loot objects of `kind`.
    fn is_role_enabled(&self, kind: LootKind, role: AgentRole) -> bool;

    fn is_valuable_enough(&self, item: &Item) -> bool;

    /// Whether `agent` has given up on `loot` and should not target it again.
    fn is_ignored(&self, agent: AgentId, loot: LootId) -> bool;
}
