use crate::claims::ClaimCache;
use crate::env::EligibilityOracle;
use crate::state::{AgentState, LootObject};

/// Outcome of the type-specific eligibility checks for one candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Eligible,
    Ineligible,
    /// Another agent already holds the claim.
    Claimed,
}

pub(crate) fn evaluate<E>(
    agent: &AgentState,
    object: &LootObject,
    eligibility: &E,
    claims: &ClaimCache,
) -> Verdict
where
    E: EligibilityOracle + ?Sized,
{
    if !eligibility.is_role_enabled(object.kind(), agent.role) {
        return Verdict::Ineligible;
    }
    let id = object.id();
    if claims.is_claimed_by_other(id, agent.id) {
        return Verdict::Claimed;
    }

    let lootable = match object {
        LootObject::Container(container) => container.active && !container.locked,
        LootObject::Item(loose) => {
            let item = &loose.item;
            !item.is_quest_item()
                && !item.is_single_use_key()
                && agent.available_grid_cells > item.area()
                && eligibility.is_valuable_enough(item)
        }
        // Static bodies placed by the level have no owning agent.
        LootObject::Corpse(corpse) => corpse.owner.is_some_and(|owner| owner != agent.id),
    };

    if lootable && !eligibility.is_ignored(agent.id, id) {
        Verdict::Eligible
    } else {
        Verdict::Ineligible
    }
}
