//! Per-session loot orchestration shared by every agent.
//!
//! [`LootSession`] owns the oracles and the claim ledger for one simulation
//! session. It is cheap to clone and every method takes `&self`, so agents
//! can scan from as many threads as the host likes.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, trace, warn};

use loot_core::{
    ActiveTarget, AgentId, AgentState, ClaimCache, Equipment, ItemAddress, LootError, LootId,
    PackingError, PackingPlan,
};

use crate::error::{Result, RuntimeError};
use crate::oracle::LootOracles;

/// How an agent's pursuit of its target ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LootOutcome {
    /// Looted successfully.
    Completed,
    /// Gave up for reasons unrelated to the object (combat, new orders).
    Abandoned,
    /// The object could not be looted; the agent will not target it again.
    Failed,
}

#[derive(Clone, Debug)]
pub struct LootSession {
    oracles: LootOracles,
    claims: Arc<ClaimCache>,
}

impl LootSession {
    pub fn new(oracles: LootOracles) -> Self {
        Self {
            oracles,
            claims: Arc::new(ClaimCache::new()),
        }
    }

    pub fn oracles(&self) -> &LootOracles {
        &self.oracles
    }

    pub fn claims(&self) -> &ClaimCache {
        &self.claims
    }

    /// Whether `agent` should look for loot right now: it has no target and
    /// more free cells than the reserve kept for ammunition.
    pub fn should_scan(&self, agent: &AgentState) -> bool {
        !agent.has_target()
            && agent.available_grid_cells > self.oracles.config().reserved_slot_count
    }

    /// Looks for and claims a new target for `agent`.
    ///
    /// Returns `None` without scanning when [`should_scan`](Self::should_scan)
    /// is false.
    pub fn scan(&self, agent: &mut AgentState) -> Option<ActiveTarget> {
        if !self.should_scan(agent) {
            trace!(
                target: "loot::session",
                agent = %agent.id,
                has_target = agent.has_target(),
                free_cells = agent.available_grid_cells,
                "Skipping loot scan"
            );
            return None;
        }

        let started = Instant::now();
        let env = self.oracles.as_loot_env();
        let report = loot_core::scan(agent, &env, &self.claims);
        let elapsed = started.elapsed();

        if report.truncated {
            warn!(
                target: "loot::session",
                agent = %agent.id,
                detected = report.detected,
                examined = report.examined,
                "Overlap query overflowed, farthest colliders dropped"
            );
        }

        debug!(
            target: "loot::session",
            agent = %agent.id,
            name = %agent.name,
            detected = report.detected,
            examined = report.examined,
            rejected = report.rejected.total(),
            claimed_elsewhere = report.rejected.claimed,
            out_of_range = report.rejected.out_of_range,
            elapsed_us = elapsed.as_micros() as u64,
            target = ?report.target.map(|target| target.loot),
            "Loot scan finished"
        );

        report.target
    }

    /// Ends `agent`'s pursuit of its current target and releases the claim.
    ///
    /// On [`LootOutcome::Failed`] the object is also added to the agent's
    /// ignore list. Returns the target that was dropped.
    pub fn finish(&self, agent: &mut AgentState, outcome: LootOutcome) -> Option<ActiveTarget> {
        let target = agent.clear_target()?;
        self.claims.release(target.loot);
        if outcome == LootOutcome::Failed {
            self.oracles.eligibility().ignore(agent.id, target.loot);
        }
        debug!(
            target: "loot::session",
            agent = %agent.id,
            loot = %target.loot,
            kind = %target.kind,
            outcome = ?outcome,
            "Loot target released"
        );
        Some(target)
    }

    /// Releases every claim held by a destroyed agent and drops its ignore
    /// list. Returns the number of claims released.
    pub fn agent_destroyed(&self, agent: AgentId) -> usize {
        let released = self.claims.release_all_for(agent);
        self.oracles.eligibility().forget_agent(agent);
        debug!(
            target: "loot::session",
            agent = %agent,
            released,
            "Agent destroyed, claims released"
        );
        released
    }

    /// Repacks container `loot` in place.
    ///
    /// On failure the container keeps its previous layout.
    pub fn repack(&self, loot: LootId) -> Result<PackingPlan> {
        let started = Instant::now();
        let Some(result) = self
            .oracles
            .scene()
            .with_container(loot, |container| loot_core::repack(Some(container)))
        else {
            error!(target: "loot::session", loot = %loot, "Repack requested for unknown container");
            return Err(RuntimeError::UnknownContainer(loot));
        };

        match result {
            Ok(plan) => {
                debug!(
                    target: "loot::session",
                    loot = %loot,
                    items = plan.len(),
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "Container repacked"
                );
                Ok(plan)
            }
            Err(err) => {
                warn!(
                    target: "loot::session",
                    loot = %loot,
                    error = %err,
                    "Repack failed, layout restored"
                );
                Err(err.into())
            }
        }
    }

    /// Moves the loose item `loot` into `equipment` and removes it from the
    /// world. `agent`'s free cell count is refreshed from `equipment`.
    pub fn pick_up(
        &self,
        agent: &mut AgentState,
        equipment: &mut Equipment,
        loot: LootId,
    ) -> Result<ItemAddress> {
        let scene = self.oracles.scene();
        let item = scene
            .loose_item(loot)
            .ok_or(RuntimeError::UnknownItem(loot))?;

        let address = loot_core::pick_up(equipment, item).inspect_err(|err| {
            if err.severity().is_internal() {
                error!(
                    target: "loot::session",
                    agent = %agent.id,
                    loot = %loot,
                    code = err.error_code(),
                    error = %err,
                    "Equipment grid rejected its own free offset"
                );
            } else if let PackingError::NoSpace { .. } = err {
                debug!(
                    target: "loot::session",
                    agent = %agent.id,
                    loot = %loot,
                    "No room for item"
                );
            }
        })?;

        scene.despawn(loot);
        agent.available_grid_cells = equipment.free_cells();
        debug!(
            target: "loot::session",
            agent = %agent.id,
            item = %item.id,
            slot = %address.grid.slot,
            grid = address.grid.index,
            "Item picked up"
        );
        Ok(address)
    }
}
