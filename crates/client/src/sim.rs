//! Tick-driven loot simulation.
//!
//! Every tick, agents without a target scan concurrently on the blocking
//! pool (they share one [`LootSession`], so the claim ledger arbitrates).
//! Agents with a target then walk towards it and, on arrival, loot it:
//! containers are repacked, loose items picked up, bodies searched.

use anyhow::Result;
use tracing::{debug, info};

use loot_content::Scenario;
use loot_core::{ActiveTarget, AgentState, Equipment, LootConfig, LootKind, Vec3};
use loot_runtime::{LootOracles, LootOutcome, LootSession};

use crate::config::SimConfig;

/// An agent plus the equipment it carries.
#[derive(Clone, Debug)]
pub struct SimAgent {
    pub state: AgentState,
    pub equipment: Equipment,
}

/// Counters accumulated over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimSummary {
    pub ticks: u32,
    pub targets_claimed: u32,
    pub containers_repacked: u32,
    pub items_picked: u32,
    pub corpses_searched: u32,
    pub failures: u32,
}

pub struct Simulation {
    session: LootSession,
    agents: Vec<SimAgent>,
    agent_speed: f32,
    arrive_distance: f32,
}

impl Simulation {
    pub fn from_scenario(scenario: &Scenario, loot: LootConfig, config: &SimConfig) -> Result<Self> {
        let oracles = LootOracles::from_scenario(scenario, loot)?;
        let agents = scenario
            .agents
            .iter()
            .map(|spec| {
                let equipment = spec.build_equipment()?;
                let state = spec.build_state(&equipment);
                Ok(SimAgent { state, equipment })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            session: LootSession::new(oracles),
            agents,
            agent_speed: config.agent_speed,
            arrive_distance: config.arrive_distance,
        })
    }

    pub fn session(&self) -> &LootSession {
        &self.session
    }

    pub fn agents(&self) -> &[SimAgent] {
        &self.agents
    }

    pub async fn run(&mut self, ticks: u32) -> Result<SimSummary> {
        let mut summary = SimSummary::default();
        for tick in 1..=ticks {
            self.scan_idle(&mut summary).await?;
            self.advance(&mut summary);
            summary.ticks = tick;

            let active = self
                .agents
                .iter()
                .filter(|agent| agent.state.has_target())
                .count();
            info!(
                tick,
                active,
                claims = self.session.claims().len(),
                objects = self.session.oracles().scene().object_count(),
                "Tick complete"
            );
        }
        Ok(summary)
    }

    async fn scan_idle(&mut self, summary: &mut SimSummary) -> Result<()> {
        let agents = std::mem::take(&mut self.agents);
        let mut handles = Vec::with_capacity(agents.len());
        for mut agent in agents {
            let session = self.session.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let target = session.scan(&mut agent.state);
                (agent, target)
            }));
        }

        for handle in handles {
            let (agent, target) = handle.await?;
            if let Some(target) = target {
                summary.targets_claimed += 1;
                debug!(
                    agent = %agent.state.id,
                    loot = %target.loot,
                    distance = target.distance,
                    "Agent heading to loot"
                );
            }
            self.agents.push(agent);
        }
        Ok(())
    }

    fn advance(&mut self, summary: &mut SimSummary) {
        for agent in &mut self.agents {
            let Some(target) = agent.state.target else {
                continue;
            };
            agent.state.position =
                step_towards(agent.state.position, target.destination, self.agent_speed);
            if horizontal_distance(agent.state.position, target.destination) <= self.arrive_distance
            {
                loot_target(&self.session, agent, target, summary);
            }
        }
    }
}

fn loot_target(
    session: &LootSession,
    agent: &mut SimAgent,
    target: ActiveTarget,
    summary: &mut SimSummary,
) {
    let outcome = match target.kind {
        LootKind::Container => match session.repack(target.loot) {
            Ok(_) => {
                summary.containers_repacked += 1;
                LootOutcome::Completed
            }
            Err(_) => LootOutcome::Failed,
        },
        LootKind::Item => {
            match session.pick_up(&mut agent.state, &mut agent.equipment, target.loot) {
                Ok(_) => {
                    summary.items_picked += 1;
                    LootOutcome::Completed
                }
                Err(_) => LootOutcome::Failed,
            }
        }
        LootKind::Corpse => {
            summary.corpses_searched += 1;
            LootOutcome::Completed
        }
    };

    session.finish(&mut agent.state, outcome);
    match outcome {
        LootOutcome::Failed => summary.failures += 1,
        // Searched containers and bodies are not revisited.
        _ if target.kind != LootKind::Item => {
            session
                .oracles()
                .eligibility()
                .ignore(agent.state.id, target.loot);
        }
        _ => {}
    }
}

fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    a.flattened().distance(b.flattened())
}

/// Walks at most `speed` units towards `destination` on the horizontal plane.
fn step_towards(position: Vec3, destination: Vec3, speed: f32) -> Vec3 {
    let offset = (destination - position).flattened();
    if offset.length() <= speed {
        Vec3::new(destination.x, position.y, destination.z)
    } else {
        position + offset.normalized() * speed
    }
}
