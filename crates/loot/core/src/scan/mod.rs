//! Candidate scanner: picks the next loot target for one agent.
//!
//! A scan runs one overlap query sized to the largest detection range,
//! pre-ranks hits by straight-line distance, and walks them in that order.
//! The first candidate that is eligible, reachable on the navigation surface,
//! within its kind's path-length range, and successfully claimed becomes the
//! agent's target. This is a greedy pick: a later candidate may have a
//! shorter path, and it is still not considered.
mod destination;
mod eligibility;

pub use destination::resolve_destination;

use crate::claims::ClaimCache;
use crate::env::{
    ColliderBuffer, ConfigOracle, EligibilityOracle, Env, NavigationOracle, WorldQueryOracle,
};
use crate::state::{ActiveTarget, AgentState, Collider, LootKind, LootObject, Vec3};

use eligibility::Verdict;

/// A candidate that passed every check except the final claim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub kind: LootKind,
    pub collider: Collider,
    pub object: LootObject,
    /// Path length from the agent to `destination`.
    pub distance: f32,
    pub destination: Vec3,
}

impl Candidate {
    fn into_target(self) -> ActiveTarget {
        ActiveTarget {
            loot: self.object.id(),
            kind: self.kind,
            object_position: self.collider.bounds.center,
            destination: self.destination,
            distance: self.distance,
        }
    }
}

/// Why candidates were passed over during one scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rejections {
    /// Collider no longer resolves to a loot object.
    pub vanished: u32,
    pub ineligible: u32,
    /// Held by another agent, either before or during the claim.
    pub claimed: u32,
    pub unreachable: u32,
    pub out_of_range: u32,
}

impl Rejections {
    pub fn total(&self) -> u32 {
        self.vanished + self.ineligible + self.claimed + self.unreachable + self.out_of_range
    }
}

/// Everything a single scan observed, for hosts that want to log it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanReport {
    /// Hits reported by the overlap query, including ones that did not fit.
    pub detected: usize,
    /// Candidates actually examined before stopping.
    pub examined: usize,
    /// The working buffer overflowed and some hits were dropped.
    pub truncated: bool,
    pub rejected: Rejections,
    pub target: Option<ActiveTarget>,
}

/// Runs one scan for `agent` and returns the full report.
///
/// On success the claim is recorded in `claims` and the target is written to
/// `agent.target`. When nothing qualifies the agent is left untouched.
pub fn scan<W, N, E, C>(
    agent: &mut AgentState,
    env: &Env<'_, W, N, E, C>,
    claims: &ClaimCache,
) -> ScanReport
where
    W: WorldQueryOracle + ?Sized,
    N: NavigationOracle + ?Sized,
    E: EligibilityOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    let ranges = env.config().detection_ranges();
    let tuning = env.config().destination_tuning();

    let mut colliders = ColliderBuffer::new();
    let detected = env
        .world()
        .overlap_sphere(agent.position, ranges.radius(), &mut colliders);

    let mut report = ScanReport {
        detected,
        truncated: detected > colliders.len(),
        ..ScanReport::default()
    };

    let origin = agent.position;
    colliders.sort_by(|a, b| {
        a.bounds
            .center
            .distance(origin)
            .total_cmp(&b.bounds.center.distance(origin))
            .then(a.handle.cmp(&b.handle))
    });

    for collider in colliders {
        report.examined += 1;

        let Some(object) = env.world().classify(collider.handle) else {
            report.rejected.vanished += 1;
            continue;
        };

        match eligibility::evaluate(agent, &object, env.eligibility(), claims) {
            Verdict::Eligible => {}
            Verdict::Ineligible => {
                report.rejected.ineligible += 1;
                continue;
            }
            Verdict::Claimed => {
                report.rejected.claimed += 1;
                continue;
            }
        }

        let Some(destination) = resolve_destination(env.navigation(), &collider.bounds, &tuning)
        else {
            report.rejected.unreachable += 1;
            continue;
        };
        let Some(distance) = env.navigation().path_length(origin, destination) else {
            report.rejected.unreachable += 1;
            continue;
        };

        let kind = object.kind();
        if distance > ranges.for_kind(kind) {
            report.rejected.out_of_range += 1;
            continue;
        }

        // The claim re-checks under the shard lock; losing a race here is
        // treated like any other claimed candidate.
        if claims.claim(object.id(), agent.id).is_err() {
            report.rejected.claimed += 1;
            continue;
        }

        let target = Candidate {
            kind,
            collider,
            object,
            distance,
            destination,
        }
        .into_target();
        agent.target = Some(target);
        report.target = Some(target);
        break;
    }

    report
}

/// Picks and claims the next loot target for `agent`.
///
/// Returns the new target, or `None` when no candidate qualified (in which
/// case `agent.target` keeps whatever it held before).
pub fn find_target<W, N, E, C>(
    agent: &mut AgentState,
    env: &Env<'_, W, N, E, C>,
    claims: &ClaimCache,
) -> Option<ActiveTarget>
where
    W: WorldQueryOracle + ?Sized,
    N: NavigationOracle + ?Sized,
    E: EligibilityOracle + ?Sized,
    C: ConfigOracle + ?Sized,
{
    scan(agent, env, claims).target
}
