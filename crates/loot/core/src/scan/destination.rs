use crate::config::DestinationTuning;
use crate::env::NavigationOracle;
use crate::state::{Bounds, Vec3};

/// Resolves the point an agent should walk to in order to loot an object.
///
/// The collider's base is snapped onto the walkable surface, then pushed
/// `standoff` units horizontally away from the footprint center and snapped
/// again, so agents do not stand directly under overhanging geometry. Either
/// snap failing makes the object unreachable.
pub fn resolve_destination<N>(
    navigation: &N,
    bounds: &Bounds,
    tuning: &DestinationTuning,
) -> Option<Vec3>
where
    N: NavigationOracle + ?Sized,
{
    let base = bounds.base(tuning.ground_drop);
    let nearest = navigation.snap_to_walkable(base, tuning.snap_distance)?;

    let padding = (base - nearest).flattened().normalized() * tuning.standoff;
    navigation.snap_to_walkable(base - padding, tuning.snap_distance)
}
