use arrayvec::ArrayVec;

use crate::config::LootConfig;
use crate::state::{Collider, ColliderHandle, LootObject, Vec3};

/// Fixed working buffer for one overlap query.
pub type ColliderBuffer = ArrayVec<Collider, { LootConfig::COLLIDER_BUFFER }>;

/// Spatial queries against the live world.
pub trait WorldQueryOracle: Send + Sync {
    /// Pushes every loot collider intersecting the sphere into `out` and
    /// returns the total number of hits, which may exceed what fit.
    ///
    /// Implementations must not block on a full buffer; extra hits are
    /// dropped.
    fn overlap_sphere(&self, center: Vec3, radius: f32, out: &mut ColliderBuffer) -> usize;

    /// Resolves a collider to its loot object, or `None` if it vanished or
    /// carries nothing lootable.
    fn classify(&self, collider: ColliderHandle) -> Option<LootObject>;
}
