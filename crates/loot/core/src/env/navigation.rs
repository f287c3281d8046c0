use crate::state::Vec3;

/// Walkable-surface queries. Failures are reported as `None`, never errors.
pub trait NavigationOracle: Send + Sync {
    /// Nearest walkable point within `max_distance` of `point`.
    fn snap_to_walkable(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;

    /// Length of the navigable path between two walkable points.
    fn path_length(&self, from: Vec3, to: Vec3) -> Option<f32>;
}
