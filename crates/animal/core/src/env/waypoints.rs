use glam::Vec3;

/// Source of wandering destinations.
pub trait WaypointSource {
    /// Picks and remembers the next destination. `None` when nothing is available.
    fn next_destination(&mut self) -> Option<Vec3>;

    /// True when the animal is within `radius` of the current destination.
    fn reached(&self, radius: f32) -> bool;
}
