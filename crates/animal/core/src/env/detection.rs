use glam::Vec3;

use crate::types::{EntityHandle, Sighting};

/// Detection collaborator.
///
/// Scanning is done elsewhere; the machine consumes results through
/// [`crate::SensorSnapshot`] and asks [`Detection::locate`] whether an object
/// still exists.
pub trait Detection {
    fn has_threat(&self) -> bool {
        self.nearest_threat().is_some()
    }

    fn nearest_threat(&self) -> Option<Sighting>;

    fn has_food(&self) -> bool {
        self.nearest_food().is_some()
    }

    fn nearest_food(&self) -> Option<Sighting>;

    /// True while `handle` is still among the detected threats.
    fn is_threat_still_tracked(&self, handle: EntityHandle) -> bool {
        self.tracked_threats().contains(&handle)
    }

    /// All threats detected by the last scan, nearest first.
    fn tracked_threats(&self) -> &[EntityHandle];

    /// Current position of `handle`, or `None` once the object is destroyed.
    fn locate(&self, handle: EntityHandle) -> Option<Vec3>;

    /// Disabled detection stops scanning and reports nothing.
    fn set_enabled(&mut self, enabled: bool);
}
