use glam::Vec3;

use crate::types::SpeedTier;

/// Movement/physics collaborator.
///
/// Commands are fire-and-forget requests. The machine reads back only the
/// animal's position (for flee headings) and whether the current target was
/// reached.
pub trait Movement {
    /// Current position of the animal.
    fn position(&self) -> Vec3;

    /// Walk toward a fixed target at the current speed tier.
    fn move_to(&mut self, target: Vec3);

    /// Keep moving along `direction` until told otherwise.
    fn move_in_direction(&mut self, direction: Vec3);

    fn stop(&mut self);

    fn set_speed_tier(&mut self, tier: SpeedTier);

    /// True once the last `move_to` target is within stopping distance.
    fn has_reached_target(&self) -> bool;

    /// Disabled movement ignores every subsequent command.
    fn set_enabled(&mut self, enabled: bool);
}
