//! Per-tick read-only view of what the animal perceives.

use arrayvec::ArrayVec;

use crate::env::{Detection, Health};
use crate::types::{EntityHandle, Sighting};

/// Maximum number of tracked threat handles carried by one snapshot.
pub const MAX_TRACKED_THREATS: usize = 16;

/// Detection results and health fraction, captured once per tick.
///
/// The nearest threat is always part of the tracked set, so
/// [`SensorSnapshot::threat_still_tracked`] never disagrees with
/// [`SensorSnapshot::nearest_threat`].
#[derive(Clone, Debug, PartialEq)]
pub struct SensorSnapshot {
    nearest_threat: Option<Sighting>,
    nearest_food: Option<Sighting>,
    tracked_threats: ArrayVec<EntityHandle, MAX_TRACKED_THREATS>,
    health_fraction: f32,
}

impl SensorSnapshot {
    pub fn capture(detection: &dyn Detection, health: &dyn Health) -> Self {
        let mut snapshot = Self::calm(health.health_fraction());
        snapshot.nearest_food = detection.nearest_food();
        if let Some(threat) = detection.nearest_threat() {
            snapshot = snapshot.with_threat(threat);
        }
        for &handle in detection.tracked_threats() {
            if snapshot.tracked_threats.is_full() {
                break;
            }
            snapshot.track(handle);
        }
        snapshot
    }

    /// Nothing detected.
    pub fn calm(health_fraction: f32) -> Self {
        Self {
            nearest_threat: None,
            nearest_food: None,
            tracked_threats: ArrayVec::new(),
            health_fraction: clamp_fraction(health_fraction),
        }
    }

    /// Sets the nearest threat and marks it tracked.
    #[must_use]
    pub fn with_threat(mut self, threat: Sighting) -> Self {
        self.nearest_threat = Some(threat);
        if !self.tracked_threats.contains(&threat.handle) {
            if self.tracked_threats.is_full() {
                self.tracked_threats.pop();
            }
            self.tracked_threats.insert(0, threat.handle);
        }
        self
    }

    #[must_use]
    pub fn with_food(mut self, food: Sighting) -> Self {
        self.nearest_food = Some(food);
        self
    }

    /// Marks a threat as tracked without making it the nearest one.
    #[must_use]
    pub fn with_tracked_threat(mut self, handle: EntityHandle) -> Self {
        self.track(handle);
        self
    }

    fn track(&mut self, handle: EntityHandle) {
        if !self.tracked_threats.contains(&handle) {
            // Capacity is checked by callers; overflow drops the farthest handle.
            let _ = self.tracked_threats.try_push(handle);
        }
    }

    pub fn nearest_threat(&self) -> Option<Sighting> {
        self.nearest_threat
    }

    pub fn nearest_food(&self) -> Option<Sighting> {
        self.nearest_food
    }

    pub fn has_threat(&self) -> bool {
        self.nearest_threat.is_some()
    }

    pub fn has_food(&self) -> bool {
        self.nearest_food.is_some()
    }

    pub fn threat_still_tracked(&self, handle: EntityHandle) -> bool {
        self.tracked_threats.contains(&handle)
    }

    pub fn tracked_threats(&self) -> &[EntityHandle] {
        &self.tracked_threats
    }

    pub fn health_fraction(&self) -> f32 {
        self.health_fraction
    }
}

fn clamp_fraction(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDetection, FakeHealth};
    use glam::Vec3;

    fn sighting(raw: u32, x: f32) -> Sighting {
        Sighting::new(EntityHandle(raw), Vec3::new(x, 0.0, 0.0))
    }

    #[test]
    fn capture_copies_detection_results() {
        let mut detection = FakeDetection::default();
        detection.threat = Some(sighting(1, 4.0));
        detection.food = Some(sighting(2, 1.0));
        detection.tracked = vec![EntityHandle(1), EntityHandle(9)];
        let health = FakeHealth::with_fraction(0.3);

        let snapshot = SensorSnapshot::capture(&detection, &health);

        assert!(snapshot.has_threat());
        assert!(snapshot.has_food());
        assert_eq!(snapshot.nearest_threat(), Some(sighting(1, 4.0)));
        assert!(snapshot.threat_still_tracked(EntityHandle(9)));
        assert!(!snapshot.threat_still_tracked(EntityHandle(2)));
        assert_eq!(snapshot.tracked_threats(), &[EntityHandle(1), EntityHandle(9)]);
        assert_eq!(snapshot.health_fraction(), 0.3);
    }

    #[test]
    fn nearest_threat_is_always_tracked() {
        let mut detection = FakeDetection::default();
        detection.threat = Some(sighting(5, 2.0));
        detection.tracked = (100..100 + MAX_TRACKED_THREATS as u32)
            .map(EntityHandle)
            .collect();

        let snapshot = SensorSnapshot::capture(&detection, &FakeHealth::full());

        assert_eq!(snapshot.tracked_threats().len(), MAX_TRACKED_THREATS);
        assert!(snapshot.threat_still_tracked(EntityHandle(5)));
    }

    #[test]
    fn health_fraction_is_clamped() {
        assert_eq!(SensorSnapshot::calm(1.4).health_fraction(), 1.0);
        assert_eq!(SensorSnapshot::calm(-0.2).health_fraction(), 0.0);
        assert_eq!(SensorSnapshot::calm(f32::NAN).health_fraction(), 0.0);
    }

    #[test]
    fn builders_do_not_duplicate_handles() {
        let snapshot = SensorSnapshot::calm(1.0)
            .with_tracked_threat(EntityHandle(3))
            .with_threat(sighting(3, 1.0))
            .with_tracked_threat(EntityHandle(3));
        assert_eq!(snapshot.tracked_threats(), &[EntityHandle(3)]);
    }
}
