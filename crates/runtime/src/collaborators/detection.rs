//! Range-based detection over a [`World`].
//!
//! Food is seen all around; threats only inside the field of view ahead of
//! the animal's facing.

use std::collections::HashMap;

use animal_core::{AnimalStats, Detection, EntityHandle, MAX_TRACKED_THREATS, Sighting, Vec3};
use tracing::trace;

use crate::world::{ObjectKind, World};

/// Scans the world once per tick and answers the machine's queries from the
/// last scan.
#[derive(Clone, Debug)]
pub struct SimDetection {
    food_range: f32,
    threat_range: f32,
    /// Degrees, centered on the facing.
    threat_angle: f32,
    enabled: bool,
    nearest_food: Option<Sighting>,
    nearest_threat: Option<Sighting>,
    tracked: Vec<EntityHandle>,
    /// Every object that existed at the last scan, in or out of range.
    known: HashMap<EntityHandle, Vec3>,
}

impl SimDetection {
    pub fn new(stats: &AnimalStats) -> Self {
        Self {
            food_range: stats.food_detection_range,
            threat_range: stats.threat_detection_range,
            threat_angle: stats.threat_detection_angle,
            enabled: true,
            nearest_food: None,
            nearest_threat: None,
            tracked: Vec::new(),
            known: HashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Refreshes detection results around `origin` for an animal looking
    /// along `facing`.
    ///
    /// Threats are tracked nearest first, at most [`MAX_TRACKED_THREATS`]
    /// of them. Ties are broken by handle so scans are deterministic.
    pub fn scan(&mut self, origin: Vec3, facing: Vec3, world: &World) {
        self.clear();
        if !self.enabled {
            return;
        }

        self.known.extend(
            world
                .iter_kind(ObjectKind::Food)
                .chain(world.iter_kind(ObjectKind::Threat)),
        );

        let mut threats = in_range(world, ObjectKind::Threat, origin, self.threat_range);
        threats.retain(|(s, _)| within_view(origin, facing, s.position, self.threat_angle));
        self.nearest_threat = threats.first().map(|(s, _)| *s);
        self.tracked = threats
            .iter()
            .take(MAX_TRACKED_THREATS)
            .map(|(s, _)| s.handle)
            .collect();

        let food = in_range(world, ObjectKind::Food, origin, self.food_range);
        self.nearest_food = food.first().map(|(s, _)| *s);

        trace!(
            "scan at {}: {} threats, {} food",
            origin,
            threats.len(),
            food.len()
        );
    }

    fn clear(&mut self) {
        self.nearest_food = None;
        self.nearest_threat = None;
        self.tracked.clear();
        self.known.clear();
    }
}

/// Objects of `kind` within `range` of `origin`, nearest first.
fn in_range(world: &World, kind: ObjectKind, origin: Vec3, range: f32) -> Vec<(Sighting, f32)> {
    let mut found: Vec<(Sighting, f32)> = world
        .iter_kind(kind)
        .map(|(handle, position)| (Sighting::new(handle, position), origin.distance(position)))
        .filter(|(_, distance)| *distance <= range)
        .collect();
    found.sort_by(|(a, da), (b, db)| da.total_cmp(db).then(a.handle.cmp(&b.handle)));
    found
}

/// True when `target` lies inside a cone of `angle` degrees around `facing`.
///
/// An object on top of the animal, or a facing of zero length, always counts.
fn within_view(origin: Vec3, facing: Vec3, target: Vec3, angle: f32) -> bool {
    if angle >= 360.0 {
        return true;
    }
    let to_target = target - origin;
    if to_target.length_squared() <= f32::EPSILON || facing.length_squared() <= f32::EPSILON {
        return true;
    }
    facing.angle_between(to_target).to_degrees() <= angle * 0.5
}

impl Detection for SimDetection {
    fn nearest_threat(&self) -> Option<Sighting> {
        self.nearest_threat
    }

    fn nearest_food(&self) -> Option<Sighting> {
        self.nearest_food
    }

    fn tracked_threats(&self) -> &[EntityHandle] {
        &self.tracked
    }

    fn locate(&self, handle: EntityHandle) -> Option<Vec3> {
        self.known.get(&handle).copied()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> SimDetection {
        let stats = AnimalStats {
            food_detection_range: 5.0,
            threat_detection_range: 15.0,
            ..AnimalStats::new("Deer")
        };
        SimDetection::new(&stats)
    }

    #[test]
    fn reports_nearest_objects_in_range() {
        let mut world = World::new();
        let far_food = world.spawn_food(Vec3::new(6.0, 0.0, 0.0));
        let near_food = world.spawn_food(Vec3::new(0.0, 0.0, 3.0));
        let far_wolf = world.spawn_threat(Vec3::new(12.0, 0.0, 0.0));
        let near_wolf = world.spawn_threat(Vec3::new(-8.0, 0.0, 0.0));
        let mut detection = detector();

        detection.scan(Vec3::ZERO, Vec3::Z, &world);

        assert_eq!(detection.nearest_food().map(|s| s.handle), Some(near_food));
        assert_eq!(detection.nearest_threat().map(|s| s.handle), Some(near_wolf));
        assert_eq!(detection.tracked_threats(), &[near_wolf, far_wolf]);
        assert!(detection.is_threat_still_tracked(far_wolf));
        assert_eq!(detection.locate(far_food), Some(Vec3::new(6.0, 0.0, 0.0)));
    }

    #[test]
    fn out_of_range_threat_is_untracked_but_locatable() {
        let mut world = World::new();
        let wolf = world.spawn_threat(Vec3::new(20.0, 0.0, 0.0));
        let mut detection = detector();

        detection.scan(Vec3::ZERO, Vec3::Z, &world);

        assert!(!detection.has_threat());
        assert!(!detection.is_threat_still_tracked(wolf));
        assert_eq!(detection.locate(wolf), Some(Vec3::new(20.0, 0.0, 0.0)));
    }

    #[test]
    fn destroyed_objects_cannot_be_located() {
        let mut world = World::new();
        let grass = world.spawn_food(Vec3::new(1.0, 0.0, 0.0));
        let mut detection = detector();
        detection.scan(Vec3::ZERO, Vec3::Z, &world);
        assert!(detection.has_food());

        world.destroy(grass).unwrap();
        detection.scan(Vec3::ZERO, Vec3::Z, &world);

        assert!(!detection.has_food());
        assert_eq!(detection.locate(grass), None);
    }

    #[test]
    fn disabled_detection_reports_nothing() {
        let mut world = World::new();
        world.spawn_threat(Vec3::new(1.0, 0.0, 0.0));
        let mut detection = detector();
        detection.set_enabled(false);

        detection.scan(Vec3::ZERO, Vec3::Z, &world);

        assert!(!detection.is_enabled());
        assert!(!detection.has_threat());
        assert!(detection.tracked_threats().is_empty());
    }

    #[test]
    fn threats_behind_are_outside_the_field_of_view() {
        let mut world = World::new();
        let behind = world.spawn_threat(Vec3::new(0.0, 0.0, -5.0));
        let flank = world.spawn_threat(Vec3::new(6.0, 0.0, -0.5));
        let grass = world.spawn_food(Vec3::new(0.0, 0.0, -2.0));
        let mut detection = detector();

        detection.scan(Vec3::ZERO, Vec3::Z, &world);

        assert_eq!(detection.tracked_threats(), &[flank]);
        assert!(!detection.is_threat_still_tracked(behind));
        assert_eq!(detection.nearest_food().map(|s| s.handle), Some(grass));

        detection.scan(Vec3::ZERO, Vec3::NEG_Z, &world);
        assert_eq!(detection.tracked_threats(), &[behind, flank]);
    }

    #[test]
    fn full_turn_sees_everything() {
        let mut world = World::new();
        let behind = world.spawn_threat(Vec3::new(0.0, 0.0, -5.0));
        let stats = AnimalStats {
            threat_detection_angle: 360.0,
            ..AnimalStats::new("Owl")
        };
        let mut detection = SimDetection::new(&stats);

        detection.scan(Vec3::ZERO, Vec3::Z, &world);

        assert_eq!(detection.nearest_threat().map(|s| s.handle), Some(behind));
    }
}
