//! Fixed patrol route.

use animal_core::{AnimalId, RngOracle, PcgRng, Vec3, WaypointSource, compute_seed};
use tracing::debug;

/// Radius of the random destination offered when the route has no points.
pub const FALLBACK_WANDER_RADIUS: f32 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RouteOrder {
    /// Visit points in list order, wrapping around.
    Sequential,
    /// Pick any point except the current one.
    #[default]
    Random,
}

/// Waypoint route around which an animal wanders.
///
/// The route starts at the point closest to the animal, so the first
/// destination is the one after it. With no points at all, every
/// destination is a random spot within [`FALLBACK_WANDER_RADIUS`] of the
/// animal.
#[derive(Clone, Debug)]
pub struct WaypointRoute {
    points: Vec<Vec3>,
    order: RouteOrder,
    index: Option<usize>,
    current: Option<Vec3>,
    origin: Vec3,
    animal: AnimalId,
    seed: u64,
    draws: u64,
}

impl WaypointRoute {
    pub fn new(
        points: Vec<Vec3>,
        order: RouteOrder,
        origin: Vec3,
        animal: AnimalId,
        seed: u64,
    ) -> Self {
        let index = closest(&points, origin);
        let current = index.map(|i| points[i]);
        Self {
            points,
            order,
            index,
            current,
            origin,
            animal,
            seed,
            draws: 0,
        }
    }

    /// Updates where the animal is; `reached` measures from here.
    pub fn set_origin(&mut self, origin: Vec3) {
        self.origin = origin;
    }

    pub fn current(&self) -> Option<Vec3> {
        self.current
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    fn unit(&mut self) -> f32 {
        // Purpose ids above the machine's own keep the streams apart.
        let seed = compute_seed(self.seed, self.draws, self.animal.0, 0x100);
        self.draws += 1;
        PcgRng.unit(seed)
    }

    fn random_point_around_origin(&mut self) -> Vec3 {
        let radius = FALLBACK_WANDER_RADIUS * self.unit().sqrt();
        let angle = std::f32::consts::TAU * self.unit();
        self.origin + Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
    }

    fn next_index(&mut self, len: usize) -> usize {
        let current = self.index.unwrap_or(0);
        match self.order {
            RouteOrder::Sequential => (current + 1) % len,
            RouteOrder::Random if len > 1 => {
                let pick = ((self.unit() * (len - 1) as f32) as usize).min(len - 2);
                if pick >= current { pick + 1 } else { pick }
            }
            RouteOrder::Random => current,
        }
    }
}

impl WaypointSource for WaypointRoute {
    fn next_destination(&mut self) -> Option<Vec3> {
        if self.points.is_empty() {
            let point = self.random_point_around_origin();
            self.current = Some(point);
            debug!("no waypoints, wandering to {}", point);
            return self.current;
        }

        let index = self.next_index(self.points.len());
        self.index = Some(index);
        self.current = Some(self.points[index]);
        self.current
    }

    fn reached(&self, radius: f32) -> bool {
        self.current
            .is_none_or(|point| self.origin.distance(point) <= radius)
    }
}

fn closest(points: &[Vec3], origin: Vec3) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| origin.distance(**a).total_cmp(&origin.distance(**b)))
        .map(|(i, _)| i)
}
