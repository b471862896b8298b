//! Reference implementations of the collaborator traits.
//!
//! These are deliberately simple headless stand-ins for the engine services a
//! real game would provide: a kinematic mover, a health pool, a range scanner
//! over [`crate::World`], a patrol route, and an effect recorder.

mod detection;
mod effects;
mod health;
mod movement;
mod waypoints;

pub use detection::SimDetection;
pub use effects::RecordingEffects;
pub use health::{DamageOutcome, SimHealth};
pub use movement::{STOP_DISTANCE, SimMovement};
pub use waypoints::{FALLBACK_WANDER_RADIUS, RouteOrder, WaypointRoute};

use animal_core::{AnimalEnv, EventQueue};

/// Every collaborator of one animal.
#[derive(Clone, Debug)]
pub struct Body {
    pub movement: SimMovement,
    pub health: SimHealth,
    pub detection: SimDetection,
    pub waypoints: WaypointRoute,
    pub effects: RecordingEffects,
}

impl Body {
    /// Borrows the collaborators for one machine call.
    pub fn env<'a>(&'a mut self, events: &'a mut EventQueue) -> AnimalEnv<'a> {
        AnimalEnv::new(
            &mut self.movement,
            &mut self.health,
            &mut self.detection,
            &mut self.waypoints,
            &mut self.effects,
            events,
        )
    }
}
