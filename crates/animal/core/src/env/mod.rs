//! Collaborator traits consumed by the state machine.
//!
//! Engine-layer code implements these traits; the core only calls them. The
//! [`AnimalEnv`] bundle hands every collaborator to the machine for the
//! duration of one call, so nothing outlives a tick and no component can hold
//! a reference to the active state.

mod detection;
mod effects;
mod health;
mod movement;
mod rng;
mod waypoints;

pub use detection::Detection;
pub use effects::EffectSink;
pub use health::Health;
pub use movement::Movement;
pub use rng::{ConstantRng, Dice, DrawPurpose, PcgRng, RngOracle, compute_seed};
pub use waypoints::WaypointSource;

use crate::events::EventQueue;
use crate::sensor::SensorSnapshot;

/// Mutable borrows of every collaborator a state may touch during one call.
pub struct AnimalEnv<'a> {
    pub movement: &'a mut dyn Movement,
    pub health: &'a mut dyn Health,
    pub detection: &'a mut dyn Detection,
    pub waypoints: &'a mut dyn WaypointSource,
    pub effects: &'a mut dyn EffectSink,
    pub events: &'a mut EventQueue,
}

impl<'a> AnimalEnv<'a> {
    pub fn new(
        movement: &'a mut dyn Movement,
        health: &'a mut dyn Health,
        detection: &'a mut dyn Detection,
        waypoints: &'a mut dyn WaypointSource,
        effects: &'a mut dyn EffectSink,
        events: &'a mut EventQueue,
    ) -> Self {
        Self {
            movement,
            health,
            detection,
            waypoints,
            effects,
            events,
        }
    }

    /// Captures the per-tick sensor view from the detection and health collaborators.
    pub fn snapshot(&self) -> SensorSnapshot {
        SensorSnapshot::capture(&*self.detection, &*self.health)
    }
}
